//! QuickBite Client library.
//!
//! Everything between the screens and the backend: collaborator contracts,
//! the Appwrite REST client that fulfils them, image prefetching and the
//! session store the UI threads through its component tree.
//!
//! # Modules
//!
//! - [`appwrite`] - Appwrite account and databases client
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Unified error type and Sentry helpers
//! - [`models`] - Users, categories and menu items
//! - [`product`] - Product detail flow
//! - [`seed`] - Catalog seeding from JSON files
//! - [`services`] - Auth, catalog and image cache contracts
//! - [`state`] - Explicitly owned session store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod appwrite;
pub mod config;
pub mod error;
pub mod models;
pub mod product;
pub mod seed;
pub mod services;
pub mod state;

pub use error::{AppError, Result};
pub use state::{AppSession, AuthStatus, Route};
