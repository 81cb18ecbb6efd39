//! Collaborator contracts and local services.
//!
//! - [`auth`] - Sign-in, logout and current-user lookup
//! - [`catalog`] - Categories and menu items
//! - [`images`] - Image cache warming

pub mod auth;
pub mod catalog;
pub mod images;
