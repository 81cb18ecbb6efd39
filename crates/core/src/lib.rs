//! QuickBite Core - Cart aggregation and shared types.
//!
//! This crate provides the pieces of the QuickBite client that carry real
//! invariants and are shared by every other component:
//! - `client` - Collaborators, Appwrite REST client and the app session store
//! - `cli` - Command-line tool for browsing the menu and building carts
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async runtime. The cart is a plain owned value mutated through
//! `&mut self`, so it can be embedded in whatever state container the UI uses.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails
//! - [`cart`] - Cart aggregator with customization-aware line identity
//! - [`image`] - Image URL normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod image;
pub mod types;

pub use cart::{Cart, CartCustomization, CartItem};
pub use image::build_image_url;
pub use types::*;
