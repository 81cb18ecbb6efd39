//! Domain models returned by the collaborators.

pub mod catalog;
pub mod user;

pub use catalog::{Category, MenuFilter, MenuItem};
pub use user::AuthenticatedUser;
