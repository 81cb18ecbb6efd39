//! Catalog collaborator: categories and menu items.

use std::future::Future;

use thiserror::Error;

use quickbite_core::ProductId;

use crate::appwrite::AppwriteError;
use crate::models::{Category, MenuFilter, MenuItem};

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Appwrite request failed.
    #[error("appwrite error: {0}")]
    Remote(#[from] AppwriteError),

    /// Any other catalog failure.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the menu.
pub trait Catalog: Send + Sync {
    /// All categories.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, CatalogError>> + Send;

    /// Menu items matching `filter`.
    fn list_menu_items(
        &self,
        filter: &MenuFilter,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CatalogError>> + Send;

    /// A single menu item, or `None` if the ID is unknown.
    fn get_menu_item(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<MenuItem>, CatalogError>> + Send;
}
