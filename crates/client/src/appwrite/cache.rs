//! Cache types for catalog responses.

use quickbite_core::ProductId;

use crate::models::{Category, MenuFilter, MenuItem};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    MenuItems(MenuFilter),
    MenuItem(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    MenuItems(Vec<MenuItem>),
    MenuItem(Box<MenuItem>),
}
