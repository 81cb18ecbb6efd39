//! Catalog models: categories and menu items.

use serde::{Deserialize, Serialize};

use quickbite_core::{CategoryId, Price, ProductId};

/// A menu category ("Burgers", "Pizzas", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Raw storage URL, not yet normalized with the project parameter.
    pub image_url: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    pub calories: u32,
    /// Protein in grams.
    pub protein: u32,
    pub description: String,
    pub category: Option<Category>,
}

/// Filter for listing menu items. The default lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MenuFilter {
    pub category: Option<CategoryId>,
    /// Full-text search on the item name.
    pub query: Option<String>,
    pub limit: Option<u32>,
}

impl MenuFilter {
    /// Restrict to a category.
    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Search by name. Blank queries are ignored.
    #[must_use]
    pub fn matching(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.trim().is_empty()).then(|| query.trim().to_string());
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` if `item` passes this filter.
    ///
    /// Used by in-memory catalogs; remote catalogs push the filter down as
    /// queries instead.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        let category_ok = self.category.as_ref().is_none_or(|wanted| {
            item.category
                .as_ref()
                .is_some_and(|category| &category.id == wanted)
        });
        let query_ok = self.query.as_ref().is_none_or(|query| {
            item.name.to_lowercase().contains(&query.to_lowercase())
        });
        category_ok && query_ok
    }
}
