//! Catalog seeding.
//!
//! Seed files are JSON with the categories and menu items to create. Menu
//! items name their category by its `name`; IDs are assigned by the backend.
//!
//! ```json
//! {
//!   "categories": [{ "name": "Burgers", "description": "Grilled to order" }],
//!   "menu": [{ "name": "Classic Burger", "price": "5.99", "category": "Burgers" }]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::future::Future;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use quickbite_core::{CategoryId, ProductId};

use crate::services::catalog::CatalogError;

/// Parsed seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<NewCategory>,
    #[serde(default)]
    pub menu: Vec<NewMenuItem>,
}

/// A category to create.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// A menu item to create.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub description: String,
    /// Name of a category in the same file.
    pub category: String,
}

impl SeedData {
    /// Parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid seed document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Problems that would make seeding fail part-way. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut names = HashSet::new();

        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                errors.push("category with an empty name".to_string());
            } else if !names.insert(name) {
                errors.push(format!("duplicate category '{name}'"));
            }
        }

        for item in &self.menu {
            if item.name.trim().is_empty() {
                errors.push("menu item with an empty name".to_string());
            }
            if item.price.is_sign_negative() {
                errors.push(format!("menu item '{}' has a negative price", item.name));
            }
            if !names.contains(item.category.trim()) {
                errors.push(format!(
                    "menu item '{}' references unknown category '{}'",
                    item.name, item.category
                ));
            }
        }

        errors
    }
}

/// Outcome of [`seed_catalog`].
#[derive(Debug, Default)]
pub struct SeedReport {
    pub categories_created: usize,
    pub menu_items_created: usize,
    /// Name of the entry that failed, with the reason.
    pub errors: Vec<(String, String)>,
}

/// Write access to the catalog, used only for seeding.
pub trait CatalogWriter: Send + Sync {
    fn create_category(
        &self,
        category: &NewCategory,
    ) -> impl Future<Output = Result<CategoryId, CatalogError>> + Send;

    fn create_menu_item(
        &self,
        item: &NewMenuItem,
        category: &CategoryId,
    ) -> impl Future<Output = Result<ProductId, CatalogError>> + Send;
}

/// Create every category, then every menu item under its category.
///
/// Failures are recorded in the report and seeding carries on. Items whose
/// category could not be created are skipped.
#[instrument(skip_all, fields(categories = data.categories.len(), menu = data.menu.len()))]
pub async fn seed_catalog<W: CatalogWriter>(writer: &W, data: &SeedData) -> SeedReport {
    let mut report = SeedReport::default();
    let mut created: HashMap<&str, CategoryId> = HashMap::new();

    for category in &data.categories {
        match writer.create_category(category).await {
            Ok(id) => {
                created.insert(category.name.trim(), id);
                report.categories_created += 1;
            }
            Err(e) => {
                warn!(name = %category.name, error = %e, "Failed to create category");
                report.errors.push((category.name.clone(), e.to_string()));
            }
        }
    }

    for item in &data.menu {
        let Some(category) = created.get(item.category.trim()) else {
            report
                .errors
                .push((item.name.clone(), format!("category '{}' was not created", item.category)));
            continue;
        };
        match writer.create_menu_item(item, category).await {
            Ok(_) => report.menu_items_created += 1,
            Err(e) => {
                warn!(name = %item.name, error = %e, "Failed to create menu item");
                report.errors.push((item.name.clone(), e.to_string()));
            }
        }
    }

    info!(
        categories = report.categories_created,
        menu_items = report.menu_items_created,
        errors = report.errors.len(),
        "Seeding finished"
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const SEED: &str = r#"{
        "categories": [
            { "name": "Burgers", "description": "Grilled to order" },
            { "name": "Sides" }
        ],
        "menu": [
            { "name": "Classic Burger", "price": "5.99", "category": "Burgers", "calories": 550 },
            { "name": "Fries", "price": 2.5, "category": "Sides" },
            { "name": "Onion Rings", "price": "3.25", "category": "Sides" }
        ]
    }"#;

    /// Records writes; refuses categories and items named in `reject`.
    #[derive(Default)]
    struct FakeWriter {
        reject: Vec<&'static str>,
        items: Mutex<Vec<(String, CategoryId)>>,
    }

    impl CatalogWriter for FakeWriter {
        async fn create_category(&self, category: &NewCategory) -> Result<CategoryId, CatalogError> {
            if self.reject.contains(&category.name.as_str()) {
                return Err(CatalogError::Unavailable("rejected".to_string()));
            }
            Ok(CategoryId::new(format!("cat-{}", category.name.to_lowercase())))
        }

        async fn create_menu_item(
            &self,
            item: &NewMenuItem,
            category: &CategoryId,
        ) -> Result<ProductId, CatalogError> {
            if self.reject.contains(&item.name.as_str()) {
                return Err(CatalogError::Unavailable("rejected".to_string()));
            }
            self.items.lock().unwrap().push((item.name.clone(), category.clone()));
            Ok(ProductId::new(item.name.to_lowercase()))
        }
    }

    #[test]
    fn test_parse_seed_file() {
        let data = SeedData::from_json(SEED).unwrap();
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.menu.len(), 3);
        assert_eq!(data.menu[1].price, Decimal::new(25, 1));
        assert!(data.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let data = SeedData::from_json(
            r#"{
                "categories": [{ "name": "Burgers" }, { "name": " Burgers " }, { "name": "" }],
                "menu": [
                    { "name": "", "price": "1.00", "category": "Burgers" },
                    { "name": "Shake", "price": "-2.00", "category": "Drinks" }
                ]
            }"#,
        )
        .unwrap();

        let errors = data.validate();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.contains("duplicate category 'Burgers'")));
        assert!(errors.iter().any(|e| e.contains("unknown category 'Drinks'")));
    }

    #[tokio::test]
    async fn test_seed_links_items_to_created_categories() {
        let writer = FakeWriter::default();
        let report = seed_catalog(&writer, &SeedData::from_json(SEED).unwrap()).await;

        assert_eq!(report.categories_created, 2);
        assert_eq!(report.menu_items_created, 3);
        assert!(report.errors.is_empty());

        let items = writer.items.lock().unwrap();
        assert_eq!(items[0], ("Classic Burger".to_string(), CategoryId::new("cat-burgers")));
        assert_eq!(items[2].1, CategoryId::new("cat-sides"));
    }

    #[tokio::test]
    async fn test_seed_continues_past_failures() {
        let writer = FakeWriter {
            reject: vec!["Sides", "Classic Burger"],
            ..FakeWriter::default()
        };
        let report = seed_catalog(&writer, &SeedData::from_json(SEED).unwrap()).await;

        assert_eq!(report.categories_created, 1);
        assert_eq!(report.menu_items_created, 0);
        // Sides, Classic Burger, and both items under the missing category.
        assert_eq!(report.errors.len(), 4);
        assert!(writer.items.lock().unwrap().is_empty());
    }
}
