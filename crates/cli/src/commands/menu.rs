//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! qb categories
//! qb menu --category burgers --query cheese --limit 10
//! ```

use tracing::info;

use quickbite_client::config::ClientConfig;
use quickbite_client::models::{MenuFilter, MenuItem};
use quickbite_client::services::catalog::Catalog;
use quickbite_core::CategoryId;

/// Print every category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn categories(config: &ClientConfig) -> quickbite_client::Result<()> {
    let client = super::appwrite(config)?;
    let categories = client.list_categories().await?;
    info!(count = categories.len(), "Loaded categories");

    #[allow(clippy::print_stdout)]
    for category in &categories {
        println!("{:<24} {}", category.id, category.name);
    }
    Ok(())
}

/// Print menu items matching the given filter.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn list(
    config: &ClientConfig,
    category: Option<String>,
    query: Option<String>,
    limit: Option<u32>,
) -> quickbite_client::Result<()> {
    let filter = build_filter(category, query, limit);
    let client = super::appwrite(config)?;
    let items = client.list_menu_items(&filter).await?;
    info!(count = items.len(), "Loaded menu items");

    #[allow(clippy::print_stdout)]
    for item in &items {
        println!("{}", format_item(item));
    }
    Ok(())
}

fn build_filter(category: Option<String>, query: Option<String>, limit: Option<u32>) -> MenuFilter {
    let mut filter = MenuFilter::default();
    if let Some(category) = category.as_deref().and_then(|c| CategoryId::parse(c).ok()) {
        filter = filter.in_category(category);
    }
    if let Some(query) = query {
        filter = filter.matching(query);
    }
    if let Some(limit) = limit {
        filter = filter.limit(limit);
    }
    filter
}

fn format_item(item: &MenuItem) -> String {
    let category = item.category.as_ref().map_or("-", |c| c.name.as_str());
    format!(
        "{:<24} {:<32} {:>8}  {:.1}★  {} kcal  {}",
        item.id,
        item.name,
        item.price.display(),
        item.rating,
        item.calories,
        category
    )
}
