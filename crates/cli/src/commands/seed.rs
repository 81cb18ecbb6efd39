//! Seed the catalog from a JSON file.
//!
//! This command reads categories and menu items from a file, validates them,
//! and creates the documents in the configured Appwrite collections.
//!
//! # Usage
//!
//! ```bash
//! qb seed data/menu.json --email admin@food.app --password hunter22
//! ```

use std::path::Path;

use tracing::{error, info};

use quickbite_client::AppError;
use quickbite_client::config::ClientConfig;
use quickbite_client::seed::{SeedData, seed_catalog};
use quickbite_client::services::auth::{AuthProvider, SignInForm};

/// Seed categories and menu items from `file_path`.
///
/// Signs in first when both `email` and `password` are given, so collections
/// that only allow signed-in writes can be seeded.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation, or if
/// sign-in fails. Individual document failures are logged, not returned.
pub async fn catalog(
    config: &ClientConfig,
    file_path: &str,
    email: Option<String>,
    password: Option<String>,
) -> quickbite_client::Result<()> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(AppError::NotFound(format!("File {file_path}")));
    }

    info!(path = %file_path, "Loading seed data from file");

    // Read and validate before touching the backend
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Cannot read {file_path}: {e}")))?;
    let data = SeedData::from_json(&content)
        .map_err(|e| AppError::InvalidInput(format!("Invalid seed file {file_path}: {e}")))?;

    info!(
        categories = data.categories.len(),
        menu_items = data.menu.len(),
        "Parsed seed data"
    );

    let errors = data.validate();
    if !errors.is_empty() {
        error!("Seed data validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(AppError::InvalidInput(format!(
            "{} validation errors found",
            errors.len()
        )));
    }

    let client = super::appwrite(config)?;

    if let (Some(email), Some(password)) = (email, password) {
        let credentials = SignInForm::new(email, password).validate()?;
        client.sign_in(&credentials).await?;
        info!("Signed in");
    }

    let result = seed_catalog(&client, &data).await;

    info!("Seeding complete!");
    info!("  Categories created: {}", result.categories_created);
    info!("  Menu items created: {}", result.menu_items_created);

    if !result.errors.is_empty() {
        error!("  Errors: {}", result.errors.len());
        for (name, err) in &result.errors {
            error!("    - {name}: {err}");
        }
    }

    Ok(())
}
