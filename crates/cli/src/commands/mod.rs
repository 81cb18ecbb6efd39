//! CLI subcommands.

pub mod account;
pub mod cart;
pub mod images;
pub mod menu;
pub mod seed;

use quickbite_client::appwrite::AppwriteClient;
use quickbite_client::config::ClientConfig;

/// Build an Appwrite client from configuration.
fn appwrite(config: &ClientConfig) -> quickbite_client::Result<AppwriteClient> {
    Ok(AppwriteClient::new(&config.appwrite)?)
}
