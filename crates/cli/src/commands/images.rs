//! Image URL commands.

use tracing::info;

use quickbite_client::config::ClientConfig;
use quickbite_client::services::images::{HttpImageCache, prefetch_images};
use quickbite_core::build_image_url;

/// Print `url` with the project parameter applied.
///
/// Uses `project` when given, otherwise the configured project ID.
#[allow(clippy::print_stdout)]
pub fn image_url(config: &ClientConfig, url: &str, project: Option<&str>) {
    let project = project.unwrap_or(&config.appwrite.project_id);
    println!("{}", build_image_url(url, Some(project)));
}

/// Prefetch every URL and print the outcome counts.
///
/// URLs are normalized with the configured project ID first. Failures are
/// counted, never returned.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be created.
#[allow(clippy::print_stdout)]
pub async fn prefetch(config: &ClientConfig, urls: &[String]) -> quickbite_client::Result<()> {
    // Share the Appwrite session so protected files load too.
    let client = super::appwrite(config)?;
    let cache = HttpImageCache::with_client(client.http().clone(), &config.image_cache);
    let project_id = Some(client.project_id());
    let urls = urls.iter().map(|url| build_image_url(url, project_id));

    let report = prefetch_images(&cache, urls).await;
    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed,
        "Prefetch finished"
    );

    println!(
        "Prefetched {}/{} images ({} failed)",
        report.succeeded, report.attempted, report.failed
    );
    Ok(())
}
