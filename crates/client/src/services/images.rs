//! Image cache warming.
//!
//! Screens call [`prefetch_images`] (or [`spawn_prefetch`] when they do not
//! want to wait) with the normalized URLs they are about to show. Prefetch is
//! best-effort: every attempt runs to completion, failures are logged and
//! counted, and nothing is ever returned as an error.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ImageCacheConfig;

/// Errors from a single prefetch attempt.
#[derive(Debug, Error)]
pub enum ImageCacheError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Any other cache failure.
    #[error("image cache unavailable: {0}")]
    Unavailable(String),
}

/// A local image cache that can be warmed ahead of display.
pub trait ImageCache: Send + Sync {
    /// Fetch `url` into the cache.
    fn prefetch(&self, url: &str) -> impl Future<Output = Result<(), ImageCacheError>> + Send;
}

/// Outcome of a [`prefetch_images`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Unique, non-empty URLs attempted.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Warm `cache` with every unique, non-empty URL in `urls`.
///
/// All attempts run concurrently and the call returns once each of them has
/// settled. Individual failures are logged at `debug` and counted in the
/// report; they never surface as errors.
pub async fn prefetch_images<C, I, S>(cache: &C, urls: I) -> PrefetchReport
where
    C: ImageCache + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let unique: Vec<String> = urls
        .into_iter()
        .filter_map(|url| {
            let url = url.as_ref();
            (!url.is_empty() && seen.insert(url.to_owned())).then(|| url.to_owned())
        })
        .collect();

    let results = join_all(unique.iter().map(|url| cache.prefetch(url))).await;

    let mut report = PrefetchReport {
        attempted: unique.len(),
        ..PrefetchReport::default()
    };
    for (url, result) in unique.iter().zip(results) {
        match result {
            Ok(()) => report.succeeded += 1,
            Err(e) => {
                debug!(url = %url, error = %e, "Image prefetch failed");
                report.failed += 1;
            }
        }
    }
    report
}

/// Prefetch in a detached background task.
///
/// No handle is returned: callers that navigate away simply never look at
/// the result. Must be called from within a Tokio runtime.
pub fn spawn_prefetch<C>(cache: Arc<C>, urls: Vec<String>)
where
    C: ImageCache + 'static,
{
    tokio::spawn(async move {
        let report = prefetch_images(cache.as_ref(), &urls).await;
        debug!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "Background image prefetch settled"
        );
    });
}

// =============================================================================
// HttpImageCache
// =============================================================================

/// In-memory image cache backed by plain HTTP GETs.
#[derive(Clone)]
pub struct HttpImageCache {
    client: reqwest::Client,
    cache: Cache<String, Arc<[u8]>>,
}

impl HttpImageCache {
    /// Create a new cache.
    #[must_use]
    pub fn new(config: &ImageCacheConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a cache that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ImageCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.time_to_live)
            .build();

        Self { client, cache }
    }

    /// Cached bytes for `url`, if present.
    pub async fn get(&self, url: &str) -> Option<Arc<[u8]>> {
        self.cache.get(url).await
    }

    /// Returns `true` if `url` is cached.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.cache.contains_key(url)
    }
}

impl ImageCache for HttpImageCache {
    #[instrument(skip(self))]
    async fn prefetch(&self, url: &str) -> Result<(), ImageCacheError> {
        if self.cache.contains_key(url) {
            debug!("Image already cached");
            return Ok(());
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageCacheError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        self.cache
            .insert(url.to_string(), Arc::from(bytes.as_ref()))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every URL it is asked for and fails those containing "broken".
    #[derive(Default)]
    struct RecordingCache {
        requested: Mutex<Vec<String>>,
    }

    impl RecordingCache {
        fn requested(&self) -> Vec<String> {
            self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
        }
    }

    impl ImageCache for RecordingCache {
        async fn prefetch(&self, url: &str) -> Result<(), ImageCacheError> {
            if let Ok(mut urls) = self.requested.lock() {
                urls.push(url.to_string());
            }
            tokio::task::yield_now().await;
            if url.contains("broken") {
                return Err(ImageCacheError::Unavailable(url.to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_prefetch_deduplicates_and_skips_empty() {
        let cache = RecordingCache::default();
        let report = prefetch_images(&cache, ["a", "", "b", "a", "b", ""]).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(cache.requested(), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_prefetch_swallows_failures() {
        let cache = RecordingCache::default();
        let report = prefetch_images(&cache, ["ok-1", "broken-1", "ok-2", "broken-2"]).await;

        assert_eq!(
            report,
            PrefetchReport {
                attempted: 4,
                succeeded: 2,
                failed: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_prefetch_empty_input() {
        let cache = RecordingCache::default();
        let report = prefetch_images(&cache, Vec::<String>::new()).await;
        assert_eq!(report, PrefetchReport::default());
    }

    #[tokio::test]
    async fn test_spawn_prefetch_runs_in_background() {
        let cache = Arc::new(RecordingCache::default());
        spawn_prefetch(Arc::clone(&cache), vec!["a".to_string(), "broken".to_string()]);

        for _ in 0..100 {
            if cache.requested().len() == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(cache.requested().len(), 2);
    }

    #[test]
    fn test_http_cache_starts_empty() {
        let cache = HttpImageCache::new(&ImageCacheConfig::default());
        assert!(!cache.contains("https://example.com/a.png"));
    }
}
