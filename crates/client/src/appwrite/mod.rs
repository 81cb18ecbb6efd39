//! Appwrite REST client.
//!
//! # Architecture
//!
//! - Plain `reqwest` calls against the Appwrite REST API; the session cookie
//!   set by `POST /account/sessions/email` is kept in the client's cookie jar
//! - Catalog reads are cached in memory via `moka` (5 minute TTL)
//! - Every request carries the `X-Appwrite-Project` header
//!
//! # Example
//!
//! ```rust,ignore
//! use quickbite_client::appwrite::AppwriteClient;
//! use quickbite_client::services::catalog::Catalog;
//!
//! let client = AppwriteClient::new(&config.appwrite)?;
//! let categories = client.list_categories().await?;
//! ```

mod cache;
mod client;
pub mod query;
mod types;

pub use client::AppwriteClient;
pub use query::Query;

use thiserror::Error;

/// Errors that can occur when talking to Appwrite.
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Appwrite answered with an error body.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        /// Appwrite error type, e.g. `user_invalid_credentials`.
        kind: Option<String>,
        message: String,
    },

    /// A configured value cannot be sent as a header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AppwriteError {
    /// HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401 responses.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }
}
