//! Unified error handling with Sentry integration.
//!
//! Collaborator failures surface to the user as alerts. [`AppError`] gathers
//! them in one type, and [`AppError::user_message`] picks the text the alert
//! shows without leaking transport details.

use thiserror::Error;

use crate::appwrite::AppwriteError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;

/// Alert text for a blank sign-in form.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter valid email address & password.";

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog read failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Appwrite client could not be created.
    #[error("Appwrite error: {0}")]
    Appwrite(#[from] AppwriteError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Message suitable for a user-facing alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => MISSING_CREDENTIALS_MESSAGE.to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::NotSignedIn => "Session expired, please sign in again".to_string(),
                AuthError::Remote(_) | AuthError::Unavailable(_) => {
                    "Could not reach the server. Please try again.".to_string()
                }
            },
            Self::Catalog(_) | Self::Appwrite(_) => {
                "Could not load the menu. Please try again.".to_string()
            }
            Self::NotFound(what) => format!("{what} not found"),
            Self::InvalidInput(msg) => msg.clone(),
            Self::Config(_) => "App is misconfigured".to_string(),
        }
    }

    /// Returns `true` for failures worth reporting to Sentry.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Appwrite(_)
                | Self::Catalog(_)
                | Self::Auth(AuthError::Remote(_) | AuthError::Unavailable(_))
        )
    }

    /// Log the error and capture it to Sentry if it is reportable.
    pub fn report(&self) {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Client error"
            );
        } else {
            tracing::debug!(error = %self, "User-facing error");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_message() {
        let err = AppError::from(AuthError::MissingCredentials);
        assert_eq!(err.user_message(), MISSING_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_remote_details_are_hidden() {
        let err = AppError::from(AuthError::Unavailable("tcp reset by 10.0.0.3".to_string()));
        assert!(!err.user_message().contains("10.0.0.3"));
        assert!(err.is_reportable());
    }

    #[test]
    fn test_user_mistakes_are_not_reportable() {
        assert!(!AppError::from(AuthError::InvalidCredentials).is_reportable());
        assert!(!AppError::NotFound("Product".to_string()).is_reportable());
    }

    #[test]
    fn test_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");
        assert_eq!(err.user_message(), "product-123 not found");
    }

    #[test]
    fn test_breadcrumb_without_client_is_harmless() {
        add_breadcrumb("cart", "Added item", &[("product_id", "p1")]);
        clear_sentry_user();
    }
}
