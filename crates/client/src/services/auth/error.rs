//! Authentication error types.

use thiserror::Error;

use crate::appwrite::AppwriteError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password left blank on the sign-in form.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] quickbite_core::EmailError),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider accepted the sign-in but reports no current user.
    #[error("no user for the current session")]
    NotSignedIn,

    /// Appwrite request failed.
    #[error("appwrite error: {0}")]
    Remote(#[from] AppwriteError),

    /// Any other provider failure.
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
}
