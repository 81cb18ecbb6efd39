//! Authentication collaborator.
//!
//! The auth service itself lives in the backend; this module defines the
//! contract the client needs from it and validates sign-in input before any
//! request is made.

mod error;

pub use error::AuthError;

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};

use quickbite_core::Email;

use crate::models::AuthenticatedUser;

/// Backend authentication service.
pub trait AuthProvider: Send + Sync {
    /// Create a session for the given credentials.
    fn sign_in(&self, credentials: &Credentials) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// End the current session.
    fn logout(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// The user behind the current session, or `None` when signed out.
    fn current_user(&self) -> impl Future<Output = Result<Option<AuthenticatedUser>, AuthError>> + Send;
}

/// Validated sign-in credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

impl Credentials {
    /// The password in plain text, for the request body only.
    #[must_use]
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Raw sign-in form input.
#[derive(Debug, Default, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    /// Create a form from user input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form and turn it into [`Credentials`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank and
    /// `AuthError::InvalidEmail` if the email does not parse.
    pub fn validate(&self) -> Result<Credentials, AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(Credentials {
            email: Email::parse(&self.email)?,
            password: SecretString::from(self.password.clone()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_missing_credentials() {
        for form in [
            SignInForm::new("", "hunter22"),
            SignInForm::new("  ", "hunter22"),
            SignInForm::new("jane@food.app", ""),
        ] {
            assert!(matches!(form.validate(), Err(AuthError::MissingCredentials)));
        }
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let form = SignInForm::new("jane", "hunter22");
        assert!(matches!(form.validate(), Err(AuthError::InvalidEmail(_))));
    }

    #[test]
    fn test_valid_form() {
        let credentials = SignInForm::new(" jane@food.app ", "hunter22").validate().unwrap();
        assert_eq!(credentials.email.as_str(), "jane@food.app");
        assert_eq!(credentials.expose_password(), "hunter22");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = SignInForm::new("jane@food.app", "hunter22").validate().unwrap();
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("jane@food.app"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter22"));
    }
}
