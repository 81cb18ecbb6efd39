//! Signed-in user model.

use serde::{Deserialize, Serialize};

use quickbite_core::{AccountId, Email, UserId};

/// The user behind the current session.
///
/// Owned by the auth collaborator; the rest of the client only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Profile document ID.
    pub id: UserId,
    /// Auth account the profile belongs to.
    pub account_id: AccountId,
    pub name: String,
    pub email: Email,
    /// Avatar image URL, if the profile has one.
    pub avatar: Option<String>,
}

impl AuthenticatedUser {
    /// Initials for an avatar placeholder, e.g. "JD" for "Jane Doe".
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
