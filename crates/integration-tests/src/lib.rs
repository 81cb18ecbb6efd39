//! Integration tests for QuickBite.
//!
//! The tests drive the session, cart, product detail and prefetch flows end
//! to end against in-memory collaborators, so no Appwrite project is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickbite-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use quickbite_client::models::{AuthenticatedUser, Category, MenuFilter, MenuItem};
use quickbite_client::services::auth::{AuthError, AuthProvider, Credentials};
use quickbite_client::services::catalog::{Catalog, CatalogError};
use quickbite_client::services::images::{ImageCache, ImageCacheError};
use quickbite_core::{AccountId, Email, Price, ProductId, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Auth
// =============================================================================

/// Auth backend holding one known account.
pub struct InMemoryAuth {
    email: String,
    password: String,
    user: AuthenticatedUser,
    session: Mutex<bool>,
}

impl InMemoryAuth {
    /// Account with the given credentials and a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if `email` is not a valid address.
    pub fn new(email: &str, password: &str, name: &str) -> Result<Self, AuthError> {
        let user = AuthenticatedUser {
            id: UserId::new("user-1"),
            account_id: AccountId::new("account-1"),
            name: name.to_string(),
            email: Email::parse(email)?,
            avatar: None,
        };
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
            user,
            session: Mutex::new(false),
        })
    }

    /// Whether a backend session is currently open.
    #[must_use]
    pub fn has_session(&self) -> bool {
        *lock(&self.session)
    }
}

impl AuthProvider for InMemoryAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if credentials.email.as_str() != self.email || credentials.expose_password() != self.password {
            return Err(AuthError::InvalidCredentials);
        }
        *lock(&self.session) = true;
        Ok(())
    }

    async fn logout(&self) -> Result<(), AuthError> {
        *lock(&self.session) = false;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        Ok(self.has_session().then(|| self.user.clone()))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Catalog backed by a fixed list of items.
#[derive(Default)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    items: Vec<MenuItem>,
}

impl InMemoryCatalog {
    #[must_use]
    pub const fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }
}

impl Catalog for InMemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn list_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, CatalogError> {
        let matching = self.items.iter().filter(|item| filter.matches(item)).cloned();
        Ok(match filter.limit {
            Some(limit) => matching.take(usize::try_from(limit).unwrap_or(usize::MAX)).collect(),
            None => matching.collect(),
        })
    }

    async fn get_menu_item(&self, id: &ProductId) -> Result<Option<MenuItem>, CatalogError> {
        Ok(self.items.iter().find(|item| &item.id == id).cloned())
    }
}

/// A menu item with sensible defaults.
#[must_use]
pub fn menu_item(id: &str, name: &str, cents: i64) -> MenuItem {
    MenuItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        image_url: format!("https://cdn.test/{id}.png"),
        rating: 4.5,
        calories: 500,
        protein: 20,
        description: String::new(),
        category: None,
    }
}

// =============================================================================
// Image cache
// =============================================================================

/// Image cache that records every fetch and fails for configured URLs.
#[derive(Default)]
pub struct RecordingImageCache {
    failing: HashSet<String>,
    fetched: Mutex<HashMap<String, u32>>,
}

impl RecordingImageCache {
    /// Cache that rejects every URL in `failing`.
    #[must_use]
    pub fn failing<I, S>(failing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: failing.into_iter().map(Into::into).collect(),
            fetched: Mutex::default(),
        }
    }

    /// How many times `url` was fetched.
    #[must_use]
    pub fn fetch_count(&self, url: &str) -> u32 {
        lock(&self.fetched).get(url).copied().unwrap_or(0)
    }

    /// Total fetches across all URLs.
    #[must_use]
    pub fn total_fetches(&self) -> u32 {
        lock(&self.fetched).values().sum()
    }
}

impl ImageCache for RecordingImageCache {
    async fn prefetch(&self, url: &str) -> Result<(), ImageCacheError> {
        *lock(&self.fetched).entry(url.to_string()).or_default() += 1;
        if self.failing.contains(url) {
            return Err(ImageCacheError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(())
    }
}
