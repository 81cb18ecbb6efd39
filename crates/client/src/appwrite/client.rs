//! `AppwriteClient` and its collaborator implementations.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use quickbite_core::{CategoryId, ProductId};

use crate::config::AppwriteConfig;
use crate::models::{AuthenticatedUser, Category, MenuFilter, MenuItem};
use crate::seed::{CatalogWriter, NewCategory, NewMenuItem};
use crate::services::auth::{AuthError, AuthProvider, Credentials};
use crate::services::catalog::{Catalog, CatalogError};

use super::AppwriteError;
use super::cache::{CacheKey, CacheValue};
use super::query::{Query, to_params};
use super::types::{
    AccountResponse, CategoryDocument, CreatedDocument, DocumentList, ErrorBody, MenuItemDocument,
    UserDocument,
};

/// Upper bound on categories fetched in one call; menus are small.
const CATEGORY_LIMIT: u32 = 100;

// =============================================================================
// AppwriteClient
// =============================================================================

/// Client for the Appwrite account and databases APIs.
///
/// Cheap to clone; clones share the HTTP connection pool, the session cookie
/// jar and the catalog cache.
#[derive(Clone)]
pub struct AppwriteClient {
    inner: Arc<AppwriteClientInner>,
}

struct AppwriteClientInner {
    client: reqwest::Client,
    config: AppwriteConfig,
    cache: Cache<CacheKey, CacheValue>,
}

impl AppwriteClient {
    /// Create a new Appwrite client.
    ///
    /// # Errors
    ///
    /// Returns error if the project ID is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &AppwriteConfig) -> Result<Self, AppwriteError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(&config.project_id)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(AppwriteClientInner {
                client,
                config: config.clone(),
                cache,
            }),
        })
    }

    /// The project ID images must be tagged with.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.inner.config.project_id
    }

    /// The underlying HTTP client, shared so image fetches reuse connections.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Drop every cached catalog response.
    pub fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.config.endpoint)
    }

    fn documents_url(&self, collection_id: &str) -> String {
        self.url(&format!(
            "/databases/{}/collections/{collection_id}/documents",
            self.inner.config.database_id
        ))
    }

    /// URL of a single document, or `None` if `document_id` cannot name one.
    ///
    /// The ID is percent-encoded as one path segment. Dot segments are
    /// rejected since URL parsing would resolve them.
    fn document_url(&self, collection_id: &str, document_id: &str) -> Option<String> {
        if matches!(document_id, "" | "." | "..") {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.documents_url(collection_id),
            urlencoding::encode(document_id)
        ))
    }

    /// Turn a response into `T`, mapping non-2xx bodies to `AppwriteError::Api`.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppwriteError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (kind, message) = serde_json::from_str::<ErrorBody>(&body).map_or_else(
                |_| (None, body.chars().take(200).collect()),
                |err| (err.kind, err.message),
            );
            debug!(status = %status, kind = ?kind, message = %message, "Appwrite returned an error");
            return Err(AppwriteError::Api {
                status: status.as_u16(),
                kind,
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Self::read_json`] for endpoints that answer with no body.
    async fn read_empty(response: reqwest::Response) -> Result<(), AppwriteError> {
        if response.status().is_success() {
            return Ok(());
        }
        Self::read_json::<serde_json::Value>(response).await.map(drop)
    }

    async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let response = self
            .inner
            .client
            .get(self.documents_url(collection_id))
            .query(&to_params(queries))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Create a document with a server-assigned ID.
    async fn create_document(
        &self,
        collection_id: &str,
        data: serde_json::Value,
    ) -> Result<CreatedDocument, AppwriteError> {
        let response = self
            .inner
            .client
            .post(self.documents_url(collection_id))
            .json(&json!({ "documentId": "unique()", "data": data }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Profile document for an account, if one exists.
    async fn find_profile(&self, account_id: &str) -> Result<Option<UserDocument>, AppwriteError> {
        let list: DocumentList<UserDocument> = self
            .list_documents(
                &self.inner.config.user_collection_id,
                &[Query::equal("accountId", account_id), Query::limit(1)],
            )
            .await?;
        Ok(list.documents.into_iter().next())
    }
}

/// Appwrite-side queries for a menu filter.
fn menu_queries(filter: &MenuFilter) -> Vec<Query> {
    let mut queries = Vec::new();
    if let Some(category) = &filter.category {
        queries.push(Query::equal("categories", category.as_str()));
    }
    if let Some(query) = &filter.query {
        queries.push(Query::search("name", query.as_str()));
    }
    if let Some(limit) = filter.limit {
        queries.push(Query::limit(limit));
    }
    queries
}

// =============================================================================
// AuthProvider
// =============================================================================

impl AuthProvider for AppwriteClient {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let response = self
            .inner
            .client
            .post(self.url("/account/sessions/email"))
            .json(&json!({
                "email": credentials.email.as_str(),
                "password": credentials.expose_password(),
            }))
            .send()
            .await
            .map_err(AppwriteError::from)?;

        match Self::read_json::<serde_json::Value>(response).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_unauthorized() => Err(AuthError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), AuthError> {
        let response = self
            .inner
            .client
            .delete(self.url("/account/sessions/current"))
            .send()
            .await
            .map_err(AppwriteError::from)?;

        match Self::read_empty(response).await {
            // No session to delete means we are already signed out.
            Err(e) if e.is_unauthorized() => {
                warn!("Logout without an active session");
                Ok(())
            }
            other => other.map_err(AuthError::from),
        }
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        let response = self
            .inner
            .client
            .get(self.url("/account"))
            .send()
            .await
            .map_err(AppwriteError::from)?;

        let account: AccountResponse = match Self::read_json(response).await {
            Ok(account) => account,
            Err(e) if e.is_unauthorized() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let user = match self.find_profile(&account.id).await? {
            Some(profile) => AuthenticatedUser::from(profile),
            None => {
                debug!(account_id = %account.id, "No profile document, using account fields");
                AuthenticatedUser::from(account)
            }
        };
        Ok(Some(user))
    }
}

// =============================================================================
// Catalog
// =============================================================================

impl Catalog for AppwriteClient {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&CacheKey::Categories).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let list: DocumentList<CategoryDocument> = self
            .list_documents(
                &self.inner.config.categories_collection_id,
                &[Query::limit(CATEGORY_LIMIT)],
            )
            .await?;
        let categories: Vec<Category> = list.documents.into_iter().map(Category::from).collect();

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn list_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, CatalogError> {
        let cache_key = CacheKey::MenuItems(filter.clone());
        if let Some(CacheValue::MenuItems(items)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu items");
            return Ok(items);
        }

        let list: DocumentList<MenuItemDocument> = self
            .list_documents(&self.inner.config.menu_collection_id, &menu_queries(filter))
            .await?;
        debug!(total = list.total, "Fetched menu items");
        let items: Vec<MenuItem> = list.documents.into_iter().map(MenuItem::from).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::MenuItems(items.clone()))
            .await;

        Ok(items)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_menu_item(&self, id: &ProductId) -> Result<Option<MenuItem>, CatalogError> {
        let cache_key = CacheKey::MenuItem(id.clone());
        if let Some(CacheValue::MenuItem(item)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu item");
            return Ok(Some(*item));
        }

        let Some(url) = self.document_url(&self.inner.config.menu_collection_id, id.as_str()) else {
            debug!("Not a valid document ID");
            return Ok(None);
        };
        let response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(AppwriteError::from)?;

        let item = match Self::read_json::<MenuItemDocument>(response).await {
            Ok(doc) => MenuItem::from(doc),
            Err(e) if e.status() == Some(404) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::MenuItem(Box::new(item.clone())))
            .await;

        Ok(Some(item))
    }
}

// =============================================================================
// CatalogWriter
// =============================================================================

impl CatalogWriter for AppwriteClient {
    #[instrument(skip_all, fields(name = %category.name))]
    async fn create_category(&self, category: &NewCategory) -> Result<CategoryId, CatalogError> {
        let doc = self
            .create_document(
                &self.inner.config.categories_collection_id,
                json!({
                    "name": category.name.trim(),
                    "description": category.description,
                }),
            )
            .await?;
        self.invalidate_catalog();
        Ok(CategoryId::new(doc.id))
    }

    #[instrument(skip_all, fields(name = %item.name, category = %category))]
    async fn create_menu_item(&self, item: &NewMenuItem, category: &CategoryId) -> Result<ProductId, CatalogError> {
        // Appwrite float attributes take JSON numbers only.
        let price = item
            .price
            .to_f64()
            .ok_or_else(|| CatalogError::Unavailable(format!("price {} out of range", item.price)))?;

        let doc = self
            .create_document(
                &self.inner.config.menu_collection_id,
                json!({
                    "name": item.name.trim(),
                    "price": price,
                    "image_url": item.image_url,
                    "rating": item.rating,
                    "calories": item.calories,
                    "protein": item.protein,
                    "description": item.description,
                    "categories": category.as_str(),
                }),
            )
            .await?;
        self.invalidate_catalog();
        Ok(ProductId::new(doc.id))
    }
}
