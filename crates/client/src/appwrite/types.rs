//! Appwrite wire types and their conversions to client models.

use rust_decimal::Decimal;
use serde::Deserialize;

use quickbite_core::{AccountId, CategoryId, Email, Price, ProductId, UserId};

use crate::models::{AuthenticatedUser, Category, MenuItem};

/// Response body of every list-documents call.
#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

/// Error body Appwrite sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The part of a created document the client needs back.
#[derive(Debug, Deserialize)]
pub struct CreatedDocument {
    #[serde(rename = "$id")]
    pub id: String,
}

/// `GET /account` response.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: Email,
}

/// Profile document in the users collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub name: String,
    pub email: Email,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Relationship attributes come back either expanded or as a bare ID.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Document(CategoryDocument),
    Id(String),
}

#[derive(Debug, Deserialize)]
pub struct MenuItemDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub description: String,
    pub categories: Option<CategoryRef>,
}

// =============================================================================
// Conversions
// =============================================================================

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            id: CategoryId::new(doc.id),
            name: doc.name,
            description: doc.description,
        }
    }
}

impl From<MenuItemDocument> for MenuItem {
    fn from(doc: MenuItemDocument) -> Self {
        let category = doc.categories.map(|category| match category {
            CategoryRef::Document(doc) => Category::from(doc),
            CategoryRef::Id(id) => Category {
                id: CategoryId::new(id),
                name: String::new(),
                description: None,
            },
        });

        Self {
            id: ProductId::new(doc.id),
            name: doc.name,
            price: Price::new(doc.price),
            image_url: doc.image_url,
            rating: doc.rating,
            calories: doc.calories,
            protein: doc.protein,
            description: doc.description,
            category,
        }
    }
}

impl From<UserDocument> for AuthenticatedUser {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: UserId::new(doc.id),
            account_id: AccountId::new(doc.account_id),
            name: doc.name,
            email: doc.email,
            avatar: doc.avatar.filter(|url| !url.is_empty()),
        }
    }
}

impl From<AccountResponse> for AuthenticatedUser {
    /// Fallback when the account has no profile document yet.
    fn from(account: AccountResponse) -> Self {
        Self {
            id: UserId::new(account.id.clone()),
            account_id: AccountId::new(account.id),
            name: account.name,
            email: account.email,
            avatar: None,
        }
    }
}
