//! Book record model and request/response payloads

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Store-assigned identifier
    pub b_id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
}

impl Book {
    /// Years elapsed since publication, relative to `current_year`
    pub fn age(&self, current_year: i32) -> i64 {
        i64::from(current_year) - i64::from(self.published_year)
    }

    /// Case-insensitive substring match against title, author or genre
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        [&self.title, &self.author, &self.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Create/update request body.
///
/// Every field is optional at the wire level so that missing fields reach
/// validation instead of failing deserialization. Year and price accept
/// either JSON numbers or numeric strings; anything else reads as absent.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
    #[validate(required, length(min = 1))]
    pub genre: Option<String>,
    #[validate(required)]
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub publication_year: Option<i32>,
    #[validate(required)]
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub price: Option<f64>,
}

impl BookInput {
    /// Convert into a complete record, if every field is present and usable
    pub fn into_new_book(self) -> Option<NewBook> {
        let price = self.price.filter(|p| p.is_finite())?;
        Some(NewBook {
            title: self.title?,
            author: self.author?,
            genre: self.genre?,
            publication_year: self.publication_year?,
            price,
        })
    }
}

/// Validated book fields, ready for insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub price: f64,
}

impl From<NewBook> for BookInput {
    fn from(book: NewBook) -> Self {
        Self {
            title: Some(book.title),
            author: Some(book.author),
            genre: Some(book.genre),
            publication_year: Some(book.publication_year),
            price: Some(book.price),
        }
    }
}

/// Create response: the submitted fields plus the assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedBook {
    pub b_id: i64,
    #[serde(flatten)]
    pub book: NewBook,
}

/// Confirmation body for update and delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
