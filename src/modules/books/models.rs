use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::merge::Blank;

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// `book-<n>` identifier, also the partition key
    pub id: String,
    /// ISBN as supplied; format is not checked
    pub isbn: String,
    /// Display title
    pub title: String,
    /// Author reference
    pub author: AuthorInfo,
    /// Free-form category labels, at least one at creation
    #[serde(default)]
    pub categories: Vec<String>,
    /// Year of first publication
    pub publication_year: i32,
    /// Language code or name, e.g. `en`
    pub language: String,
    /// Page count
    pub pages: Option<i32>,
    /// Publisher name
    pub publisher: Option<String>,
    /// Long description or blurb
    pub description: Option<String>,
    /// Usually a URL
    pub cover_image: Option<String>,
    /// Whether the book can be borrowed; `true` unless set otherwise
    #[serde(default = "default_available")]
    pub available: bool,
    /// Average rating
    pub rating: Option<f64>,
    /// Number of reviews behind `rating`
    #[serde(default)]
    pub review_count: i32,
    /// List price
    pub price: Option<PriceInfo>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

fn default_available() -> bool {
    true
}

/// Reads a string field where `null` and absent both mean empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    /// Author identifier; empty when not supplied
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Author display name; empty when not supplied
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

// A supplied author always replaces the stored one, even with empty parts.
impl Blank for AuthorInfo {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    #[serde(default)]
    pub amount: Option<f64>,
    /// ISO 4217 code such as `EUR`
    #[serde(default)]
    pub currency: Option<String>,
}

impl Blank for PriceInfo {}

/// Creation and update payload; every field may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<AuthorInfo>,
    pub categories: Option<Vec<String>>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub available: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub price: Option<PriceInfo>,
}

/// Creation payload that passed validation; required fields are guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: AuthorInfo,
    pub categories: Vec<String>,
    pub publication_year: i32,
    pub language: String,
    pub pages: Option<i32>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub available: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub price: Option<PriceInfo>,
}

impl Book {
    /// Build the initial state of a book; `createdAt == updatedAt == now`.
    pub fn create(id: String, input: NewBook, now: DateTime<Utc>) -> Self {
        Self {
            id,
            isbn: input.isbn,
            title: input.title,
            author: input.author,
            categories: input.categories,
            publication_year: input.publication_year,
            language: input.language,
            pages: input.pages,
            publisher: input.publisher,
            description: input.description,
            cover_image: input.cover_image,
            available: input.available.unwrap_or(true),
            rating: input.rating,
            review_count: input.review_count.unwrap_or(0),
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }
}
