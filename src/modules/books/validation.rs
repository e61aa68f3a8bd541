//! Creation-time gate for book payloads.

use thiserror::Error;

use super::models::{BookInput, NewBook};
use crate::merge::Blank;

/// First reason a book payload was rejected. The display text is the
/// response body sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookRejection {
    #[error("Invalid book data")]
    MissingPayload,
    #[error("ISBN is required")]
    MissingIsbn,
    #[error("Title is required")]
    MissingTitle,
    #[error("Author is required")]
    MissingAuthor,
    #[error("At least one category is required")]
    MissingCategories,
    #[error("Publication year is required")]
    MissingPublicationYear,
    #[error("Language is required")]
    MissingLanguage,
}

/// Check a creation payload, stopping at the first failing rule.
///
/// Rules run in a fixed order: payload, isbn, title, author, categories,
/// publication year, language.
pub fn validate(input: Option<BookInput>) -> Result<NewBook, BookRejection> {
    let input = input.ok_or(BookRejection::MissingPayload)?;

    let isbn = non_blank(input.isbn).ok_or(BookRejection::MissingIsbn)?;
    let title = non_blank(input.title).ok_or(BookRejection::MissingTitle)?;
    let author = input
        .author
        .filter(|author| !author.id.is_blank() && !author.name.is_blank())
        .ok_or(BookRejection::MissingAuthor)?;
    let categories = input
        .categories
        .filter(|categories| !categories.is_empty())
        .ok_or(BookRejection::MissingCategories)?;
    let publication_year = input
        .publication_year
        .ok_or(BookRejection::MissingPublicationYear)?;
    let language = non_blank(input.language).ok_or(BookRejection::MissingLanguage)?;

    Ok(NewBook {
        isbn,
        title,
        author,
        categories,
        publication_year,
        language,
        pages: input.pages,
        publisher: input.publisher,
        description: input.description,
        cover_image: input.cover_image,
        available: input.available,
        rating: input.rating,
        review_count: input.review_count,
        price: input.price,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_blank())
}
