use chrono::{DateTime, Utc};

use super::models::{Book, BookInput};
use crate::merge::{FieldPolicy, MergePolicy};

/// Blank or absent values never overwrite a book field.
pub const BOOK_MERGE_POLICY: MergePolicy = MergePolicy::new(
    "Book",
    &[
        ("isbn", FieldPolicy::SkipBlank),
        ("title", FieldPolicy::SkipBlank),
        // An author with empty id/name still overwrites.
        ("author", FieldPolicy::Coalesce),
        ("categories", FieldPolicy::SkipBlank),
        ("publicationYear", FieldPolicy::Coalesce),
        ("language", FieldPolicy::SkipBlank),
        ("pages", FieldPolicy::Coalesce),
        ("publisher", FieldPolicy::Coalesce),
        ("description", FieldPolicy::Coalesce),
        ("coverImage", FieldPolicy::Coalesce),
        ("available", FieldPolicy::Coalesce),
        ("rating", FieldPolicy::Coalesce),
        ("reviewCount", FieldPolicy::Coalesce),
        ("price", FieldPolicy::Coalesce),
    ],
);

impl Book {
    /// Next state of this book after applying `patch` at `now`.
    ///
    /// `id` and `createdAt` are carried over untouched; `updatedAt` becomes `now`.
    pub fn merge(self, patch: BookInput, now: DateTime<Utc>) -> Book {
        let rule = |field: &str| BOOK_MERGE_POLICY.rule(field);

        Book {
            id: self.id,
            isbn: rule("isbn").resolve_required(self.isbn, patch.isbn),
            title: rule("title").resolve_required(self.title, patch.title),
            author: rule("author").resolve_required(self.author, patch.author),
            categories: rule("categories").resolve_required(self.categories, patch.categories),
            publication_year: rule("publicationYear")
                .resolve_required(self.publication_year, patch.publication_year),
            language: rule("language").resolve_required(self.language, patch.language),
            pages: rule("pages").resolve(self.pages, patch.pages),
            publisher: rule("publisher").resolve(self.publisher, patch.publisher),
            description: rule("description").resolve(self.description, patch.description),
            cover_image: rule("coverImage").resolve(self.cover_image, patch.cover_image),
            available: rule("available").resolve_required(self.available, patch.available),
            rating: rule("rating").resolve(self.rating, patch.rating),
            review_count: rule("reviewCount").resolve_required(self.review_count, patch.review_count),
            price: rule("price").resolve(self.price, patch.price),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::{AuthorInfo, PriceInfo};
    use chrono::{Duration, TimeZone};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap()
    }

    fn existing() -> Book {
        Book {
            id: "book-500".to_string(),
            isbn: "111".to_string(),
            title: "Old Title".to_string(),
            author: AuthorInfo {
                id: "a1".to_string(),
                name: "Ann".to_string(),
            },
            categories: vec!["fiction".to_string()],
            publication_year: 1999,
            language: "en".to_string(),
            pages: Some(300),
            publisher: Some("Pub".to_string()),
            description: Some("desc".to_string()),
            cover_image: None,
            available: false,
            rating: Some(3.5),
            review_count: 4,
            price: Some(PriceInfo {
                amount: Some(10.0),
                currency: Some("USD".to_string()),
            }),
            created_at: created_at(),
            updated_at: created_at(),
        }
    }

    #[test]
    fn policy_covers_every_patchable_field() {
        let patch = serde_json::to_value(BookInput::default()).unwrap();
        let mut patchable: Vec<_> = patch.as_object().unwrap().keys().cloned().collect();
        let mut listed: Vec<_> = BOOK_MERGE_POLICY.fields().map(str::to_string).collect();
        patchable.sort();
        listed.sort();
        assert_eq!(patchable, listed);
    }

    #[test]
    fn empty_patch_only_touches_updated_at() {
        let now = created_at() + Duration::hours(1);
        let merged = existing().merge(BookInput::default(), now);

        assert_eq!(
            merged,
            Book {
                updated_at: now,
                ..existing()
            }
        );
    }

    #[test]
    fn blank_strings_preserve_existing_values() {
        let patch = BookInput {
            isbn: Some("".to_string()),
            title: Some("   ".to_string()),
            language: Some("\n".to_string()),
            ..BookInput::default()
        };
        let merged = existing().merge(patch, Utc::now());
        assert_eq!(merged.isbn, "111");
        assert_eq!(merged.title, "Old Title");
        assert_eq!(merged.language, "en");
    }

    #[test]
    fn empty_categories_preserve_existing_categories() {
        let patch = BookInput {
            categories: Some(vec![]),
            ..BookInput::default()
        };
        let merged = existing().merge(patch, Utc::now());
        assert_eq!(merged.categories, vec!["fiction".to_string()]);
    }

    #[test]
    fn author_overwrites_even_when_blank() {
        let patch = BookInput {
            author: Some(AuthorInfo::default()),
            ..BookInput::default()
        };
        let merged = existing().merge(patch, Utc::now());
        assert_eq!(merged.author, AuthorInfo::default());
    }

    #[test]
    fn present_values_overwrite() {
        let patch = BookInput {
            title: Some("New Title".to_string()),
            categories: Some(vec!["history".to_string(), "war".to_string()]),
            publication_year: Some(2001),
            pages: Some(1),
            available: Some(true),
            review_count: Some(0),
            description: Some(String::new()),
            ..BookInput::default()
        };
        let merged = existing().merge(patch, Utc::now());
        assert_eq!(merged.title, "New Title");
        assert_eq!(merged.categories.len(), 2);
        assert_eq!(merged.publication_year, 2001);
        assert_eq!(merged.pages, Some(1));
        assert!(merged.available);
        assert_eq!(merged.review_count, 0);
        // Optional strings coalesce without a blank check.
        assert_eq!(merged.description, Some(String::new()));
        // Untouched optionals survive.
        assert_eq!(merged.publisher, Some("Pub".to_string()));
        assert_eq!(merged.rating, Some(3.5));
    }

    #[test]
    fn identity_and_creation_time_are_immutable() {
        let now = created_at() + Duration::days(3);
        let merged = existing().merge(BookInput::default(), now);
        assert_eq!(merged.id, "book-500");
        assert_eq!(merged.created_at, created_at());
        assert_eq!(merged.updated_at, now);
    }

    #[test]
    fn full_update_is_idempotent_apart_from_updated_at() {
        let patch = BookInput {
            isbn: Some("222".to_string()),
            title: Some("T2".to_string()),
            author: Some(AuthorInfo {
                id: "a2".to_string(),
                name: "Bo".to_string(),
            }),
            categories: Some(vec!["poetry".to_string()]),
            publication_year: Some(2010),
            language: Some("fr".to_string()),
            pages: Some(80),
            publisher: Some("P2".to_string()),
            description: Some("d2".to_string()),
            cover_image: Some("https://img.example/2.png".to_string()),
            available: Some(true),
            rating: Some(4.0),
            review_count: Some(9),
            price: Some(PriceInfo {
                amount: Some(5.0),
                currency: Some("EUR".to_string()),
            }),
        };
        let first_at = created_at() + Duration::minutes(1);
        let second_at = created_at() + Duration::minutes(2);

        let once = existing().merge(patch.clone(), first_at);
        let twice = once.clone().merge(patch, second_at);

        assert_eq!(twice.updated_at, second_at);
        assert_eq!(
            Book {
                updated_at: first_at,
                ..twice
            },
            once
        );
    }
}
