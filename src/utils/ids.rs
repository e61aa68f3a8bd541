//! Identifier strategies for newly created entities.
//!
//! Books get short `book-<n>` ids, pets get UUIDs. Both formats are visible
//! to clients.

use std::ops::Range;

use rand::Rng;
use uuid::Uuid;

/// Prefix of every book identifier.
pub const BOOK_ID_PREFIX: &str = "book-";

/// Range of the numeric book id suffix.
///
/// Only 999,900 values exist, so collisions are possible. They are not
/// retried: the store rejects the duplicate insert.
pub const BOOK_ID_RANGE: Range<u32> = 100..1_000_000;

/// New `book-<n>` identifier from the thread-local generator.
pub fn new_book_id() -> String {
    book_id_from(&mut rand::rng())
}

/// New `book-<n>` identifier drawn uniformly from [`BOOK_ID_RANGE`].
pub fn book_id_from<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{BOOK_ID_PREFIX}{}", rng.random_range(BOOK_ID_RANGE))
}

/// New random (v4) UUID in hyphenated lowercase form.
pub fn new_pet_id() -> String {
    Uuid::new_v4().to_string()
}
