//! HTTP handlers for `/books`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_db::Repository;
use catalog_http::{AppError, AppResult};
use chrono::Utc;

use super::models::{Book, BookInput};
use super::validation::{self, BookRejection};
use crate::utils::ids;

const ENTITY: &str = "Book";

/// Routes for the books collection, bound to `repo`.
pub fn router(repo: Repository<Book>) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(repo)
}

/// GET /books
async fn list_books(State(repo): State<Repository<Book>>) -> AppResult<Json<Vec<Book>>> {
    tracing::info!("getting all books");

    let books = repo.list().await?;
    Ok(Json(books))
}

/// GET /books/{id}
async fn get_book(
    State(repo): State<Repository<Book>>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    tracing::info!(book_id = %id, "getting book");

    let book = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    Ok(Json(book))
}

/// POST /books
async fn create_book(
    State(repo): State<Repository<Book>>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Book>)> {
    tracing::info!("creating book");

    let input: Option<BookInput> = serde_json::from_slice(&body)?;
    let new_book = validation::validate(input).map_err(reject)?;

    let book = Book::create(ids::new_book_id(), new_book, Utc::now());
    let created = repo.create(&book).await?;

    tracing::info!(book_id = %created.id, "book created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /books/{id}
///
/// Fetch, merge, and upsert are separate store calls; concurrent updates of
/// the same book resolve as last writer wins.
async fn update_book(
    State(repo): State<Repository<Book>>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Book>> {
    tracing::info!(book_id = %id, "updating book");

    let existing = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;

    let patch: Option<BookInput> = serde_json::from_slice(&body)?;
    let patch = patch.ok_or_else(|| reject(BookRejection::MissingPayload))?;

    let updated = repo.upsert(&existing.merge(patch, Utc::now())).await?;
    Ok(Json(updated))
}

/// DELETE /books/{id}
async fn delete_book(
    State(repo): State<Repository<Book>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    tracing::info!(book_id = %id, "deleting book");

    if repo.get_by_id(&id).await?.is_none() || !repo.delete_by_id(&id).await? {
        return Err(AppError::not_found(ENTITY, &id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn reject(rejection: BookRejection) -> AppError {
    AppError::validation(rejection.to_string())
}
