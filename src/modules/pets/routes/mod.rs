//! HTTP handlers for `/pets`.

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

use super::models::{Pet, PetInput};
use super::validation;
use crate::utils::ids;

const ENTITY: &str = "Pet";

/// Routes for the pets collection, bound to `repo`.
pub fn router(repo: Repository<Pet>) -> Router {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .with_state(repo)
}

/// GET /pets
async fn list_pets(State(repo): State<Repository<Pet>>) -> AppResult<Json<Vec<Pet>>> {
    tracing::info!("getting all pets");

    let pets = repo.list().await?;
    Ok(Json(pets))
}

/// GET /pets/{id}
async fn get_pet(
    State(repo): State<Repository<Pet>>,
    Path(id): Path<String>,
) -> AppResult<Json<Pet>> {
    tracing::info!(pet_id = %id, "getting pet");

    let pet = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    Ok(Json(pet))
}

/// POST /pets
async fn create_pet(
    State(repo): State<Repository<Pet>>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Pet>)> {
    tracing::info!("creating pet");

    let input: Option<PetInput> = serde_json::from_slice(&body)?;
    let new_pet =
        validation::validate(input).map_err(|rejection| AppError::validation(rejection.to_string()))?;

    let pet = Pet::create(ids::new_pet_id(), new_pet, Utc::now());
    let created = repo.create(&pet).await?;

    tracing::info!(pet_id = %created.id, "pet created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /pets/{id}
///
/// A `null` payload is an empty patch and clears breed, age, color, and
/// weight like any other update that omits them.
async fn update_pet(
    State(repo): State<Repository<Pet>>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Pet>> {
    tracing::info!(pet_id = %id, "updating pet");

    let existing = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;

    let patch: Option<PetInput> = serde_json::from_slice(&body)?;
    let updated = repo
        .upsert(&existing.merge(patch.unwrap_or_default(), Utc::now()))
        .await?;
    Ok(Json(updated))
}

/// DELETE /pets/{id}
async fn delete_pet(
    State(repo): State<Repository<Pet>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    tracing::info!(pet_id = %id, "deleting pet");

    if repo.get_by_id(&id).await?.is_none() || !repo.delete_by_id(&id).await? {
        return Err(AppError::not_found(ENTITY, &id));
    }

    Ok(StatusCode::NO_CONTENT)
}
