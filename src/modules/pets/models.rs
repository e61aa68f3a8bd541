use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to pets created without one.
pub const DEFAULT_STATUS: &str = "available";

/// Persisted pet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// UUID, also the partition key
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// e.g. `dog`, `cat`
    pub species: Option<String>,
    pub breed: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    pub color: Option<String>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Adoption status such as `available` or `adopted`
    #[serde(default = "default_status")]
    pub status: String,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Creation and update payload; every field may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetInput {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub color: Option<String>,
    pub weight: Option<f64>,
    pub status: Option<String>,
}

/// Creation payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub color: Option<String>,
    pub weight: Option<f64>,
    pub status: Option<String>,
}

impl Pet {
    /// Build the initial state of a pet; status defaults to `available`.
    pub fn create(id: String, input: NewPet, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            species: input.species,
            breed: input.breed,
            age: input.age,
            color: input.color,
            weight: input.weight,
            status: input.status.unwrap_or_else(default_status),
            created_at: now,
            updated_at: now,
        }
    }
}
