//! Creation-time gate for pet payloads.
//!
//! Only the payload and the name are checked. Species is accepted even when
//! absent.

use thiserror::Error;

use super::models::{NewPet, PetInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PetRejection {
    /// Payload missing or name empty; both report the same text.
    #[error("Invalid pet data")]
    InvalidPayload,
}

/// Check a creation payload. A whitespace-only name passes; only the empty
/// string is rejected.
pub fn validate(input: Option<PetInput>) -> Result<NewPet, PetRejection> {
    let input = input.ok_or(PetRejection::InvalidPayload)?;
    let name = input
        .name
        .filter(|name| !name.is_empty())
        .ok_or(PetRejection::InvalidPayload)?;

    Ok(NewPet {
        name,
        species: input.species,
        breed: input.breed,
        age: input.age,
        color: input.color,
        weight: input.weight,
        status: input.status,
    })
}
