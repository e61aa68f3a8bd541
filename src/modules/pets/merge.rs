use chrono::{DateTime, Utc};

use super::models::{Pet, PetInput};
use crate::merge::{FieldPolicy, MergePolicy};

/// Pet updates replace breed, age, color, and weight outright: leaving one
/// out of the payload clears it.
pub const PET_MERGE_POLICY: MergePolicy = MergePolicy::new(
    "Pet",
    &[
        ("name", FieldPolicy::Coalesce),
        ("species", FieldPolicy::Coalesce),
        ("breed", FieldPolicy::Replace),
        ("age", FieldPolicy::Replace),
        ("color", FieldPolicy::Replace),
        ("weight", FieldPolicy::Replace),
        ("status", FieldPolicy::Coalesce),
    ],
);

impl Pet {
    /// Next state of this pet after applying `patch` at `now`.
    pub fn merge(self, patch: PetInput, now: DateTime<Utc>) -> Pet {
        let rule = |field: &str| PET_MERGE_POLICY.rule(field);

        Pet {
            id: self.id,
            name: rule("name").resolve_required(self.name, patch.name),
            species: rule("species").resolve(self.species, patch.species),
            breed: rule("breed").resolve(self.breed, patch.breed),
            age: rule("age").resolve(self.age, patch.age),
            color: rule("color").resolve(self.color, patch.color),
            weight: rule("weight").resolve(self.weight, patch.weight),
            status: rule("status").resolve_required(self.status, patch.status),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn existing() -> Pet {
        Pet {
            id: "5f1e9a52-4f6f-4c1e-9d0c-3b1f0f6d2a11".to_string(),
            name: "Rex".to_string(),
            species: Some("dog".to_string()),
            breed: Some("Lab".to_string()),
            age: Some(4),
            color: Some("black".to_string()),
            weight: Some(30.0),
            status: "adopted".to_string(),
            created_at: created_at(),
            updated_at: created_at(),
        }
    }

    #[test]
    fn policy_covers_every_patchable_field() {
        let patch = serde_json::to_value(PetInput::default()).unwrap();
        let mut patchable: Vec<_> = patch.as_object().unwrap().keys().cloned().collect();
        let mut listed: Vec<_> = PET_MERGE_POLICY.fields().map(str::to_string).collect();
        patchable.sort();
        listed.sort();
        assert_eq!(patchable, listed);
    }

    #[test]
    fn omitted_descriptive_fields_are_cleared() {
        let patch = PetInput {
            name: Some("Max".to_string()),
            ..PetInput::default()
        };
        let merged = existing().merge(patch, Utc::now());

        assert_eq!(merged.name, "Max");
        assert_eq!(merged.breed, None);
        assert_eq!(merged.age, None);
        assert_eq!(merged.color, None);
        assert_eq!(merged.weight, None);
    }

    #[test]
    fn name_species_and_status_survive_an_empty_patch() {
        let now = created_at() + Duration::hours(2);
        let merged = existing().merge(PetInput::default(), now);

        assert_eq!(merged.name, "Rex");
        assert_eq!(merged.species.as_deref(), Some("dog"));
        // Status is not reset to the creation default.
        assert_eq!(merged.status, "adopted");
        assert_eq!(merged.created_at, created_at());
        assert_eq!(merged.updated_at, now);
    }

    #[test]
    fn resent_fields_are_kept() {
        let patch = PetInput {
            breed: Some("Lab".to_string()),
            age: Some(5),
            color: Some("black".to_string()),
            weight: Some(31.5),
            status: Some("available".to_string()),
            ..PetInput::default()
        };
        let merged = existing().merge(patch, Utc::now());
        assert_eq!(merged.breed.as_deref(), Some("Lab"));
        assert_eq!(merged.age, Some(5));
        assert_eq!(merged.weight, Some(31.5));
        assert_eq!(merged.status, "available");
    }

    #[test]
    fn empty_name_overwrites() {
        let patch = PetInput {
            name: Some(String::new()),
            ..PetInput::default()
        };
        assert_eq!(existing().merge(patch, Utc::now()).name, "");
    }
}
