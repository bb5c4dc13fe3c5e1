//! Pet entity and creation payload.

use serde::{Deserialize, Serialize};

/// Pet identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PetId(pub i64);

impl PetId {
    pub fn new(value: i64) -> Self {
        PetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Identifiers are assigned from a non-negative sequence; anything below
    /// zero can never address a stored pet.
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PetId {
    fn from(value: i64) -> Self {
        PetId(value)
    }
}

impl From<PetId> for i64 {
    fn from(id: PetId) -> Self {
        id.0
    }
}

/// A stored pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Server-assigned unique identifier
    pub id: PetId,
    /// Name of the pet
    pub name: String,
    /// Optional free-form tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Payload for creating a pet. The identifier is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewPet {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl NewPet {
    pub fn new(name: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }

    /// Attach the storage-assigned identifier.
    pub fn into_pet(self, id: PetId) -> Pet {
        Pet {
            id,
            name: self.name,
            tag: self.tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_serializes_without_missing_tag() {
        let pet = Pet {
            id: PetId(3),
            name: "rex".to_string(),
            tag: None,
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "rex"}));
    }

    #[test]
    fn test_new_pet_missing_name_deserializes_empty() {
        let new_pet: NewPet = serde_json::from_str(r#"{"tag": "dog"}"#).unwrap();
        assert!(new_pet.name.is_empty());
        assert_eq!(new_pet.tag.as_deref(), Some("dog"));
    }

    #[test]
    fn test_pet_id_validity() {
        assert!(PetId::new(0).is_valid());
        assert!(PetId::new(42).is_valid());
        assert!(!PetId::new(-1).is_valid());
    }
}
