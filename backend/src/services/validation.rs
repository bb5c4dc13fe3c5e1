//! Input validation shared by the service layer and the HTTP boundary.
//!
//! Every check runs before storage is touched and fails with
//! [`PetStoreError::BadRequest`].

use crate::api::{NewPet, PetId, PetStoreError, PetStoreResult, QueryCondition};

/// Reject negative identifiers.
pub fn validate_pet_id(id: PetId) -> PetStoreResult<()> {
    if id.is_valid() {
        Ok(())
    } else {
        Err(PetStoreError::BadRequest)
    }
}

/// Reject a pet without a name.
pub fn validate_new_pet(pet: &NewPet) -> PetStoreResult<()> {
    if pet.name.is_empty() {
        return Err(PetStoreError::BadRequest);
    }
    Ok(())
}

/// Reject a negative limit.
pub fn validate_condition(condition: &QueryCondition) -> PetStoreResult<()> {
    match condition.limit {
        Some(limit) if limit < 0 => Err(PetStoreError::BadRequest),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pet_id() {
        assert!(validate_pet_id(PetId(0)).is_ok());
        assert_eq!(validate_pet_id(PetId(-1)), Err(PetStoreError::BadRequest));
        assert_eq!(
            validate_pet_id(PetId(i64::MIN)),
            Err(PetStoreError::BadRequest)
        );
    }

    #[test]
    fn test_validate_new_pet() {
        assert!(validate_new_pet(&NewPet::new("rex", None)).is_ok());
        assert_eq!(
            validate_new_pet(&NewPet::new("", Some("dog".to_string()))),
            Err(PetStoreError::BadRequest)
        );
    }

    #[test]
    fn test_validate_condition() {
        assert!(validate_condition(&QueryCondition::new()).is_ok());
        assert!(validate_condition(&QueryCondition::new().with_limit(0)).is_ok());
        assert_eq!(
            validate_condition(&QueryCondition::new().with_limit(-1)),
            Err(PetStoreError::BadRequest)
        );
    }
}
