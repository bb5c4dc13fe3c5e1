use diesel::prelude::*;

use super::schema::pets;
use crate::api::{NewPet, Pet, PetId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PetRow {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Pet {
            id: PetId(row.id),
            name: row.name,
            tag: row.tag,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub struct NewPetRow<'a> {
    pub name: &'a str,
    pub tag: Option<&'a str>,
}

impl<'a> From<&'a NewPet> for NewPetRow<'a> {
    fn from(pet: &'a NewPet) -> Self {
        NewPetRow {
            name: &pet.name,
            tag: pet.tag.as_deref(),
        }
    }
}
