use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `animal_id` is caller-supplied, not generated. Inserts go through the
/// `sp_AddNewAnimal` routine so the habitat-capacity check and the insert
/// happen atomically on the database side.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "animal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub animal_id: i32,
    pub name: String,
    pub species: String,
    pub gender: String,
    pub age: i32,
    pub habitat_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::habitat::Entity",
        from = "Column::HabitatId",
        to = "super::habitat::Column::HabitatId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Habitat,
    #[sea_orm(has_many = "super::visit::Entity")]
    Visit,
    #[sea_orm(has_many = "super::veterinary_status::Entity")]
    VeterinaryStatus,
}

impl Related<super::habitat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habitat.def()
    }
}

impl Related<super::visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visit.def()
    }
}

impl Related<super::veterinary_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VeterinaryStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
