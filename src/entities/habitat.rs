use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Occupancy is never stored here; it is computed per query by counting
/// assigned animals. Deletion of an occupied habitat is blocked by a
/// database trigger.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "habitat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub habitat_id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub habitat_type: String,
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::animal::Entity")]
    Animal,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
