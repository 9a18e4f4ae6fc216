use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A zoo employee. `password` is stored and compared as plaintext to keep
/// behavioral parity with the legacy system it replaces.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub employee_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::veterinary_status::Entity")]
    VeterinaryStatus,
}

impl Related<super::veterinary_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VeterinaryStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
