use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Checkup record linking an animal to the employee who examined it.
/// `record_id` is caller-supplied; inserting a duplicate fails with a
/// unique violation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "veterinary_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub record_id: i32,
    pub animal_id: i32,
    pub vet_id: i32,
    pub checkup_date: Date,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::AnimalId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Animal,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::VetId",
        to = "super::employee::Column::EmployeeId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
