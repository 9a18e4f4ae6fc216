use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join fact between a visitor and an animal. The foreign key on
/// `animal_id` is what blocks deleting an animal that has been visited.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub visit_id: i32,
    pub visitor_id: i32,
    pub animal_id: i32,
    pub visit_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::visitor::Entity",
        from = "Column::VisitorId",
        to = "super::visitor::Column::VisitorId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Visitor,
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::AnimalId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Animal,
}

impl Related<super::visitor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visitor.def()
    }
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
