use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admission ticket sale. Feeds the manager dashboard's per-date
/// average-price report.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ticket_id: i32,
    pub visitor_id: i32,
    pub date: Date,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
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
}

impl Related<super::visitor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visitor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
