use sea_orm_migration::prelude::*;

mod m20260214_000001_create_tables;
mod m20260214_000002_create_routines;
mod m20260215_000001_seed_demo_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260214_000001_create_tables::Migration),
            Box::new(m20260214_000002_create_routines::Migration),
            Box::new(m20260215_000001_seed_demo_data::Migration),
        ]
    }
}
