pub mod api;
pub mod entities;
pub mod metrics;
pub mod migrator;
pub mod storage;
pub mod telemetry;
pub mod views;

pub use sea_orm;
