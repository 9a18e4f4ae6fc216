use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::{animal, habitat, veterinary_status, visitor};

/// Seeds the entity-total gauges from the database at startup. Handler
/// helpers below keep them current as rows come and go.
pub async fn init_metrics(db: &DatabaseConnection) {
    let animals = animal::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("zooportal_animals_total").set(animals as f64);

    let habitats = habitat::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("zooportal_habitats_total").set(habitats as f64);

    let visitors = visitor::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("zooportal_visitors_total").set(visitors as f64);

    let records = veterinary_status::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("zooportal_vet_records_total").set(records as f64);

    tracing::info!(
        "Initialized metrics: Animals={}, Habitats={}, Visitors={}, VetRecords={}",
        animals,
        habitats,
        visitors,
        records
    );
}

pub fn record_login(outcome: &'static str) {
    metrics::counter!("zooportal_logins_total", "outcome" => outcome).increment(1);
}

pub fn record_animal_created() {
    metrics::counter!("zooportal_animals_created_total").increment(1);
    metrics::gauge!("zooportal_animals_total").increment(1.0);
}

pub fn record_animal_deleted() {
    metrics::gauge!("zooportal_animals_total").decrement(1.0);
}

pub fn record_habitat_deleted() {
    metrics::gauge!("zooportal_habitats_total").decrement(1.0);
}

pub fn record_vet_record_created() {
    metrics::counter!("zooportal_vet_records_created_total").increment(1);
    metrics::gauge!("zooportal_vet_records_total").increment(1.0);
}
