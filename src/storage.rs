//! Raw-SQL access paths: joined/aggregate read models, stored-routine
//! calls, and classification of constraint violations. Plain single-table
//! reads and writes stay on the entity API in the handlers.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr, Statement,
};
use serde::Serialize;

/// Message text raised by the habitat delete-guard trigger. Matching on it
/// is the compatibility shim for the one violation Postgres reports as a
/// generic raised exception rather than a typed constraint error.
pub const HABITAT_OCCUPIED_TEXT: &str = "Cannot delete habitat. It still contains animals";

/// Constraint-violation kinds the handlers map to user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbViolation {
    Unique,
    ForeignKey,
    HabitatOccupied,
    Other,
}

pub fn classify_violation(err: &DbErr) -> DbViolation {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DbViolation::Unique,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DbViolation::ForeignKey,
        _ => {
            if err.to_string().contains(HABITAT_OCCUPIED_TEXT) {
                DbViolation::HabitatOccupied
            } else {
                DbViolation::Other
            }
        }
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct AnimalWithHabitat {
    pub animal_id: i32,
    pub animal_name: String,
    pub species: String,
    pub gender: String,
    pub age: i32,
    pub habitat_name: String,
    pub habitat_type: String,
}

pub async fn animals_with_habitats(
    db: &DatabaseConnection,
) -> Result<Vec<AnimalWithHabitat>, DbErr> {
    AnimalWithHabitat::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        "SELECT A.animal_id, A.name AS animal_name, A.species, A.gender, A.age, \
                H.name AS habitat_name, H.type AS habitat_type \
         FROM animal A \
         JOIN habitat H ON A.habitat_id = H.habitat_id \
         ORDER BY A.name",
    ))
    .all(db)
    .await
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct HabitatWithOccupancy {
    pub habitat_id: i32,
    pub name: String,
    pub habitat_type: String,
    pub capacity: i32,
    pub current_occupancy: i64,
}

pub async fn habitats_with_occupancy(
    db: &DatabaseConnection,
) -> Result<Vec<HabitatWithOccupancy>, DbErr> {
    HabitatWithOccupancy::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        "SELECT H.habitat_id, H.name, H.type AS habitat_type, H.capacity, \
                (SELECT COUNT(*) FROM animal A WHERE A.habitat_id = H.habitat_id) AS current_occupancy \
         FROM habitat H \
         ORDER BY H.name",
    ))
    .all(db)
    .await
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct UnvisitedVisitor {
    pub visitor_id: i32,
    pub f_name: String,
    pub l_name: String,
}

/// Visitors whose id appears in no visits row.
pub async fn unvisited_visitors(db: &DatabaseConnection) -> Result<Vec<UnvisitedVisitor>, DbErr> {
    UnvisitedVisitor::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        "SELECT visitor_id, f_name, l_name \
         FROM visitor \
         WHERE visitor_id NOT IN (SELECT DISTINCT visitor_id FROM visits)",
    ))
    .all(db)
    .await
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct VetRecordRow {
    pub record_id: i32,
    pub checkup_date: chrono::NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub animal_name: String,
    pub vet_name: String,
}

pub async fn vet_records(db: &DatabaseConnection) -> Result<Vec<VetRecordRow>, DbErr> {
    VetRecordRow::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        "SELECT V.record_id, V.checkup_date, V.status, V.notes, \
                A.name AS animal_name, E.name AS vet_name \
         FROM veterinary_status V \
         JOIN animal A ON V.animal_id = A.animal_id \
         JOIN employee E ON V.vet_id = E.employee_id \
         ORDER BY V.checkup_date DESC",
    ))
    .all(db)
    .await
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct TicketDay {
    pub date: chrono::NaiveDate,
    pub average_price: f64,
    pub tickets_sold: i64,
}

pub async fn ticket_report(db: &DatabaseConnection) -> Result<Vec<TicketDay>, DbErr> {
    TicketDay::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        "SELECT date, AVG(price) AS average_price, COUNT(ticket_id) AS tickets_sold \
         FROM ticket \
         GROUP BY date \
         ORDER BY date DESC",
    ))
    .all(db)
    .await
}

pub async fn total_animal_count(db: &DatabaseConnection) -> Result<i32, DbErr> {
    scalar_i32(db, "SELECT fn_GetTotalAnimalCount() AS value").await
}

pub async fn total_capacity(db: &DatabaseConnection) -> Result<i32, DbErr> {
    scalar_i32(db, "SELECT fn_GetTotalCapacity() AS value").await
}

async fn scalar_i32(db: &DatabaseConnection, sql: &str) -> Result<i32, DbErr> {
    let row = db
        .query_one(Statement::from_string(DbBackend::Postgres, sql))
        .await?
        .ok_or_else(|| DbErr::Custom(format!("no row from `{}`", sql)))?;
    row.try_get::<i32>("", "value")
}

#[derive(Debug, FromQueryResult)]
struct RoutineMessage {
    message: String,
}

/// Calls `sp_AddNewAnimal`. The routine enforces habitat capacity
/// server-side and reports the outcome through its `message` field; a
/// message containing "Error" means the insert was skipped.
pub async fn add_animal_via_routine(
    db: &DatabaseConnection,
    animal_id: i32,
    name: String,
    species: String,
    gender: String,
    age: i32,
    habitat_id: i32,
) -> Result<String, DbErr> {
    let row = RoutineMessage::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT message FROM sp_AddNewAnimal($1, $2, $3, $4, $5, $6)",
        [
            animal_id.into(),
            name.into(),
            species.into(),
            gender.into(),
            age.into(),
            habitat_id.into(),
        ],
    ))
    .one(db)
    .await?;

    Ok(row
        .map(|r| r.message)
        .unwrap_or_else(|| "Error: procedure returned no result.".to_string()))
}

/// Direct UPDATE by primary key. A missing row is not an error here; the
/// statement simply affects zero rows.
pub async fn update_visitor(
    db: &DatabaseConnection,
    visitor_id: i32,
    f_name: String,
    l_name: String,
    age: i32,
    phone_no: String,
) -> Result<(), DbErr> {
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "UPDATE visitor SET f_name = $1, l_name = $2, age = $3, phone_no = $4 \
         WHERE visitor_id = $5",
        [
            f_name.into(),
            l_name.into(),
            age.into(),
            phone_no.into(),
            visitor_id.into(),
        ],
    ))
    .await
    .map(|_| ())
}

/// Direct INSERT. Animal, vet and date arrive as the raw form text and are
/// cast by the database, so a malformed value surfaces as a database error
/// the same way it did when the database did the coercing for the legacy
/// forms.
pub async fn insert_vet_record(
    db: &DatabaseConnection,
    record_id: i32,
    animal_id: String,
    vet_id: String,
    checkup_date: String,
    status: String,
    notes: String,
) -> Result<(), DbErr> {
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "INSERT INTO veterinary_status (record_id, animal_id, vet_id, checkup_date, status, notes) \
         VALUES ($1, $2::integer, $3::integer, $4::date, $5, $6)",
        [
            record_id.into(),
            animal_id.into(),
            vet_id.into(),
            checkup_date.into(),
            status.into(),
            notes.into(),
        ],
    ))
    .await
    .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_text_classifies_as_habitat_occupied() {
        let err = DbErr::Custom(format!(
            "Execution Error: error returned from database: {}.",
            HABITAT_OCCUPIED_TEXT
        ));
        assert_eq!(classify_violation(&err), DbViolation::HabitatOccupied);
    }

    #[test]
    fn unrelated_errors_classify_as_other() {
        let err = DbErr::Custom("connection reset by peer".to_string());
        assert_eq!(classify_violation(&err), DbViolation::Other);
    }
}
