use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde_json::json;
use tower_sessions::Session;

use crate::api::{
    flash,
    policy::{self, Route},
};
use crate::entities::{animal, employee, Animal, Employee};
use crate::metrics;
use crate::storage::{self, DbViolation};
use crate::views::Views;

/// GET /veterinary - checkup records joined with animal and vet names,
/// newest first.
pub async fn list(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::Veterinary).await {
        return resp;
    }

    let records = match storage::vet_records(&db).await {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(&session, format!("Error fetching veterinary records: {}", e)).await;
            Vec::new()
        }
    };

    views
        .page(
            "veterinary",
            &json!({
                "records": records,
                "flashes": flash::take(&session).await,
            }),
        )
        .into_response()
}

/// GET /add_vet_record
pub async fn add_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::AddVetRecord).await {
        return resp;
    }
    render_form(&db, &views, &session).await
}

#[derive(serde::Deserialize)]
pub struct AddVetRecordForm {
    #[serde(default)]
    record_id: String,
    #[serde(default)]
    animal_id: String,
    #[serde(default)]
    vet_id: String,
    #[serde(default)]
    checkup_date: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    notes: String,
}

fn validate(form: &AddVetRecordForm) -> Result<i32, String> {
    if form.record_id.is_empty()
        || form.animal_id.is_empty()
        || form.vet_id.is_empty()
        || form.checkup_date.is_empty()
        || form.status.is_empty()
    {
        return Err(
            "Error: Record ID, Animal, Vet, Date, and Status are required fields.".to_string(),
        );
    }

    let Ok(record_id) = form.record_id.trim().parse::<i32>() else {
        return Err("Error: Record ID must be a valid number.".to_string());
    };
    if record_id <= 0 {
        return Err("Error: Record ID must be a positive number.".to_string());
    }

    Ok(record_id)
}

/// POST /add_vet_record - direct INSERT; a duplicate record id surfaces as
/// a unique violation and keeps the user on the form.
pub async fn add(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
    Form(form): Form<AddVetRecordForm>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::AddVetRecord).await {
        return resp;
    }

    let record_id = match validate(&form) {
        Ok(record_id) => record_id,
        Err(message) => {
            flash::danger(&session, message).await;
            return render_form(&db, &views, &session).await;
        }
    };

    match storage::insert_vet_record(
        &db,
        record_id,
        form.animal_id,
        form.vet_id,
        form.checkup_date,
        form.status,
        form.notes,
    )
    .await
    {
        Ok(()) => {
            metrics::record_vet_record_created();
            flash::success(&session, "New veterinary record added successfully!").await;
            Redirect::to("/veterinary").into_response()
        }
        Err(e) => {
            match storage::classify_violation(&e) {
                DbViolation::Unique => {
                    flash::danger(&session, "Error: A record with this ID already exists.").await;
                }
                _ => {
                    flash::danger(&session, format!("Database Error: {}", e)).await;
                }
            }
            render_form(&db, &views, &session).await
        }
    }
}

async fn render_form(db: &DatabaseConnection, views: &Views, session: &Session) -> Response {
    let fetch = async {
        let animals = Animal::find()
            .order_by_asc(animal::Column::Name)
            .all(db)
            .await?;
        let vets = Employee::find()
            .filter(employee::Column::Role.eq("Veterinarian"))
            .order_by_asc(employee::Column::Name)
            .all(db)
            .await?;
        Ok::<_, DbErr>((animals, vets))
    }
    .await;

    let (animals, vets) = match fetch {
        Ok((animals, vets)) => (animals, vets),
        Err(e) => {
            flash::danger(session, format!("Error fetching data for form: {}", e)).await;
            (Vec::new(), Vec::new())
        }
    };

    let animals: Vec<_> = animals
        .iter()
        .map(|a| json!({"animal_id": a.animal_id, "name": a.name, "species": a.species}))
        .collect();
    let vets: Vec<_> = vets
        .iter()
        .map(|v| json!({"employee_id": v.employee_id, "name": v.name}))
        .collect();

    views
        .page(
            "add_vet_record",
            &json!({
                "animals": animals,
                "vets": vets,
                "flashes": flash::take(session).await,
            }),
        )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(record_id: &str, animal_id: &str, vet_id: &str, date: &str, status: &str) -> AddVetRecordForm {
        AddVetRecordForm {
            record_id: record_id.to_string(),
            animal_id: animal_id.to_string(),
            vet_id: vet_id.to_string(),
            checkup_date: date.to_string(),
            status: status.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_form_without_notes() {
        assert_eq!(validate(&form("1001", "101", "3", "2026-02-01", "Healthy")), Ok(1001));
    }

    #[test]
    fn rejects_missing_required_fields() {
        let err = validate(&form("1001", "101", "3", "", "Healthy")).unwrap_err();
        assert_eq!(
            err,
            "Error: Record ID, Animal, Vet, Date, and Status are required fields."
        );
    }

    #[test]
    fn rejects_non_positive_record_id() {
        let err = validate(&form("0", "101", "3", "2026-02-01", "Healthy")).unwrap_err();
        assert_eq!(err, "Error: Record ID must be a positive number.");
    }

    #[test]
    fn rejects_non_numeric_record_id() {
        let err = validate(&form("abc", "101", "3", "2026-02-01", "Healthy")).unwrap_err();
        assert_eq!(err, "Error: Record ID must be a valid number.");
    }
}
