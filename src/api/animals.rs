use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::json;
use tower_sessions::Session;

use crate::api::{
    flash,
    policy::{self, Route},
};
use crate::entities::Habitat;
use crate::metrics;
use crate::storage::{self, DbViolation};
use crate::views::Views;

/// GET /animals - every animal joined with its habitat, ordered by name.
pub async fn list(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::Animals).await {
        return resp;
    }

    let animals = match storage::animals_with_habitats(&db).await {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(&session, format!("Error fetching animals: {}", e)).await;
            Vec::new()
        }
    };

    views
        .page(
            "animals",
            &json!({
                "animals": animals,
                "flashes": flash::take(&session).await,
            }),
        )
        .into_response()
}

/// GET /add_animal
pub async fn add_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::AddAnimal).await {
        return resp;
    }
    render_form(&db, &views, &session).await
}

#[derive(serde::Deserialize)]
pub struct AddAnimalForm {
    #[serde(default)]
    animal_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    species: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    habitat_id: String,
}

#[derive(Debug)]
struct NewAnimal {
    animal_id: i32,
    name: String,
    species: String,
    gender: String,
    age: i32,
    habitat_id: i32,
}

// Gender is deliberately not required; every other field is.
fn validate(form: &AddAnimalForm) -> Result<NewAnimal, String> {
    if form.name.is_empty()
        || form.species.is_empty()
        || form.animal_id.is_empty()
        || form.age.is_empty()
        || form.habitat_id.is_empty()
    {
        return Err("Error: All fields are required.".to_string());
    }

    let (Ok(age), Ok(animal_id), Ok(habitat_id)) = (
        form.age.trim().parse::<i32>(),
        form.animal_id.trim().parse::<i32>(),
        form.habitat_id.trim().parse::<i32>(),
    ) else {
        return Err("Error: Age and Animal ID must be valid numbers.".to_string());
    };

    if age < 0 {
        return Err("Error: Age must be a positive number.".to_string());
    }
    if animal_id <= 0 {
        return Err("Error: Animal ID must be a positive number.".to_string());
    }

    Ok(NewAnimal {
        animal_id,
        name: form.name.clone(),
        species: form.species.clone(),
        gender: form.gender.clone(),
        age,
        habitat_id,
    })
}

/// POST /add_animal - validated in the handler, then handed to
/// `sp_AddNewAnimal`, which owns the capacity check. The routine's
/// `message` field is the success signal: any message containing "Error"
/// means nothing was inserted.
pub async fn add(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
    Form(form): Form<AddAnimalForm>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::AddAnimal).await {
        return resp;
    }

    let new_animal = match validate(&form) {
        Ok(new_animal) => new_animal,
        Err(message) => {
            flash::danger(&session, message).await;
            return render_form(&db, &views, &session).await;
        }
    };

    match storage::add_animal_via_routine(
        &db,
        new_animal.animal_id,
        new_animal.name,
        new_animal.species,
        new_animal.gender,
        new_animal.age,
        new_animal.habitat_id,
    )
    .await
    {
        Ok(message) if message.contains("Error") => {
            flash::danger(&session, message).await;
            render_form(&db, &views, &session).await
        }
        Ok(message) => {
            metrics::record_animal_created();
            flash::success(&session, message).await;
            Redirect::to("/animals").into_response()
        }
        Err(e) => {
            flash::danger(&session, format!("Database Error: {}", e)).await;
            render_form(&db, &views, &session).await
        }
    }
}

#[derive(serde::Deserialize)]
pub struct DeleteAnimalForm {
    #[serde(default)]
    animal_id: String,
}

/// POST /delete_animal - direct DELETE by primary key. A foreign-key
/// violation means the animal has recorded visits and stays.
pub async fn delete(
    Extension(db): Extension<DatabaseConnection>,
    session: Session,
    Form(form): Form<DeleteAnimalForm>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::DeleteAnimal).await {
        return resp;
    }

    let animal_id = match form.animal_id.trim().parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            flash::danger(&session, "Error: Animal ID must be a valid number.").await;
            return Redirect::to("/animals").into_response();
        }
    };

    match crate::entities::Animal::delete_by_id(animal_id).exec(&db).await {
        Ok(_) => {
            metrics::record_animal_deleted();
            flash::success(&session, "Animal deleted successfully.").await;
        }
        Err(e) => match storage::classify_violation(&e) {
            DbViolation::ForeignKey => {
                flash::danger(
                    &session,
                    "Error: Cannot delete animal. It is referenced by other records (e.g., visits).",
                )
                .await;
            }
            _ => {
                flash::danger(&session, format!("Database Error: {}", e)).await;
            }
        },
    }

    Redirect::to("/animals").into_response()
}

async fn render_form(db: &DatabaseConnection, views: &Views, session: &Session) -> Response {
    let habitats = match Habitat::find().all(db).await {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(session, format!("Error fetching habitats: {}", e)).await;
            Vec::new()
        }
    };

    let habitats: Vec<_> = habitats
        .iter()
        .map(|h| {
            json!({
                "habitat_id": h.habitat_id,
                "name": h.name,
                "habitat_type": h.habitat_type,
            })
        })
        .collect();

    views
        .page(
            "add_animal",
            &json!({
                "habitats": habitats,
                "flashes": flash::take(session).await,
            }),
        )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(animal_id: &str, name: &str, species: &str, age: &str, habitat_id: &str) -> AddAnimalForm {
        AddAnimalForm {
            animal_id: animal_id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            gender: String::new(),
            age: age.to_string(),
            habitat_id: habitat_id.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_form_without_gender() {
        let parsed = validate(&form("101", "Zuri", "Lion", "6", "1")).unwrap();
        assert_eq!(parsed.animal_id, 101);
        assert_eq!(parsed.age, 6);
        assert_eq!(parsed.gender, "");
    }

    #[test]
    fn rejects_missing_fields() {
        let err = validate(&form("101", "", "Lion", "6", "1")).unwrap_err();
        assert_eq!(err, "Error: All fields are required.");
    }

    #[test]
    fn rejects_negative_age_before_any_database_write() {
        let err = validate(&form("101", "Zuri", "Lion", "-1", "1")).unwrap_err();
        assert_eq!(err, "Error: Age must be a positive number.");
    }

    #[test]
    fn age_zero_is_allowed() {
        assert!(validate(&form("101", "Cub", "Lion", "0", "1")).is_ok());
    }

    #[test]
    fn rejects_non_positive_animal_id() {
        let err = validate(&form("0", "Zuri", "Lion", "6", "1")).unwrap_err();
        assert_eq!(err, "Error: Animal ID must be a positive number.");
    }

    #[test]
    fn rejects_non_numeric_age_or_id() {
        let err = validate(&form("abc", "Zuri", "Lion", "6", "1")).unwrap_err();
        assert_eq!(err, "Error: Age and Animal ID must be valid numbers.");

        let err = validate(&form("101", "Zuri", "Lion", "six", "1")).unwrap_err();
        assert_eq!(err, "Error: Age and Animal ID must be valid numbers.");
    }
}
