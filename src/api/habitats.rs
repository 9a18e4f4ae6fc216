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
use crate::metrics;
use crate::storage::{self, DbViolation};
use crate::views::Views;

/// GET /habitats - habitats with their derived occupancy, ordered by name.
pub async fn list(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::Habitats).await {
        return resp;
    }

    let habitats = match storage::habitats_with_occupancy(&db).await {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(&session, format!("Error fetching habitats: {}", e)).await;
            Vec::new()
        }
    };

    views
        .page(
            "habitats",
            &json!({
                "habitats": habitats,
                "flashes": flash::take(&session).await,
            }),
        )
        .into_response()
}

#[derive(serde::Deserialize)]
pub struct DeleteHabitatForm {
    #[serde(default)]
    habitat_id: String,
}

/// POST /delete_habitat - direct DELETE by primary key. The database
/// trigger blocks the delete while animals remain assigned; its raised
/// message is what we recognize it by.
pub async fn delete(
    Extension(db): Extension<DatabaseConnection>,
    session: Session,
    Form(form): Form<DeleteHabitatForm>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::DeleteHabitat).await {
        return resp;
    }

    let habitat_id = match form.habitat_id.trim().parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            flash::danger(&session, "Error: Habitat ID must be a valid number.").await;
            return Redirect::to("/habitats").into_response();
        }
    };

    match crate::entities::Habitat::delete_by_id(habitat_id).exec(&db).await {
        Ok(_) => {
            metrics::record_habitat_deleted();
            flash::success(&session, "Habitat deleted successfully.").await;
        }
        Err(e) => match storage::classify_violation(&e) {
            DbViolation::HabitatOccupied => {
                flash::danger(
                    &session,
                    "Error: Cannot delete habitat. It still contains animals.",
                )
                .await;
            }
            _ => {
                flash::danger(&session, format!("Database Error: {}", e)).await;
            }
        },
    }

    Redirect::to("/habitats").into_response()
}
