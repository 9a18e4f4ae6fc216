use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde_json::json;
use tower_sessions::Session;

use crate::api::{
    flash,
    policy::{self, Route},
};
use crate::entities::{visitor, Visitor};
use crate::storage;
use crate::views::Views;

/// GET /visitors - all visitors ordered by last name, then first name.
pub async fn list(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::Visitors).await {
        return resp;
    }

    let visitors = match Visitor::find()
        .order_by_asc(visitor::Column::LName)
        .order_by_asc(visitor::Column::FName)
        .all(&db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(&session, format!("Error fetching visitors: {}", e)).await;
            Vec::new()
        }
    };

    views
        .page(
            "visitors",
            &json!({
                "visitors": visitors,
                "flashes": flash::take(&session).await,
            }),
        )
        .into_response()
}

/// GET /visitors/unvisited - visitors that appear in no visits row.
pub async fn unvisited(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::VisitorsUnvisited).await {
        return resp;
    }

    let visitors = match storage::unvisited_visitors(&db).await {
        Ok(rows) => rows,
        Err(e) => {
            flash::danger(&session, format!("Error running report: {}", e)).await;
            Vec::new()
        }
    };

    views
        .page(
            "visitors_unvisited",
            &json!({
                "visitors": visitors,
                "flashes": flash::take(&session).await,
            }),
        )
        .into_response()
}

/// GET /edit_visitor/:visitor_id - pre-filled edit form.
pub async fn edit_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
    Path(visitor_id): Path<i32>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::EditVisitor).await {
        return resp;
    }

    match Visitor::find_by_id(visitor_id).one(&db).await {
        Ok(Some(row)) => render_edit(&views, &session, &row).await,
        Ok(None) => {
            flash::danger(&session, "Visitor not found.").await;
            Redirect::to("/visitors").into_response()
        }
        Err(e) => {
            flash::danger(&session, format!("Error fetching visitor: {}", e)).await;
            Redirect::to("/visitors").into_response()
        }
    }
}

#[derive(serde::Deserialize)]
pub struct EditVisitorForm {
    #[serde(default)]
    f_name: String,
    #[serde(default)]
    l_name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    phone_no: String,
}

#[derive(Debug)]
struct VisitorUpdate {
    f_name: String,
    l_name: String,
    age: i32,
    phone_no: String,
}

fn validate(form: &EditVisitorForm) -> Result<VisitorUpdate, String> {
    if form.f_name.is_empty() || form.l_name.is_empty() || form.phone_no.is_empty() {
        return Err("Error: Name and Phone Number fields cannot be empty.".to_string());
    }

    let Ok(age) = form.age.trim().parse::<i32>() else {
        return Err("Error: Age must be a valid number.".to_string());
    };
    if age <= 0 {
        return Err("Error: Age must be a positive number.".to_string());
    }

    Ok(VisitorUpdate {
        f_name: form.f_name.clone(),
        l_name: form.l_name.clone(),
        age,
        phone_no: form.phone_no.clone(),
    })
}

/// POST /edit_visitor/:visitor_id - validated, then a direct UPDATE by
/// primary key.
pub async fn edit(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
    Path(visitor_id): Path<i32>,
    Form(form): Form<EditVisitorForm>,
) -> Response {
    if let Err(resp) = policy::require(&session, Route::EditVisitor).await {
        return resp;
    }

    let update = match validate(&form) {
        Ok(update) => update,
        Err(message) => {
            flash::danger(&session, message).await;
            // Re-fetch so the form shows what is actually stored.
            return match Visitor::find_by_id(visitor_id).one(&db).await {
                Ok(Some(row)) => render_edit(&views, &session, &row).await,
                _ => {
                    flash::danger(&session, "Visitor not found.").await;
                    Redirect::to("/visitors").into_response()
                }
            };
        }
    };

    match storage::update_visitor(
        &db,
        visitor_id,
        update.f_name,
        update.l_name,
        update.age,
        update.phone_no,
    )
    .await
    {
        Ok(()) => flash::success(&session, "Visitor updated successfully.").await,
        Err(e) => flash::danger(&session, format!("Error updating visitor: {}", e)).await,
    }

    Redirect::to("/visitors").into_response()
}

async fn render_edit(views: &Views, session: &Session, row: &visitor::Model) -> Response {
    views
        .page(
            "edit_visitor",
            &json!({
                "visitor": row,
                "flashes": flash::take(session).await,
            }),
        )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(f_name: &str, l_name: &str, age: &str, phone_no: &str) -> EditVisitorForm {
        EditVisitorForm {
            f_name: f_name.to_string(),
            l_name: l_name.to_string(),
            age: age.to_string(),
            phone_no: phone_no.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        let update = validate(&form("Ada", "Nwosu", "29", "555-0101")).unwrap();
        assert_eq!(update.age, 29);
    }

    #[test]
    fn rejects_empty_name_or_phone() {
        let err = validate(&form("", "Nwosu", "29", "555-0101")).unwrap_err();
        assert_eq!(err, "Error: Name and Phone Number fields cannot be empty.");

        let err = validate(&form("Ada", "Nwosu", "29", "")).unwrap_err();
        assert_eq!(err, "Error: Name and Phone Number fields cannot be empty.");
    }

    #[test]
    fn rejects_zero_or_negative_age() {
        let err = validate(&form("Ada", "Nwosu", "0", "555-0101")).unwrap_err();
        assert_eq!(err, "Error: Age must be a positive number.");
    }

    #[test]
    fn rejects_non_numeric_age() {
        let err = validate(&form("Ada", "Nwosu", "old", "555-0101")).unwrap_err();
        assert_eq!(err, "Error: Age must be a valid number.");
    }
}
