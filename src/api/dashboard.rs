use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;
use tower_sessions::Session;

use crate::api::{
    flash,
    policy::{self, Role, Route},
};
use crate::storage;
use crate::views::Views;

/// GET /dashboard - one route, branched on role. Managers get the
/// aggregate overview, zookeepers their operational page, anyone else the
/// minimal fallback.
pub async fn dashboard(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
) -> Response {
    let user = match policy::require(&session, Route::Dashboard).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match user.role {
        Role::Manager => match manager_overview(&db).await {
            Ok((animal_count, total_capacity, ticket_report)) => views
                .page(
                    "manager_dashboard",
                    &json!({
                        "username": user.username,
                        "animal_count": animal_count,
                        "total_capacity": total_capacity,
                        "ticket_report": ticket_report,
                        "flashes": flash::take(&session).await,
                    }),
                )
                .into_response(),
            Err(e) => {
                flash::danger(&session, format!("Error loading dashboard: {}", e)).await;
                render_fallback(&views, &session, &user.username).await
            }
        },
        Role::Zookeeper => views
            .page(
                "zookeeper_dashboard",
                &json!({
                    "username": user.username,
                    "flashes": flash::take(&session).await,
                }),
            )
            .into_response(),
        _ => render_fallback(&views, &session, &user.username).await,
    }
}

async fn manager_overview(
    db: &DatabaseConnection,
) -> Result<(i32, i32, Vec<storage::TicketDay>), DbErr> {
    let animal_count = storage::total_animal_count(db).await?;
    let total_capacity = storage::total_capacity(db).await?;
    let ticket_report = storage::ticket_report(db).await?;
    Ok((animal_count, total_capacity, ticket_report))
}

async fn render_fallback(views: &Views, session: &Session, username: &str) -> Response {
    views
        .page(
            "layout",
            &json!({
                "username": username,
                "flashes": flash::take(session).await,
            }),
        )
        .into_response()
}
