use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::json;
use tower_sessions::Session;

use crate::api::{flash, policy::keys};
use crate::entities::employee;
use crate::metrics;
use crate::views::Views;

async fn logged_in(session: &Session) -> bool {
    session
        .get::<bool>(keys::LOGGED_IN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

async fn render_login(views: &Views, session: &Session, error: Option<String>) -> Response {
    views
        .page(
            "login",
            &json!({
                "error": error,
                "flashes": flash::take(session).await,
            }),
        )
        .into_response()
}

/// GET / - login page, or straight to the dashboard for a live session.
pub async fn home(Extension(views): Extension<Views>, session: Session) -> Response {
    if logged_in(&session).await {
        Redirect::to("/dashboard").into_response()
    } else {
        render_login(&views, &session, None).await
    }
}

/// GET /login
pub async fn login_form(Extension(views): Extension<Views>, session: Session) -> Response {
    render_login(&views, &session, None).await
}

#[derive(serde::Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// POST /login - credential check against the employee table. The
/// comparison is plaintext equality in SQL, kept bug-for-bug compatible
/// with the system this replaces.
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Views>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let account = employee::Entity::find()
        .filter(employee::Column::Username.eq(form.username.clone()))
        .filter(employee::Column::Password.eq(form.password.clone()))
        .one(&db)
        .await;

    let error = match account {
        Ok(Some(account)) => match establish(&session, &account).await {
            Ok(()) => {
                tracing::info!(
                    employee_id = account.employee_id,
                    username = %account.username,
                    role = %account.role,
                    "employee logged in"
                );
                metrics::record_login("success");
                return Redirect::to("/dashboard").into_response();
            }
            Err(e) => format!("An error occurred: {}", e),
        },
        Ok(None) => {
            metrics::record_login("failure");
            "Incorrect username or password!".to_string()
        }
        Err(e) => format!("An error occurred: {}", e),
    };

    render_login(&views, &session, Some(error)).await
}

async fn establish(
    session: &Session,
    account: &employee::Model,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LOGGED_IN, true).await?;
    session.insert(keys::USER_ID, account.employee_id).await?;
    session.insert(keys::USERNAME, account.username.clone()).await?;
    session.insert(keys::ROLE, account.role.clone()).await?;
    Ok(())
}

/// GET /logout - clears the four session keys and returns to the login page.
pub async fn logout(session: Session) -> Redirect {
    let _ = session.remove::<bool>(keys::LOGGED_IN).await;
    let _ = session.remove::<i32>(keys::USER_ID).await;
    let _ = session.remove::<String>(keys::USERNAME).await;
    let _ = session.remove::<String>(keys::ROLE).await;
    Redirect::to("/")
}
