pub mod animals;
pub mod auth;
pub mod dashboard;
pub mod flash;
pub mod habitats;
pub mod policy;
pub mod veterinary;
pub mod visitors;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::views::Views;

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the full route table. The session layer keeps `{loggedin, id,
/// username, role}` server-side behind an opaque cookie token; the store
/// backend is swappable at this seam.
pub fn router(db: DatabaseConnection) -> Router {
    let ttl_minutes = std::env::var("ZOOPORTAL_SESSION_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(60);

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(ttl_minutes)));

    Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/animals", get(animals::list))
        .route("/add_animal", get(animals::add_form).post(animals::add))
        .route("/delete_animal", post(animals::delete))
        .route("/habitats", get(habitats::list))
        .route("/delete_habitat", post(habitats::delete))
        .route("/visitors", get(visitors::list))
        .route("/visitors/unvisited", get(visitors::unvisited))
        .route(
            "/edit_visitor/:visitor_id",
            get(visitors::edit_form).post(visitors::edit),
        )
        .route("/veterinary", get(veterinary::list))
        .route("/add_vet_record", get(veterinary::add_form).post(veterinary::add))
        .route("/health", get(health_check))
        .layer(Extension(db))
        .layer(Extension(Views::new()))
        .layer(session_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let route = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str().to_owned())
                        .unwrap_or_else(|| request.uri().path().to_owned());

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        route = %route,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
}
