//! Router-level tests: authentication and authorization behavior over a
//! mocked database. Handlers guard before touching the database, so only
//! the login queries need mock result sets.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, MockDatabase};
use tower::util::ServiceExt;

use zooportal_server::api::router;
use zooportal_server::entities::employee;

fn zookeeper() -> employee::Model {
    employee::Model {
        employee_id: 2,
        name: "Tom Briggs".to_string(),
        username: "tom".to_string(),
        password: "keeper123".to_string(),
        role: "Zookeeper".to_string(),
    }
}

fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

async fn body_text(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Logs in against a router whose mock database returns a matching
/// employee row, and hands back the session cookie.
async fn login(app: &axum::Router, body: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_form("/login", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = router(db);

    for path in [
        "/dashboard",
        "/animals",
        "/add_animal",
        "/habitats",
        "/visitors",
        "/visitors/unvisited",
        "/edit_visitor/1",
        "/veterinary",
        "/add_vet_record",
    ] {
        let response = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/login", "{}", path);
    }
}

#[tokio::test]
async fn home_renders_login_when_signed_out() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = router(db);

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let markup = body_text(response).await;
    assert!(markup.contains("form"));
    assert!(markup.contains("/login"));
}

#[tokio::test]
async fn failed_login_rerenders_with_error_and_no_session() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<employee::Model>::new()])
        .into_connection();
    let app = router(db);

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=tom&password=wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let markup = body_text(response).await;
    assert!(markup.contains("Incorrect username or password!"));

    // Still signed out.
    let response = app.clone().oneshot(get("/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_establishes_session_and_home_redirects_to_dashboard() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![zookeeper()]])
        .into_connection();
    let app = router(db);

    let cookie = login(&app, "username=tom&password=keeper123").await;

    let response = app
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = app
        .clone()
        .oneshot(get("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let markup = body_text(response).await;
    assert!(markup.contains("Zookeeper Dashboard"));
    assert!(markup.contains("tom"));
}

#[tokio::test]
async fn wrong_role_is_flashed_and_redirected_to_dashboard() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![zookeeper()]])
        .into_connection();
    let app = router(db);

    let cookie = login(&app, "username=tom&password=keeper123").await;

    // Habitats is manager-only; a zookeeper bounces without any DB access.
    for path in ["/habitats", "/visitors", "/visitors/unvisited", "/edit_visitor/1"] {
        let response = app
            .clone()
            .oneshot(get(path, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/dashboard", "{}", path);
    }

    // The denial shows up as a danger flash on the next rendered page,
    // then is gone.
    let response = app
        .clone()
        .oneshot(get("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    let markup = body_text(response).await;
    assert!(markup.contains("You do not have permission to access this page."));

    let response = app
        .clone()
        .oneshot(get("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    let markup = body_text(response).await;
    assert!(!markup.contains("You do not have permission to access this page."));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![zookeeper()]])
        .into_connection();
    let app = router(db);

    let cookie = login(&app, "username=tom&password=keeper123").await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .clone()
        .oneshot(get("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
