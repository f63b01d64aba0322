//! Integration tests for the HTTP query gateway.
//!
//! Requests are driven through the assembled router with `tower::oneshot`
//! against a SQLite-backed ledger.

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use stride::adapters::http::{app, GoalsState};
use stride::adapters::sqlite::SqliteGoalStore;
use stride::application::GoalLedger;
use stride::config::ServerConfig;
use stride::domain::clock::PeriodClock;
use stride::domain::foundation::UserId;
use stride::domain::goal::Declaration;

async fn test_app() -> (axum::Router, Arc<GoalLedger>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let store = Arc::new(SqliteGoalStore::new(pool));
    let ledger = Arc::new(GoalLedger::new(store, PeriodClock::default()));
    let router = app(GoalsState::new(ledger.clone()), &ServerConfig::default());

    (router, ledger)
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // Rejections (e.g. a bad query string) carry plain-text bodies.
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

#[tokio::test]
async fn returns_goals_with_progress_for_user() {
    let (router, ledger) = test_app().await;

    ledger
        .ensure_user(UserId::new(42), Some("sam"))
        .await
        .unwrap();
    ledger
        .replace_goals(
            UserId::new(42),
            vec![
                Declaration::new(2, "Gym").unwrap(),
                Declaration::new(1, "Read").unwrap(),
            ],
        )
        .await
        .unwrap();

    let (status, json) = get(router, "/goals?user_id=42").await;

    assert_eq!(status, StatusCode::OK);
    let goals = json.as_array().unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0]["name"], "Gym");
    assert_eq!(goals[0]["frequency_aimed"], 2);
    assert_eq!(goals[0]["frequency_done"], 0);
    assert_eq!(goals[1]["name"], "Read");
}

#[tokio::test]
async fn unknown_user_gets_an_empty_array() {
    let (router, _ledger) = test_app().await;

    let (status, json) = get(router, "/goals?user_id=999").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn missing_user_id_is_a_bad_request() {
    let (router, _ledger) = test_app().await;

    let (status, _json) = get(router, "/goals").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_user_id_is_a_bad_request() {
    let (router, _ledger) = test_app().await;

    let (status, _json) = get(router, "/goals?user_id=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (router, _ledger) = test_app().await;

    let (status, _json) = get(router, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
