mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{create_test_room, send, setup_test_app};

#[sqlx::test(migrations = "./migrations")]
async fn test_list_rooms_ordered_by_name(pool: PgPool) {
    create_test_room(&pool, "Courtyard", 90).await;
    create_test_room(&pool, "Attic", 60).await;
    create_test_room(&pool, "Balcony", 120).await;

    let (status, body) = send(setup_test_app(pool), "GET", "/api/rooms", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Attic", "Balcony", "Courtyard"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_room(pool: PgPool) {
    let id = create_test_room(&pool, "Sea View", 150).await;

    let (status, body) = send(
        setup_test_app(pool),
        "GET",
        &format!("/api/rooms/{}", id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["name"], "Sea View");
    assert_eq!(body["price_per_night"], 150);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_room(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool),
        "GET",
        &format!("/api/rooms/{}", uuid::Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health(pool: PgPool) {
    let (status, body) = send(setup_test_app(pool), "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
