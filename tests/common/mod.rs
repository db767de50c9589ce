use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use staybook::router::init_router;
use staybook::state::AppState;
use staybook_auth::create_access_token;
use staybook_config::{CorsConfig, JwtConfig};
use staybook_core::hash_password;
use staybook_models::{RoomId, UserId};

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::from_list("http://localhost:3000"),
    ))
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_room(pool: &PgPool, name: &str, price_per_night: i64) -> RoomId {
    sqlx::query_scalar::<_, RoomId>(
        "INSERT INTO rooms (name, price_per_night) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(price_per_night)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Mints a token directly, skipping the login round trip.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id.into_inner(), &user.email, &test_jwt_config()).unwrap()
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

/// A complete flat booking request for `room_id`.
#[allow(dead_code)]
pub fn booking_request(room_id: RoomId, check_in: &str, check_out: &str) -> Value {
    json!({
        "room_id": room_id,
        "check_in_date": check_in,
        "check_out_date": check_out,
        "guest_name": "Ada",
        "guest_surname": "Lovelace",
        "guest_phone": "+44 20 7946 0000",
        "passport_series": "AB",
        "passport_number": "123456",
        "passport_issued_by": "HM Passport Office",
        "passport_issue_date": "2015-03-20"
    })
}
