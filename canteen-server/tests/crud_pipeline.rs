//! CRUD 管道集成测试
//!
//! 通过 oneshot 路由直接调用应用，不经过网络栈。
//! 每个测试使用独立的临时目录数据库。

use axum::body::Body;
use canteen_server::api::{self, OneshotRouter};
use canteen_server::auth::permissions;
use canteen_server::{Config, ServerState};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await;
    (state, tmp)
}

fn token_for(state: &ServerState, role: &str) -> String {
    let perms = permissions::get_default_permissions(role);
    state
        .jwt_service
        .generate_token("user:tester", "tester", "Tester", role, &perms)
        .expect("Failed to generate test token")
}

async fn call(
    state: &ServerState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut app = api::build_app(state);

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(state, request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn dish_crud_scenario() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    // Create
    let (status, created) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&token),
        Some(json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Tea");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("dish:"));

    // Read back
    let (status, fetched) = call(&state, "GET", &format!("/api/dishes/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["name"], "Tea");

    // List contains the new id exactly once
    let (status, ids) = call(&state, "GET", "/api/dishes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids = ids.as_array().unwrap();
    assert_eq!(ids.iter().filter(|v| v.as_str() == Some(&id)).count(), 1);

    // Update replaces fields, id unchanged
    let (status, updated) = call(
        &state,
        "PUT",
        &format!("/api/dishes/{id}"),
        Some(&token),
        Some(json!({"name": "Chai"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Chai");

    // Delete returns 200 with empty body
    let (status, body) = call(
        &state,
        "DELETE",
        &format!("/api/dishes/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    // Deleted record is gone
    let (status, _) = call(&state, "GET", &format!("/api/dishes/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_then_get_returns_equal_fields() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    let payload = json!({
        "name": "Lentil Soup",
        "description": "With bread",
        "price_cents": 450,
        "is_vegetarian": true
    });
    let (status, created) = call(&state, "POST", "/api/dishes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = call(&state, "GET", &format!("/api/dishes/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Lentil Soup");
    assert_eq!(fetched["description"], "With bread");
    assert_eq!(fetched["price_cents"], 450);
    assert_eq!(fetched["is_vegetarian"], true);
}

#[tokio::test]
async fn invalid_payload_never_reaches_service() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    // Empty name fails the validator stage
    let (status, body) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&token),
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Missing required field fails JSON deserialization, also 400
    let (status, _) = call(&state, "POST", "/api/dishes", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Negative price
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&token),
        Some(json!({"name": "Tea", "price_cents": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was persisted
    let (status, ids) = call(&state, "GET", "/api/dishes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unauthenticated_request_never_reaches_service() {
    let (state, _tmp) = test_state().await;

    let (status, _) = call(&state, "GET", "/api/dishes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        None,
        Some(json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token is also a 401
    let (status, _) = call(&state, "GET", "/api/dishes", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Store untouched
    let token = token_for(&state, "manager");
    let (_, ids) = call(&state, "GET", "/api/dishes", Some(&token), None).await;
    assert!(ids.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn forbidden_without_permission() {
    let (state, _tmp) = test_state().await;
    let reader = token_for(&state, "user");

    // Read allowed for plain users
    let (status, _) = call(&state, "GET", "/api/dishes", Some(&reader), None).await;
    assert_eq!(status, StatusCode::OK);

    // Write forbidden
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&reader),
        Some(json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // User management requires users:manage
    let (status, _) = call(&state, "GET", "/api/users", Some(&reader), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let manager = token_for(&state, "manager");
    let (status, _) = call(&state, "GET", "/api/users", Some(&manager), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Store untouched
    let (_, ids) = call(&state, "GET", "/api/dishes", Some(&manager), None).await;
    assert!(ids.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_precedes_authorization() {
    let (state, _tmp) = test_state().await;

    // Malformed payload without any token fails the validator stage,
    // not the authorizer stage
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        None,
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same with a token that lacks the manage permission
    let reader = token_for(&state, "user");
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&reader),
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed id without a token is also a validator failure
    let (status, _) = call(&state, "GET", "/api/dishes/user:abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // With valid input the authorizer stage answers as usual
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        None,
        Some(json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&reader),
        Some(json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_id_yields_404() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    let (status, _) = call(
        &state,
        "GET",
        "/api/dishes/dish:doesnotexist",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &state,
        "PUT",
        "/api/dishes/dish:doesnotexist",
        Some(&token),
        Some(json!({"name": "Chai"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &state,
        "DELETE",
        "/api/dishes/dish:doesnotexist",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mismatched_id_prefix_is_rejected() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    // A user id is not a valid dish id
    let (status, _) = call(&state, "GET", "/api/dishes/user:abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn time_table_crud_and_validation() {
    let (state, _tmp) = test_state().await;
    let token = token_for(&state, "manager");

    let (status, created) = call(
        &state,
        "POST",
        "/api/time-tables",
        Some(&token),
        Some(json!({
            "name": "Week A",
            "entries": [{"weekday": 0, "dish_ids": ["dish:tea"]}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("time_table:"));

    // Merge update: replace entries only
    let (status, updated) = call(
        &state,
        "PUT",
        &format!("/api/time-tables/{id}"),
        Some(&token),
        Some(json!({"entries": [{"weekday": 4, "dish_ids": []}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Week A");
    assert_eq!(updated["entries"][0]["weekday"], 4);

    // Invalid weekday is caught by the validator stage
    let (status, _) = call(
        &state,
        "POST",
        "/api/time-tables",
        Some(&token),
        Some(json!({"name": "Week B", "entries": [{"weekday": 9, "dish_ids": []}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_resource_hides_credentials() {
    let (state, _tmp) = test_state().await;
    let admin = token_for(&state, "admin");

    let suffix: u32 = rand::random();
    let username = format!("alice{suffix}");

    let (status, created) = call(
        &state,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({"username": username, "password": "tea-time", "role": "user"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["username"], username.as_str());
    assert!(created.get("hash_pass").is_none());
    assert!(created.get("password").is_none());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = call(&state, "GET", &format!("/api/users/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fetched.get("hash_pass").is_none());

    // Duplicate username conflicts
    let (status, _) = call(
        &state,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({"username": username, "password": "other", "role": "user"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unknown role is a validation failure
    let (status, _) = call(
        &state,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({"username": "bob", "password": "tea-time", "role": "root"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_public() {
    let (state, _tmp) = test_state().await;

    let (status, body) = call(&state, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
