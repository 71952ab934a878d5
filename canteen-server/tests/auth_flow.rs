//! 认证流程集成测试
//!
//! 覆盖默认管理员登录、token 使用与失败分支。

use axum::body::Body;
use canteen_server::api::{self, OneshotRouter};
use canteen_server::{Config, ServerState};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await;
    (state, tmp)
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
async fn default_admin_can_login_and_manage_users() {
    let (state, _tmp) = test_state().await;

    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");

    // Token works against a protected route
    let (status, me) = call(&state, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["display_name"], "Administrator");

    // No token yields 401
    let (status, _) = call(&state, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin may list users; the bootstrap admin is present
    let (status, ids) = call(&state, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!ids.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_rejected_with_unified_message() {
    let (state, _tmp) = test_state().await;

    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let wrong_pass_msg = body["error"].as_str().unwrap().to_string();

    // Unknown username yields the same message, no enumeration
    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "ghost", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"].as_str().unwrap(), wrong_pass_msg);
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
    let (state, _tmp) = test_state().await;

    let (status, _) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "", "password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_user_can_login() {
    let (state, _tmp) = test_state().await;

    let (_, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin"})),
    )
    .await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let (status, _) = call(
        &state,
        "POST",
        "/api/users",
        Some(&admin_token),
        Some(json!({"username": "cook", "password": "kitchen", "display_name": "Cook", "role": "manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &state,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "cook", "password": "kitchen"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "manager");

    // /api/auth/me reflects the stored display name, not the username
    let token = body["token"].as_str().unwrap().to_string();
    let (status, me) = call(&state, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "cook");
    assert_eq!(me["display_name"], "Cook");
    let (status, _) = call(
        &state,
        "POST",
        "/api/dishes",
        Some(&token),
        Some(json!({"name": "Stew"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
