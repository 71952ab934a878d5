//! API 路由模块
//!
//! # 结构
//!
//! - [`crud`] - 通用 CRUD 资源管道 (核心)
//! - [`auth`] - 认证相关接口
//! - [`health`] - 健康检查
//! - [`dishes`] - 菜品接口
//! - [`time_tables`] - 排餐表接口
//! - [`users`] - 用户管理接口

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod crud;
pub mod middleware;

pub mod auth;
pub mod health;

// Resource API
pub mod dishes;
pub mod time_tables;
pub mod users;

pub mod router_ext;
pub use router_ext::{OneshotResult, OneshotRouter};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
///
/// 资源注册表在此显式组装；运行期不存在按资源名的动态查找。
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Auth API - login is public, me requires authentication
        .merge(auth::router())
        // Resource API - authentication + per-resource permissions
        .merge(dishes::router())
        .merge(time_tables::router())
        .merge(users::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state
///
/// This is used by both the HTTP server and oneshot calls
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging - outermost, executed first
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // ========== Application Middleware ==========
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Resolve JWT into AuthState - executes before routes, handlers consume
        // it in their authorization stage (after input validation)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::authenticate,
        ))
}
