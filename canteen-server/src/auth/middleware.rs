//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件。
//!
//! 中间件只负责解析令牌并把结果作为 [`AuthState`] 注入请求扩展；
//! 拒绝发生在各处理器的授权阶段。这样输入校验可以先于认证执行，
//! 同时失败校验和认证的请求返回 400 而不是 401。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 认证阶段的结果，由 [`authenticate`] 注入请求扩展
#[derive(Debug, Clone)]
pub enum AuthState {
    /// 无 Authorization 头
    Anonymous,
    /// 令牌已过期
    Expired,
    /// 令牌无效 (格式错误、签名不符等)
    Rejected,
    /// 认证成功
    Authenticated(CurrentUser),
}

impl AuthState {
    /// 要求已认证用户，否则返回对应的 401 错误
    ///
    /// | 状态 | HTTP 状态码 |
    /// |------|------------|
    /// | Anonymous | 401 Unauthorized |
    /// | Expired | 401 TokenExpired |
    /// | Rejected | 401 InvalidToken |
    pub fn require(&self) -> Result<&CurrentUser, AppError> {
        match self {
            AuthState::Authenticated(user) => Ok(user),
            AuthState::Anonymous => Err(AppError::unauthorized()),
            AuthState::Expired => Err(AppError::token_expired()),
            AuthState::Rejected => Err(AppError::invalid_token("Invalid token")),
        }
    }
}

/// 认证中间件 - 解析 Bearer 令牌并注入 [`AuthState`]
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`AuthState::Authenticated`] 注入请求扩展
/// (`req.extensions_mut().insert(state)`)，失败时注入对应的失败状态。
///
/// # 跳过解析的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (如 `/health`)
/// - `/api/auth/login` (登录接口)
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求
    if req.method() == http::Method::OPTIONS {
        return next.run(req).await;
    }

    // 非 API 路由 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return next.run(req).await;
    }

    // 公共 API 路由
    if path == "/api/auth/login" {
        return next.run(req).await;
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let auth_state = match auth_header {
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            AuthState::Anonymous
        }
        Some(header) => match JwtService::extract_from_header(header) {
            None => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = "malformed authorization header",
                    uri = format!("{:?}", req.uri())
                );
                AuthState::Rejected
            }
            Some(token) => match state.get_jwt_service().validate_token(token) {
                Ok(claims) => AuthState::Authenticated(CurrentUser::from(claims)),
                Err(e) => {
                    security_log!(
                        "WARN",
                        "auth_failed",
                        error = format!("{}", e),
                        uri = format!("{:?}", req.uri())
                    );
                    match e {
                        JwtError::ExpiredToken => AuthState::Expired,
                        _ => AuthState::Rejected,
                    }
                }
            },
        },
    };

    req.extensions_mut().insert(auth_state);
    next.run(req).await
}
