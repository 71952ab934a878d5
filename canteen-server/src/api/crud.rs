//! 通用 CRUD 资源管道
//!
//! 每个资源的请求都经过同一条固定管道：
//! 验证 (Validator) → 授权 (Authorizer) → 服务 (Service) → 响应 (Responder)。
//!
//! 资源通过 [`CrudResource`] 描述符参数化管道：记录类型、DTO 类型、
//! 权限名、仓库调用。路由在启动时由 [`crud_router`] 显式组装，
//! 不存在按资源名的动态查找。
//!
//! 认证中间件提前解析令牌，但处理器在校验输入之后才消费
//! [`AuthState`]，所以校验失败优先于认证失败：同时失败两个阶段的
//! 请求返回 400 而不是 401。
//!
//! # 状态码映射 (按阶段)
//!
//! | 阶段 | 失败 | 状态码 |
//! |------|------|--------|
//! | Validator | 非法 id / 负载不合规 / JSON 解析失败 | 400 |
//! | Authorizer | 缺失或无效令牌 | 401 |
//! | Authorizer | 权限不足 | 403 |
//! | Service | 记录不存在 | 404 |
//! | Service | 唯一性冲突 | 409 |
//! | Service | 数据库或内部错误 | 500 (记录 `500::<TAG>:<OP>-<error>` 诊断) |

use async_trait::async_trait;
use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Serialize, de::DeserializeOwned};
use surrealdb::RecordId;
use validator::Validate;

use crate::auth::{AuthState, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, RepoResult};
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// 资源描述符 - 管道的全部按资源参数
///
/// 实现者是零尺寸的标记类型 (如 `Dishes`)，五个服务方法
/// 委托给资源各自的仓库。
#[async_trait]
pub trait CrudResource: Send + Sync + 'static {
    /// SurrealDB 表名，也是 id 字符串的前缀
    const TABLE: &'static str;
    /// 诊断日志标签 (如 "DISHES")
    const TAG: &'static str;
    /// 读操作所需权限
    const READ_PERM: &'static str;
    /// 写操作所需权限
    const MANAGE_PERM: &'static str;

    type Record: Serialize + Send + Sync + 'static;
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// derive 规则之外的额外创建校验
    fn validate_create(_payload: &Self::Create) -> Result<(), AppError> {
        Ok(())
    }

    /// derive 规则之外的额外更新校验
    fn validate_update(_payload: &Self::Update) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_ids(state: &ServerState) -> RepoResult<Vec<String>>;
    async fn find(state: &ServerState, id: &RecordId) -> RepoResult<Option<Self::Record>>;
    async fn create(state: &ServerState, payload: Self::Create) -> RepoResult<Self::Record>;
    async fn update(
        state: &ServerState,
        id: &RecordId,
        payload: Self::Update,
    ) -> RepoResult<Self::Record>;
    async fn delete(state: &ServerState, id: &RecordId) -> RepoResult<()>;
}

/// 组装一个资源的完整路由 (五个动词)
pub fn crud_router<R: CrudResource>(path: &'static str) -> Router<ServerState> {
    Router::new().nest(path, routes::<R>())
}

fn routes<R: CrudResource>() -> Router<ServerState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(get_by_id::<R>).put(update::<R>).delete(terminate::<R>),
        )
}

/// 路径 id 校验 (Validator 阶段)
///
/// 接受裸 key (`d1`) 或完整形式 (`dish:d1`)；表前缀必须与资源匹配。
fn parse_id<R: CrudResource>(raw: &str) -> Result<RecordId, AppError> {
    match raw.split_once(':') {
        Some((table, key)) => {
            if table != R::TABLE || key.is_empty() {
                return Err(AppError::validation(format!(
                    "Invalid {} id: {}",
                    R::TABLE,
                    raw
                )));
            }
            raw.parse().map_err(|_| {
                AppError::validation(format!("Invalid {} id: {}", R::TABLE, raw))
            })
        }
        None => Ok(RecordId::from_table_key(R::TABLE, raw)),
    }
}

/// 负载校验 (Validator 阶段)：JSON 解析失败和约束违规都映射到 400
fn parse_payload<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(payload)
}

/// 授权 (Authorizer 阶段)：先认证 (401)，再查权限 (403)
fn authorize<'a>(
    auth: &'a AuthState,
    permission: &'static str,
) -> Result<&'a CurrentUser, AppError> {
    let user = auth.require()?;

    if !user.has_permission(permission) {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id.clone(),
            username = user.username.clone(),
            required_permission = permission
        );
        return Err(AppError::forbidden(format!(
            "Permission denied: {}",
            permission
        )));
    }

    Ok(user)
}

/// Service 阶段错误映射；数据库错误在此记录诊断标签
fn service_error<R: CrudResource>(op: &str, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::not_found(msg),
        RepoError::Duplicate(msg) => AppError::conflict(msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        RepoError::Database(msg) => {
            tracing::error!(target: "service", "500::{}:{}-{}", R::TAG, op, msg);
            AppError::database(msg)
        }
    }
}

// =============================================================================
// Generic Handlers (Responder 阶段)
// =============================================================================

/// GET /{resource} - 返回全部记录 id (有序)
pub async fn list<R: CrudResource>(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthState>,
) -> AppResult<Json<Vec<String>>> {
    authorize(&auth, R::READ_PERM)?;

    let ids = R::list_ids(&state)
        .await
        .map_err(|e| service_error::<R>("GETALL", e))?;
    Ok(Json(ids))
}

/// GET /{resource}/:id - 返回单条记录
pub async fn get_by_id<R: CrudResource>(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
) -> AppResult<Json<R::Record>> {
    let id = parse_id::<R>(&id)?;
    authorize(&auth, R::READ_PERM)?;

    let record = R::find(&state, &id)
        .await
        .map_err(|e| service_error::<R>("GET", e))?
        .ok_or_else(|| AppError::not_found(format!("{} {} not found", R::TABLE, id)))?;
    Ok(Json(record))
}

/// POST /{resource} - 创建记录，返回含生成 id 的记录
pub async fn create<R: CrudResource>(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthState>,
    payload: Result<Json<R::Create>, JsonRejection>,
) -> AppResult<Json<R::Record>> {
    let payload = parse_payload(payload)?;
    R::validate_create(&payload)?;
    authorize(&auth, R::MANAGE_PERM)?;

    let record = R::create(&state, payload)
        .await
        .map_err(|e| service_error::<R>("POST", e))?;
    Ok(Json(record))
}

/// PUT /{resource}/:id - 合并更新记录字段，id 不变
pub async fn update<R: CrudResource>(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
    payload: Result<Json<R::Update>, JsonRejection>,
) -> AppResult<Json<R::Record>> {
    let id = parse_id::<R>(&id)?;
    let payload = parse_payload(payload)?;
    R::validate_update(&payload)?;
    authorize(&auth, R::MANAGE_PERM)?;

    let record = R::update(&state, &id, payload)
        .await
        .map_err(|e| service_error::<R>("PUT", e))?;
    Ok(Json(record))
}

/// DELETE /{resource}/:id - 删除记录，返回 200 无响应体
pub async fn terminate<R: CrudResource>(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id::<R>(&id)?;
    authorize(&auth, R::MANAGE_PERM)?;

    R::delete(&state, &id)
        .await
        .map_err(|e| service_error::<R>("DELETE", e))?;
    Ok(StatusCode::OK)
}
