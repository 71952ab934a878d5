//! User API 模块
//!
//! 通用 CRUD 管道的用户配置。所有动词都要求 `users:manage`
//! (实际上仅 admin 角色可用)。

use async_trait::async_trait;
use axum::Router;
use surrealdb::RecordId;

use crate::api::crud::{CrudResource, crud_router};
use crate::auth::permissions;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::{RepoResult, UserRepository};
use crate::utils::AppError;

pub fn router() -> Router<ServerState> {
    crud_router::<Users>("/api/users")
}

/// 用户资源描述符
pub struct Users;

#[async_trait]
impl CrudResource for Users {
    const TABLE: &'static str = "user";
    const TAG: &'static str = "USERS";
    const READ_PERM: &'static str = "users:manage";
    const MANAGE_PERM: &'static str = "users:manage";

    type Record = User;
    type Create = UserCreate;
    type Update = UserUpdate;

    fn validate_create(payload: &UserCreate) -> Result<(), AppError> {
        if !permissions::is_valid_role(&payload.role) {
            return Err(AppError::validation(format!(
                "Unknown role: {}",
                payload.role
            )));
        }
        Ok(())
    }

    fn validate_update(payload: &UserUpdate) -> Result<(), AppError> {
        if let Some(ref role) = payload.role
            && !permissions::is_valid_role(role)
        {
            return Err(AppError::validation(format!("Unknown role: {}", role)));
        }
        Ok(())
    }

    async fn list_ids(state: &ServerState) -> RepoResult<Vec<String>> {
        UserRepository::new(state.get_db()).find_ids().await
    }

    async fn find(state: &ServerState, id: &RecordId) -> RepoResult<Option<User>> {
        UserRepository::new(state.get_db()).find_by_id(id).await
    }

    async fn create(state: &ServerState, payload: UserCreate) -> RepoResult<User> {
        UserRepository::new(state.get_db()).create(payload).await
    }

    async fn update(state: &ServerState, id: &RecordId, payload: UserUpdate) -> RepoResult<User> {
        UserRepository::new(state.get_db()).update(id, payload).await
    }

    async fn delete(state: &ServerState, id: &RecordId) -> RepoResult<()> {
        UserRepository::new(state.get_db()).delete(id).await
    }
}
