//! Dish API 模块
//!
//! 通用 CRUD 管道的菜品配置

use async_trait::async_trait;
use axum::Router;
use surrealdb::RecordId;

use crate::api::crud::{CrudResource, crud_router};
use crate::core::ServerState;
use crate::db::models::{Dish, DishCreate, DishUpdate};
use crate::db::repository::{DishRepository, RepoResult};

pub fn router() -> Router<ServerState> {
    crud_router::<Dishes>("/api/dishes")
}

/// 菜品资源描述符
pub struct Dishes;

#[async_trait]
impl CrudResource for Dishes {
    const TABLE: &'static str = "dish";
    const TAG: &'static str = "DISHES";
    const READ_PERM: &'static str = "dishes:read";
    const MANAGE_PERM: &'static str = "dishes:manage";

    type Record = Dish;
    type Create = DishCreate;
    type Update = DishUpdate;

    async fn list_ids(state: &ServerState) -> RepoResult<Vec<String>> {
        DishRepository::new(state.get_db()).find_ids().await
    }

    async fn find(state: &ServerState, id: &RecordId) -> RepoResult<Option<Dish>> {
        DishRepository::new(state.get_db()).find_by_id(id).await
    }

    async fn create(state: &ServerState, payload: DishCreate) -> RepoResult<Dish> {
        DishRepository::new(state.get_db()).create(payload).await
    }

    async fn update(state: &ServerState, id: &RecordId, payload: DishUpdate) -> RepoResult<Dish> {
        DishRepository::new(state.get_db()).update(id, payload).await
    }

    async fn delete(state: &ServerState, id: &RecordId) -> RepoResult<()> {
        DishRepository::new(state.get_db()).delete(id).await
    }
}
