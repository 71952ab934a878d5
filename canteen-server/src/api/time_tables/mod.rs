//! Time Table API 模块
//!
//! 通用 CRUD 管道的排餐表配置

use async_trait::async_trait;
use axum::Router;
use surrealdb::RecordId;

use crate::api::crud::{CrudResource, crud_router};
use crate::core::ServerState;
use crate::db::models::{TimeTable, TimeTableCreate, TimeTableUpdate};
use crate::db::repository::{RepoResult, TimeTableRepository};

pub fn router() -> Router<ServerState> {
    crud_router::<TimeTables>("/api/time-tables")
}

/// 排餐表资源描述符
pub struct TimeTables;

#[async_trait]
impl CrudResource for TimeTables {
    const TABLE: &'static str = "time_table";
    const TAG: &'static str = "TIME_TABLES";
    const READ_PERM: &'static str = "time_tables:read";
    const MANAGE_PERM: &'static str = "time_tables:manage";

    type Record = TimeTable;
    type Create = TimeTableCreate;
    type Update = TimeTableUpdate;

    async fn list_ids(state: &ServerState) -> RepoResult<Vec<String>> {
        TimeTableRepository::new(state.get_db()).find_ids().await
    }

    async fn find(state: &ServerState, id: &RecordId) -> RepoResult<Option<TimeTable>> {
        TimeTableRepository::new(state.get_db()).find_by_id(id).await
    }

    async fn create(state: &ServerState, payload: TimeTableCreate) -> RepoResult<TimeTable> {
        TimeTableRepository::new(state.get_db()).create(payload).await
    }

    async fn update(
        state: &ServerState,
        id: &RecordId,
        payload: TimeTableUpdate,
    ) -> RepoResult<TimeTable> {
        TimeTableRepository::new(state.get_db())
            .update(id, payload)
            .await
    }

    async fn delete(state: &ServerState, id: &RecordId) -> RepoResult<()> {
        TimeTableRepository::new(state.get_db()).delete(id).await
    }
}
