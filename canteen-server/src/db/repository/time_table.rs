//! Time Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{TimeTable, TimeTableCreate, TimeTableUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "time_table";

#[derive(Clone)]
pub struct TimeTableRepository {
    base: BaseRepository,
}

impl TimeTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List all time table ids, ordered by id
    pub async fn find_ids(&self) -> RepoResult<Vec<String>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM time_table ORDER BY id")
            .await?
            .take(0)?;
        Ok(ids.into_iter().map(|id| id.to_string()).collect())
    }

    /// Find time table by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<TimeTable>> {
        let table: Option<TimeTable> = self.base.db().select(id.clone()).await?;
        Ok(table)
    }

    /// Create a new time table
    pub async fn create(&self, data: TimeTableCreate) -> RepoResult<TimeTable> {
        let table = TimeTable {
            id: None,
            name: data.name,
            entries: data.entries,
        };

        let created: Option<TimeTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create time table".to_string()))
    }

    /// Update a time table (merge payload fields into the existing record)
    pub async fn update(&self, id: &RecordId, data: TimeTableUpdate) -> RepoResult<TimeTable> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time table {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let entries = data.entries.unwrap_or(existing.entries);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, entries = $entries")
            .bind(("thing", id.clone()))
            .bind(("name", name))
            .bind(("entries", entries))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time table {} not found", id)))
    }

    /// Hard delete a time table
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time table {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(())
    }
}
