//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDb) 的连接和引导

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::core::ServerError;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;

const NAMESPACE: &str = "canteen";
const DATABASE: &str = "canteen";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given directory
    /// and run bootstrap: index definitions plus default admin user.
    pub async fn new(db_dir: &Path, admin_password: &str) -> Result<Self, ServerError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {}", db_dir.display());

        let service = Self { db };
        service.define_schema().await?;
        service.ensure_default_admin(admin_password).await?;

        Ok(service)
    }

    /// Tables are schemaless documents; only the username uniqueness
    /// constraint is enforced database-side.
    async fn define_schema(&self) -> Result<(), ServerError> {
        self.db
            .query("DEFINE INDEX IF NOT EXISTS user_username ON user FIELDS username UNIQUE")
            .await
            .map_err(|e| ServerError::Database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }

    /// 首次启动引导：user 表为空时创建默认管理员
    async fn ensure_default_admin(&self, admin_password: &str) -> Result<(), ServerError> {
        let repo = UserRepository::new(self.db.clone());
        let has_users = repo
            .any_exists()
            .await
            .map_err(|e| ServerError::Database(format!("Failed to query users: {e}")))?;

        if has_users {
            return Ok(());
        }

        repo.create(UserCreate {
            username: "admin".to_string(),
            password: admin_password.to_string(),
            display_name: Some("Administrator".to_string()),
            role: "admin".to_string(),
        })
        .await
        .map_err(|e| ServerError::Database(format!("Failed to create default admin: {e}")))?;

        tracing::warn!("Created default admin user; change its password after first login");
        Ok(())
    }
}
