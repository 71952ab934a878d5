//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List all user ids, ordered by id
    pub async fn find_ids(&self) -> RepoResult<Vec<String>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM user ORDER BY id")
            .await?
            .take(0)?;
        Ok(ids.into_iter().map(|id| id.to_string()).collect())
    }

    /// True if at least one user exists (bootstrap check)
    pub async fn any_exists(&self) -> RepoResult<bool> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM user LIMIT 1")
            .await?
            .take(0)?;
        Ok(!ids.is_empty())
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user
    ///
    /// `hash_pass` 被模型标记为 skip_serializing，因此这里用显式
    /// CREATE 语句而不是 `.content()` 写入。
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate username
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        // Hash password
        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let display_name = data.display_name.unwrap_or_else(|| data.username.clone());

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    username = $username,
                    display_name = $display_name,
                    hash_pass = $hash_pass,
                    role = $role,
                    is_active = true
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("display_name", display_name))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user (merge payload fields into the existing record)
    pub async fn update(&self, id: &RecordId, data: UserUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        // Check duplicate username if changing
        if let Some(ref new_username) = data.username
            && new_username != &existing.username
            && self.find_by_username(new_username).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                new_username
            )));
        }

        let hash_pass = match data.password {
            Some(password) => User::hash_password(&password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            None => existing.hash_pass,
        };

        let username = data.username.unwrap_or(existing.username);
        let display_name = data.display_name.unwrap_or(existing.display_name);
        let role = data.role.unwrap_or(existing.role);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query(
                "UPDATE $thing SET username = $username, display_name = $display_name, \
                 hash_pass = $hash_pass, role = $role, is_active = $is_active",
            )
            .bind(("thing", id.clone()))
            .bind(("username", username))
            .bind(("display_name", display_name))
            .bind(("hash_pass", hash_pass))
            .bind(("role", role))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(())
    }
}
