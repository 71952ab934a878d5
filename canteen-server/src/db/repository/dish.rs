//! Dish Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Dish, DishCreate, DishUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dish";

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List all dish ids, ordered by id
    pub async fn find_ids(&self) -> RepoResult<Vec<String>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM dish ORDER BY id")
            .await?
            .take(0)?;
        Ok(ids.into_iter().map(|id| id.to_string()).collect())
    }

    /// Find dish by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Dish>> {
        let dish: Option<Dish> = self.base.db().select(id.clone()).await?;
        Ok(dish)
    }

    /// Create a new dish
    pub async fn create(&self, data: DishCreate) -> RepoResult<Dish> {
        let dish = Dish {
            id: None,
            name: data.name,
            description: data.description,
            price_cents: data.price_cents,
            is_vegetarian: data.is_vegetarian.unwrap_or(false),
        };

        let created: Option<Dish> = self.base.db().create(TABLE).content(dish).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }

    /// Update a dish (merge payload fields into the existing record)
    pub async fn update(&self, id: &RecordId, data: DishUpdate) -> RepoResult<Dish> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.or(existing.description);
        let price_cents = data.price_cents.or(existing.price_cents);
        let is_vegetarian = data.is_vegetarian.unwrap_or(existing.is_vegetarian);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, \
                 price_cents = $price_cents, is_vegetarian = $is_vegetarian",
            )
            .bind(("thing", id.clone()))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("price_cents", price_cents))
            .bind(("is_vegetarian", is_vegetarian))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)))
    }

    /// Hard delete a dish
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(())
    }
}
