//! Dish Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Dish entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in cents; canteens without pricing leave this unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_vegetarian: bool,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishCreate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "price_cents must not be negative"))]
    pub price_cents: Option<i64>,
    pub is_vegetarian: Option<bool>,
}

/// Update dish payload (merge semantics, all fields optional)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishUpdate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "price_cents must not be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_vegetarian: Option<bool>,
}
