//! Time Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// 每周排餐表中的一项：星期几供应哪些菜品
///
/// `dish_ids` 存储 `"dish:key"` 字符串引用；本层不强制引用完整性。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimeTableEntry {
    /// 0 = Monday .. 6 = Sunday
    #[validate(range(min = 0, max = 6, message = "weekday must be 0-6"))]
    pub weekday: u8,
    #[serde(default)]
    pub dish_ids: Vec<String>,
}

/// Time table entity (排餐表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub entries: Vec<TimeTableEntry>,
}

/// Create time table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimeTableCreate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(nested)]
    #[serde(default)]
    pub entries: Vec<TimeTableEntry>,
}

/// Update time table payload (merge semantics, all fields optional)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimeTableUpdate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<TimeTableEntry>>,
}
