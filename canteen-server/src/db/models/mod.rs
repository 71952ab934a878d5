//! Data Models
//!
//! 每个资源一个显式记录类型，外加 Create/Update DTO。
//! ID 序列化为 `"table:key"` 字符串 (见 [`serde_helpers`])。

pub mod serde_helpers;

mod dish;
mod time_table;
mod user;

pub use dish::{Dish, DishCreate, DishUpdate};
pub use time_table::{TimeTable, TimeTableCreate, TimeTableEntry, TimeTableUpdate};
pub use user::{User, UserCreate, UserUpdate};
