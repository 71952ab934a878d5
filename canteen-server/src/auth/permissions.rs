//! Permission Definitions
//!
//! Simplified RBAC permission system.
//!
//! ## 设计原则
//! - 模块化权限：按资源授权 (read / manage)
//! - 用户管理：仅 admin 角色可用

/// 可配置权限列表
/// 不包含 "all" 和 "users:manage"，这些是系统级权限
pub const ALL_PERMISSIONS: &[&str] = &[
    "dishes:read",        // 查看菜品
    "dishes:manage",      // 菜品管理 (增删改)
    "time_tables:read",   // 查看排餐表
    "time_tables:manage", // 排餐表管理 (增删改)
];

/// Admin 专属权限（不在可配置列表中）
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    "users:manage", // 用户管理
    "all",          // 超级权限
];

/// 已知角色
pub const ROLES: &[&str] = &["admin", "manager", "user"];

/// Default role permissions
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// 经理角色默认权限（全部可配置权限）
pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    "dishes:read",
    "dishes:manage",
    "time_tables:read",
    "time_tables:manage",
];

/// 普通用户默认权限（仅查看）
pub const DEFAULT_USER_PERMISSIONS: &[&str] = &["dishes:read", "time_tables:read"];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "manager" => DEFAULT_MANAGER_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "user" => DEFAULT_USER_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        _ => vec![],
    }
}

/// Validate if a role name is known
pub fn is_valid_role(role: &str) -> bool {
    ROLES.contains(&role)
}
