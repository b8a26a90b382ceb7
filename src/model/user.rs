use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::auth::permission::Permission;
use crate::model::{Authenticatable, Role, Timestamped};

/// 用户
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 只保存 bcrypt 哈希
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub token: Option<String>,
    pub role_id: i64,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// 待写入的用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i64,
    pub is_admin: bool,
}

impl User {
    /// 用户所属角色拥有该权限
    pub fn can(&self, role: &Role, permission: Permission) -> bool {
        role.id == self.role_id && role.has_permission(permission)
    }

    pub fn is_administrator(&self, role: &Role) -> bool {
        self.can(role, Permission::QuoteAdmins)
    }
}

impl Timestamped for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

impl Authenticatable for User {
    fn auth_id(&self) -> i64 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
