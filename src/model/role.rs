use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};

use crate::auth::permission::{Permission, PermissionSet};
use crate::model::Timestamped;

pub const USER: &str = "USER";
pub const QUOTE_USERS: &str = "QUOTE_USERS";
pub const QUOTE_ADMINS: &str = "QUOTE_ADMINS";

/// 角色
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
    pub permissions: PermissionSet,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Role {
    /// 预置角色：(名称, 权限, 是否默认)
    pub fn seeds() -> Vec<(&'static str, PermissionSet, bool)> {
        vec![
            (USER, [Permission::User].into_iter().collect(), true),
            (QUOTE_USERS, [Permission::QuoteUsers].into_iter().collect(), false),
            (QUOTE_ADMINS, [Permission::QuoteAdmins].into_iter().collect(), false),
        ]
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.has(permission)
    }

    pub fn add_permission(&mut self, permission: Permission) {
        self.permissions.add(permission);
    }

    pub fn remove_permission(&mut self, permission: Permission) {
        self.permissions.remove(permission);
    }

    pub fn reset_permissions(&mut self) {
        self.permissions.reset();
    }
}

impl Timestamped for Role {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

impl<'r> FromRow<'r, SqliteRow> for Role {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw: String = row.try_get("permissions")?;
        let permissions = PermissionSet::from_storage(&raw).map_err(|e| sqlx::Error::ColumnDecode {
            index: "permissions".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            is_default: row.try_get("is_default")?,
            permissions,
            created_at: row.try_get("created_at")?,
            modified_at: row.try_get("modified_at")?,
        })
    }
}
