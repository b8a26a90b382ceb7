//! 权限模型
//!
//! 权限以枚举标识符组成集合，持久化为逗号分隔的字符串，例如 `user,quote_users`。

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 权限标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    User,
    QuoteUsers,
    QuoteAdmins,
}

impl Permission {
    pub const ALL: [Permission; 3] = [
        Permission::User,
        Permission::QuoteUsers,
        Permission::QuoteAdmins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::User => "user",
            Permission::QuoteUsers => "quote_users",
            Permission::QuoteAdmins => "quote_admins",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的权限标识符
#[derive(Debug, Error, PartialEq, Eq)]
#[error("未知权限: {0}")]
pub struct PermissionParseError(pub String);

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PermissionParseError(s.to_string()))
    }
}

/// 权限集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// 已存在时不做任何事
    pub fn add(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    /// 不存在时不做任何事
    pub fn remove(&mut self, permission: Permission) {
        self.0.remove(&permission);
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// 序列化为数据库存储格式
    pub fn to_storage(&self) -> String {
        self.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(",")
    }

    /// 从数据库存储格式解析
    pub fn from_storage(raw: &str) -> Result<Self, PermissionParseError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Permission::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(PermissionSet)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().collect())
    }
}
