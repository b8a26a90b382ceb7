//! 数据模型
//! Data models and their capability traits

pub mod quote;
pub mod role;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::password::PasswordHasher;
use crate::error::AppResult;

pub use quote::{NewQuote, Quote, QuoteUpdate, QuoteView};
pub use role::Role;
pub use user::{NewUser, User};

/// 带创建/修改时间的记录
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn modified_at(&self) -> DateTime<Utc>;
}

/// 可登录的主体
#[async_trait]
pub trait Authenticatable: Send + Sync {
    fn auth_id(&self) -> i64;

    fn password_hash(&self) -> &str;

    fn is_authenticated(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    /// 校验明文密码
    async fn verify_password(&self, hasher: &PasswordHasher, password: &str) -> AppResult<bool> {
        hasher.verify(password, self.password_hash()).await
    }
}
