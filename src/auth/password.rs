use anyhow::Context;

use crate::error::AppResult;

/// bcrypt 允许的成本范围（与 bcrypt crate 内部私有常量一致）
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt 密码哈希
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 计算哈希，CPU 密集，在阻塞线程池中执行
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let cost = self.cost;
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("密码哈希任务失败")?
            .context("密码哈希失败")?;
        Ok(hash)
    }

    /// 校验密码，哈希格式损坏时视为不匹配
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        let matched = tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).unwrap_or(false)
        })
        .await
        .context("密码校验任务失败")?;
        Ok(matched)
    }
}
