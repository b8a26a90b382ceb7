//! SQLite 连接与表结构

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::time::{sleep, timeout, Duration};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        is_default BOOLEAN NOT NULL DEFAULT 0,
        permissions TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        modified_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS ix_roles_is_default ON roles (is_default)",
    r#"CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        token TEXT,
        role_id INTEGER NOT NULL REFERENCES roles (id),
        is_admin BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        modified_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS quotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        quote_text TEXT NOT NULL,
        "character" TEXT NOT NULL,
        created_at TEXT NOT NULL,
        modified_at TEXT NOT NULL
    )"#,
];

// 按外键依赖倒序删除
const DROP: &[&str] = &[
    "DROP TABLE IF EXISTS quotes",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS roles",
];

/// 创建连接池
///
/// 内存数据库每个连接都是独立的库，因此固定为单连接且不回收。
pub async fn connect(url: &str, max_connections: u32) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    Ok(pool_options.connect_with(options).await?)
}

/// 带超时与指数退避的连接
pub async fn connect_with_retry(url: &str, max_connections: u32) -> AppResult<SqlitePool> {
    const MAX_RETRIES: u32 = 3;
    const TIMEOUT_DURATION: Duration = Duration::from_secs(30);

    let mut last_error = None;
    for attempt in 1..=MAX_RETRIES {
        info!("数据库连接尝试 {}/{}", attempt, MAX_RETRIES);

        match timeout(TIMEOUT_DURATION, connect(url, max_connections)).await {
            Ok(Ok(pool)) => {
                info!("数据库连接成功");
                return Ok(pool);
            }
            Ok(Err(e)) => {
                warn!("数据库连接失败 (尝试 {}): {}", attempt, e);
                last_error = Some(e);
            }
            Err(_) => {
                warn!("数据库连接超时 (尝试 {})", attempt);
                last_error = Some(AppError::Database(sqlx::Error::PoolTimedOut));
            }
        }

        if attempt < MAX_RETRIES {
            // 指数退避
            let delay = Duration::from_millis(1000 * 2_u64.pow(attempt - 1));
            info!("等待 {:?} 后重试", delay);
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or(AppError::Database(sqlx::Error::PoolTimedOut)))
}

/// 建表（已存在时跳过）
pub async fn create_all(pool: &SqlitePool) -> AppResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// 删除全部表
pub async fn drop_all(pool: &SqlitePool) -> AppResult<()> {
    for statement in DROP {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('roles', 'users', 'quotes')",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_drop() {
        let pool = connect("sqlite::memory:", 5).await.unwrap();
        create_all(&pool).await.unwrap();
        // 重复执行不报错
        create_all(&pool).await.unwrap();
        assert_eq!(table_count(&pool).await, 3);

        drop_all(&pool).await.unwrap();
        assert_eq!(table_count(&pool).await, 0);
    }
}
