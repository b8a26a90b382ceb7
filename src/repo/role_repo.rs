use chrono::Utc;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use anyhow::anyhow;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::model::Role;

/// 写入预置角色，可重复执行；结束后只有一个默认角色
pub async fn insert_roles(pool: &SqlitePool) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let mut default_name = None;
    for (name, permissions, is_default) in Role::seeds() {
        sqlx::query(
            r#"INSERT INTO roles (name, is_default, permissions, created_at, modified_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT (name) DO UPDATE SET
                   is_default = excluded.is_default,
                   permissions = excluded.permissions,
                   modified_at = excluded.modified_at"#,
        )
        .bind(name)
        .bind(is_default)
        .bind(permissions.to_storage())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if is_default {
            default_name = Some(name);
        }
    }

    if let Some(name) = default_name {
        clear_other_defaults(&mut tx, name).await?;
    }

    let defaults = count_default(&mut *tx).await?;
    if defaults != 1 {
        return Err(AppError::Internal(anyhow!("默认角色数量异常: {}", defaults)));
    }

    tx.commit().await?;
    info!("预置角色已写入");
    Ok(())
}

async fn clear_other_defaults(conn: &mut SqliteConnection, default_name: &str) -> AppResult<()> {
    sqlx::query("UPDATE roles SET is_default = 0 WHERE name <> ? AND is_default <> 0")
        .bind(default_name)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> AppResult<Option<Role>> {
    Ok(sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?)
}

pub async fn find_by_name<'e>(
    executor: impl SqliteExecutor<'e>,
    name: &str,
) -> AppResult<Option<Role>> {
    Ok(sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await?)
}

pub async fn find_default<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<Option<Role>> {
    Ok(
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE is_default <> 0 ORDER BY id LIMIT 1")
            .fetch_optional(executor)
            .await?,
    )
}

pub async fn count_default<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE is_default <> 0")
            .fetch_one(executor)
            .await?,
    )
}
