use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::error::AppResult;
use crate::model::{NewUser, User};

/// 插入用户，返回新 id
pub async fn insert<'e>(executor: impl SqliteExecutor<'e>, user: &NewUser) -> AppResult<i64> {
    let now = Utc::now();
    let id = sqlx::query_scalar(
        r#"INSERT INTO users (name, email, password_hash, role_id, is_admin, created_at, modified_at)
           VALUES (?, ?, ?, ?, ?, ?, ?)
           RETURNING id"#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role_id)
    .bind(user.is_admin)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> AppResult<Option<User>> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?)
}

pub async fn find_by_email<'e>(
    executor: impl SqliteExecutor<'e>,
    email: &str,
) -> AppResult<Option<User>> {
    Ok(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? COLLATE NOCASE")
            .bind(email)
            .fetch_optional(executor)
            .await?,
    )
}

pub async fn update_token<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    token: &str,
) -> AppResult<bool> {
    let result = sqlx::query("UPDATE users SET token = ?, modified_at = ? WHERE id = ?")
        .bind(token)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_password<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    password_hash: &str,
) -> AppResult<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = ?, modified_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await?)
}
