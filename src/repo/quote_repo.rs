use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::error::AppResult;
use crate::model::Quote;

const COLUMNS: &str = r#"id, quote_text, "character", created_at, modified_at"#;

/// 按修改时间倒序列出全部
pub async fn list_all<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<Vec<Quote>> {
    let sql = format!(
        "SELECT {} FROM quotes ORDER BY modified_at DESC, id DESC",
        COLUMNS
    );
    Ok(sqlx::query_as::<_, Quote>(&sql).fetch_all(executor).await?)
}

pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> AppResult<Option<Quote>> {
    let sql = format!("SELECT {} FROM quotes WHERE id = ?", COLUMNS);
    Ok(sqlx::query_as::<_, Quote>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?)
}

pub async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    quote_text: &str,
    character: &str,
) -> AppResult<Quote> {
    let now = Utc::now();
    let sql = format!(
        r#"INSERT INTO quotes (quote_text, "character", created_at, modified_at)
           VALUES (?, ?, ?, ?)
           RETURNING {}"#,
        COLUMNS
    );
    Ok(sqlx::query_as::<_, Quote>(&sql)
        .bind(quote_text)
        .bind(character)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?)
}

/// 只更新提供的字段，返回是否命中
pub async fn update<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    quote_text: Option<&str>,
    character: Option<&str>,
) -> AppResult<bool> {
    let result = sqlx::query(
        r#"UPDATE quotes SET
               quote_text = COALESCE(?, quote_text),
               "character" = COALESCE(?, "character"),
               modified_at = ?
           WHERE id = ?"#,
    )
    .bind(quote_text)
    .bind(character)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// 删除，以受影响行数判断是否存在
pub async fn delete<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn random<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<Option<Quote>> {
    let sql = format!("SELECT {} FROM quotes ORDER BY RANDOM() LIMIT 1", COLUMNS);
    Ok(sqlx::query_as::<_, Quote>(&sql)
        .fetch_optional(executor)
        .await?)
}

pub async fn count<'e>(executor: impl SqliteExecutor<'e>) -> AppResult<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
        .fetch_one(executor)
        .await?)
}
