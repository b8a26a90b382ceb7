use sqlx::SqlitePool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::model::{NewQuote, QuoteUpdate, QuoteView};
use crate::repo::quote_repo;

/// 名言增删改查
#[derive(Clone)]
pub struct QuoteService {
    pool: SqlitePool,
}

impl QuoteService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<QuoteView>> {
        let quotes = quote_repo::list_all(&self.pool).await?;
        Ok(quotes.into_iter().map(QuoteView::from).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<QuoteView> {
        quote_repo::find_by_id(&self.pool, id)
            .await?
            .map(QuoteView::from)
            .ok_or_else(|| {
                info!(quote_id = id, "名言不存在");
                AppError::not_found(format!("Sorry, quote ID: {} Not Found", id))
            })
    }

    /// 校验通过后才访问数据库
    pub async fn create(&self, new_quote: &NewQuote) -> AppResult<QuoteView> {
        let (text, character) = new_quote.validate()?;
        let quote = quote_repo::insert(&self.pool, text, character).await?;
        info!(quote_id = quote.id, "名言已创建");
        Ok(quote.into())
    }

    /// 返回是否找到对应记录
    pub async fn update(&self, id: i64, update: &QuoteUpdate) -> AppResult<bool> {
        update.validate()?;
        let updated = quote_repo::update(
            &self.pool,
            id,
            update.quote_text.as_deref().map(str::trim),
            update.character.as_deref().map(str::trim),
        )
        .await?;
        if updated {
            info!(quote_id = id, "名言已更新");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let deleted = quote_repo::delete(&self.pool, id).await?;
        if deleted {
            info!(quote_id = id, "名言已删除");
        }
        Ok(deleted)
    }

    pub async fn random(&self) -> AppResult<Option<QuoteView>> {
        Ok(quote_repo::random(&self.pool).await?.map(QuoteView::from))
    }
}
