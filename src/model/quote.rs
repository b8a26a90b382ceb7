use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::model::Timestamped;

pub const MAX_QUOTE_TEXT: usize = 256;
pub const MAX_CHARACTER: usize = 64;

/// 名言
#[derive(Debug, Clone, FromRow)]
pub struct Quote {
    pub id: i64,
    pub quote_text: String,
    pub character: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// 对外输出的名言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteView {
    pub id: i64,
    #[schema(example = "To be or not to be")]
    pub quote_text: String,
    #[schema(example = "Hamlet")]
    pub character: String,
}

impl From<Quote> for QuoteView {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            quote_text: q.quote_text,
            character: q.character,
        }
    }
}

impl Timestamped for Quote {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

/// 创建名言请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewQuote {
    pub quote_text: Option<String>,
    pub character: Option<String>,
}

/// 更新名言请求，未提供的字段保持不变
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuoteUpdate {
    pub quote_id: Option<i64>,
    pub quote_text: Option<String>,
    pub character: Option<String>,
}

/// 按去除首尾空白后的值校验，与入库的值一致
fn check_field<'a>(field: &str, value: &'a str, max: usize) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    if value.chars().count() > max {
        return Err(AppError::validation(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value)
}

impl NewQuote {
    /// 校验后返回去除首尾空白的 (quote_text, character)
    pub fn validate(&self) -> AppResult<(&str, &str)> {
        let text = check_field(
            "quote_text",
            self.quote_text.as_deref().unwrap_or_default(),
            MAX_QUOTE_TEXT,
        )?;
        let character = check_field(
            "character",
            self.character.as_deref().unwrap_or_default(),
            MAX_CHARACTER,
        )?;
        Ok((text, character))
    }
}

impl QuoteUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(text) = &self.quote_text {
            check_field("quote_text", text, MAX_QUOTE_TEXT)?;
        }
        if let Some(character) = &self.character {
            check_field("character", character, MAX_CHARACTER)?;
        }
        Ok(())
    }
}
