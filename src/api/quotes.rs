use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::auth::ApiUser;
use crate::error::{AppError, AppResult};
use crate::model::{NewQuote, QuoteUpdate, QuoteView};
use crate::state::AppState;

/// `quote_id` 查询参数
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteIdQuery {
    /// 名言 id
    pub quote_id: Option<i64>,
}

impl QuoteIdQuery {
    fn require(&self) -> AppResult<i64> {
        self.quote_id
            .ok_or_else(|| AppError::validation("quote_id", "Enter the quote ID."))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteList {
    pub quotes: Vec<QuoteView>,
}

/// 单条查询结果，沿用列表形式
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteLookup {
    pub quote: Vec<QuoteView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteCreated {
    pub quote: QuoteView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 列出全部名言
#[utoipa::path(
    get,
    path = "/api/v1/quotes/all",
    tag = "Quotes",
    responses((status = 200, description = "全部名言，按修改时间倒序", body = QuoteList))
)]
#[get("/quotes/all")]
pub async fn list_quotes(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let quotes = state.quotes.list().await?;
    Ok(HttpResponse::Ok().json(QuoteList { quotes }))
}

/// 按 id 查询
#[utoipa::path(
    get,
    path = "/api/v1/quotes",
    tag = "Quotes",
    params(QuoteIdQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "查询成功", body = QuoteLookup),
        (status = 401, description = "未认证"),
        (status = 404, description = "名言不存在")
    )
)]
#[get("/quotes")]
pub async fn get_quote(
    user: ApiUser,
    state: web::Data<AppState>,
    query: web::Query<QuoteIdQuery>,
) -> AppResult<HttpResponse> {
    let id = query.require()?;
    info!(user_id = user.0.id, quote_id = id, "查询名言");
    let quote = state.quotes.get(id).await?;
    Ok(HttpResponse::Ok().json(QuoteLookup { quote: vec![quote] }))
}

/// 创建名言
#[utoipa::path(
    post,
    path = "/api/v1/quotes",
    tag = "Quotes",
    request_body = NewQuote,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "创建成功", body = QuoteCreated),
        (status = 400, description = "缺少 quote_text 或 character"),
        (status = 401, description = "未认证")
    )
)]
#[post("/quotes")]
pub async fn create_quote(
    user: ApiUser,
    state: web::Data<AppState>,
    body: web::Json<NewQuote>,
) -> AppResult<HttpResponse> {
    info!(user_id = user.0.id, "创建名言");
    let quote = state.quotes.create(&body).await?;
    Ok(HttpResponse::Created().json(QuoteCreated { quote }))
}

/// 更新名言，只修改提供的字段
#[utoipa::path(
    put,
    path = "/api/v1/quotes",
    tag = "Quotes",
    request_body = QuoteUpdate,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "更新成功", body = MessageResponse),
        (status = 401, description = "未认证或名言不存在")
    )
)]
#[put("/quotes")]
pub async fn update_quote(
    user: ApiUser,
    state: web::Data<AppState>,
    body: web::Json<QuoteUpdate>,
) -> AppResult<HttpResponse> {
    let id = body
        .quote_id
        .ok_or_else(|| AppError::validation("quote_id", "Enter the quote ID to update."))?;
    info!(user_id = user.0.id, quote_id = id, "更新名言");

    if state.quotes.update(id, &body).await? {
        Ok(HttpResponse::Created().json(MessageResponse::new(format!("Quote {} Updated", id))))
    } else {
        info!(quote_id = id, "待更新的名言不存在");
        Err(AppError::auth("QUOTE WAS NOT FOUND"))
    }
}

/// 删除名言
#[utoipa::path(
    delete,
    path = "/api/v1/quotes",
    tag = "Quotes",
    params(QuoteIdQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除成功", body = MessageResponse),
        (status = 401, description = "未认证"),
        (status = 404, description = "名言不存在")
    )
)]
#[delete("/quotes")]
pub async fn delete_quote(
    user: ApiUser,
    state: web::Data<AppState>,
    query: web::Query<QuoteIdQuery>,
) -> AppResult<HttpResponse> {
    let id = query.require()?;
    info!(user_id = user.0.id, quote_id = id, "删除名言");

    if state.quotes.delete(id).await? {
        Ok(HttpResponse::Ok().json(MessageResponse::new(format!("{} Deleted", id))))
    } else {
        info!(quote_id = id, "待删除的名言不存在");
        Err(AppError::not_found("Something went wrong. Missing quote_id?"))
    }
}
