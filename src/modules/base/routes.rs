use actix_web::{get, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::auth::SessionUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::web::{flash, render};

/// 首页，随机展示一条名言
#[get("/")]
pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    let quote = match state.quotes.random().await? {
        Some(q) => {
            info!(quote_id = q.id, "首页名言");
            json!({"quote": q.quote_text, "character": q.character})
        }
        None => json!({"quote": "no_quotes", "character": "admin"}),
    };
    render(&state, &req, user.0.as_ref(), "index", "Home", json!({ "quote": quote }))
}

#[get("/about")]
pub async fn about(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "about", "About", json!({}))
}

#[get("/contact")]
pub async fn contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "contact", "Contact", json!({}))
}

/// 需要登录的测试页
#[get("/test")]
pub async fn test_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };
    render(
        &state,
        &req,
        Some(&user),
        "test",
        "Test",
        json!({"secret_data": "This is a secret page"}),
    )
}

pub fn configure_base_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(about)
        .service(contact)
        .service(test_page);
}
