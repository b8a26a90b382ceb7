//! 请求提取器
//!
//! `ApiUser` 从 `Authorization: Bearer <token>` 解析用户，失败时返回 401；
//! `SessionUser` 从会话 cookie 解析，匿名时为 `None`。

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use anyhow::anyhow;
use futures_util::future::LocalBoxFuture;
use tracing::info;

use crate::error::AppError;
use crate::model::User;
use crate::state::AppState;

/// 通过 bearer token 认证的 API 用户
#[derive(Debug, Clone)]
pub struct ApiUser(pub User);

/// 会话中的浏览器用户
#[derive(Debug, Clone)]
pub struct SessionUser(pub Option<User>);

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow!("AppState 未注册")))
}

/// 提取 `Bearer` 后的 token
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequest for ApiUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let token = bearer_token(req);
        let path = req.path().to_string();

        Box::pin(async move {
            let state = state?;
            let Some(token) = token else {
                info!(%path, "缺少 bearer token");
                return Err(AppError::auth("Unauthorized Access"));
            };
            let user = state.auth.resolve_token(&token).await?;
            info!(user_id = user.id, email = %user.email, %path, "API 请求已认证");
            Ok(ApiUser(user))
        })
    }
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let user_id = state
            .as_ref()
            .ok()
            .and_then(|state| state.sessions.current_user_id(req));

        Box::pin(async move {
            let state = state?;
            let user = match user_id {
                Some(id) => state.auth.find_user(id).await?,
                None => None,
            };
            Ok(SessionUser(user))
        })
    }
}
