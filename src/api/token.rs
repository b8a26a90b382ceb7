use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::ApiUser;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// 为当前用户签发新 token
#[utoipa::path(
    get,
    path = "/api/v1/auth/renew",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "新 token", body = TokenResponse),
        (status = 401, description = "未认证")
    )
)]
#[get("/auth/renew")]
pub async fn renew_token(user: ApiUser, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let token = state.auth.renew_token(user.0.id).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
