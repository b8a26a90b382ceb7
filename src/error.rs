use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::auth::permission::PermissionParseError;
use crate::auth::token::TokenError;

/// 统一的应用错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] crate::comm::config::ConfigError),

    #[error("{message}")]
    Auth { message: String },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{resource}")]
    NotFound { resource: String },

    #[error("模板渲染错误: {0}")]
    Template(String),

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 创建认证错误
    pub fn auth<T: Into<String>>(message: T) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation<T: Into<String>, U: Into<String>>(field: T, message: U) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建资源未找到错误
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 获取错误代码
    pub fn error_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 1001,
            AppError::Auth { .. } => 1002,
            AppError::Validation { .. } => 1004,
            AppError::Database(_) => 1006,
            AppError::NotFound { .. } => 1009,
            AppError::Template(_) => 1010,
            AppError::Internal(_) => 1000,
        }
    }

    /// 错误类型名称，写入响应体
    fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Auth { .. } => "Auth",
            AppError::Validation { .. } => "Validation",
            AppError::Database(_) => "Database",
            AppError::NotFound { .. } => "NotFound",
            AppError::Template(_) => "Template",
            AppError::Internal(_) => "Internal",
        }
    }

    /// 是否属于服务端故障（不向客户端暴露细节）
    fn is_server_fault(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Database(_) | AppError::Template(_) | AppError::Internal(_)
        )
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Encode(msg) => AppError::Internal(anyhow::anyhow!("token 签发失败: {}", msg)),
            _ => AppError::auth("Unauthorized Access"),
        }
    }
}

impl From<PermissionParseError> for AppError {
    fn from(e: PermissionParseError) -> Self {
        AppError::Internal(anyhow::Error::new(e))
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(e: handlebars::RenderError) -> Self {
        AppError::Template(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 记录错误日志
        let message = if self.is_server_fault() {
            tracing::error!("Internal error: {}", self);
            "Internal Server Error".to_string()
        } else {
            tracing::info!("Client error: {}", self);
            self.to_string()
        };

        HttpResponse::build(status).json(json!({
            "message": message,
            "error": {
                "code": self.error_code(),
                "type": self.kind(),
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::auth("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::validation("quote_text", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("quote").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_errors_become_auth_failures() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Unauthorized Access");

        let err: AppError = TokenError::InvalidSignature.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: AppError = TokenError::Encode("boom".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_server_fault_hides_details() {
        let resp = AppError::Database(sqlx::Error::PoolTimedOut).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"]["type"], "Database");
    }

    #[test]
    fn test_validation_display() {
        let err = AppError::validation("character", "is required");
        assert_eq!(err.to_string(), "character: is required");
        assert_eq!(err.error_code(), 1004);
    }
}
