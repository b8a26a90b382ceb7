//! REST API（`/api/v1`）

pub mod quotes;
pub mod swagger;
pub mod token;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::AppError;

/// 请求体解析失败转为 400
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation("body", err.to_string()).into()
    })
}

/// 查询参数解析失败转为 400
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::validation("query", err.to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .app_data(query_config())
            .service(quotes::list_quotes)
            .service(quotes::get_quote)
            .service(quotes::create_quote)
            .service(quotes::update_quote)
            .service(quotes::delete_quote)
            .service(token::renew_token),
    );
}

/// OpenAPI 文档与 Swagger UI
pub fn configure_docs(cfg: &mut web::ServiceConfig) {
    // 使用通配路径以兼容静态资源与尾随斜杠
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()),
    );
}
