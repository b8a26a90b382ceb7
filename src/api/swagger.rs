use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// 注册 bearer token 认证方式
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI 文档聚合
#[derive(OpenApi)]
#[openapi(
    info(title = "Quote API", description = "名言增删改查与 token 续期"),
    paths(
        crate::api::quotes::list_quotes,
        crate::api::quotes::get_quote,
        crate::api::quotes::create_quote,
        crate::api::quotes::update_quote,
        crate::api::quotes::delete_quote,
        crate::api::token::renew_token,
    ),
    components(
        schemas(
            crate::model::QuoteView,
            crate::model::NewQuote,
            crate::model::QuoteUpdate,
            crate::api::quotes::QuoteList,
            crate::api::quotes::QuoteLookup,
            crate::api::quotes::QuoteCreated,
            crate::api::quotes::MessageResponse,
            crate::api::token::TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Quotes", description = "名言相关接口"),
        (name = "Auth", description = "API token 相关接口")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/quotes"));
        assert!(doc.paths.paths.contains_key("/api/v1/quotes/all"));
        assert!(doc.paths.paths.contains_key("/api/v1/auth/renew"));

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
