#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;

use quote_app::comm::config_validator::AppConfiguration;
use quote_app::model::User;
use quote_app::repo::role_repo;
use quote_app::service::{RegisterOutcome, Registration};
use quote_app::{db, AppState};

pub const PASSWORD: &str = "secret-pass";

/// 内存数据库 + 最低 bcrypt 成本
pub async fn test_state() -> web::Data<AppState> {
    let config = AppConfiguration {
        database_url: "sqlite::memory:".to_string(),
        password_hash_cost: quote_app::auth::password::MIN_COST,
        secret_key: Some("integration-session-secret".to_string()),
        token_secret: Some("integration-token-secret".to_string()),
        allowed_email_domains: vec!["example.com".to_string()],
        ..AppConfiguration::default()
    };

    let pool = db::connect(&config.database_url, 1).await.unwrap();
    db::create_all(&pool).await.unwrap();
    role_repo::insert_roles(&pool).await.unwrap();
    web::Data::new(AppState::new(&config, pool).unwrap())
}

/// 用共享状态初始化测试服务
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(quote_app::default_headers())
                .app_data($state.clone())
                .configure(quote_app::configure_routes),
        )
        .await
    };
}

pub async fn register(state: &AppState, email: &str) -> User {
    let outcome = state
        .auth
        .register(Registration {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    match outcome {
        RegisterOutcome::Created(user) => user,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

pub fn bearer(user: &User) -> (&'static str, String) {
    (
        "Authorization",
        format!("Bearer {}", user.token.clone().unwrap()),
    )
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}
