use sqlx::SqlitePool;

use crate::auth::password::PasswordHasher;
use crate::auth::session::SessionManager;
use crate::auth::token::{TokenService, API_AUDIENCE};
use crate::comm::config_validator::{AppConfiguration, DEVELOPMENT_SECRET};
use crate::error::AppResult;
use crate::service::{AuthService, QuoteService};
use crate::web::templates::Templates;

/// 认证相关配置
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret_key: String,
    pub token_secret: String,
    pub token_ttl_seconds: u64,
    pub session_ttl_seconds: u64,
    pub allowed_email_domains: Vec<String>,
    pub password_hash_cost: u32,
}

impl AuthSettings {
    pub fn from_config(config: &AppConfiguration) -> Self {
        Self {
            secret_key: config
                .secret_key
                .clone()
                .unwrap_or_else(|| DEVELOPMENT_SECRET.to_string()),
            token_secret: config
                .token_secret
                .clone()
                .unwrap_or_else(|| DEVELOPMENT_SECRET.to_string()),
            token_ttl_seconds: config.token_ttl_seconds,
            session_ttl_seconds: config.session_ttl_seconds,
            allowed_email_domains: config.allowed_email_domains.clone(),
            password_hash_cost: config.password_hash_cost,
        }
    }
}

/// 所有 worker 共享的只读状态
pub struct AppState {
    pub app_name: String,
    pub pool: SqlitePool,
    pub auth: AuthService,
    pub quotes: QuoteService,
    pub sessions: SessionManager,
    pub templates: Templates,
}

impl AppState {
    pub fn new(config: &AppConfiguration, pool: SqlitePool) -> AppResult<Self> {
        let settings = AuthSettings::from_config(config);
        let tokens = TokenService::new(
            &settings.token_secret,
            API_AUDIENCE,
            settings.token_ttl_seconds,
        );

        Ok(Self {
            app_name: config.app_name.clone(),
            auth: AuthService::new(
                pool.clone(),
                tokens,
                PasswordHasher::new(settings.password_hash_cost),
                settings.allowed_email_domains.clone(),
            ),
            quotes: QuoteService::new(pool.clone()),
            sessions: SessionManager::new(&settings.secret_key, settings.session_ttl_seconds),
            templates: Templates::new()?,
            pool,
        })
    }
}
