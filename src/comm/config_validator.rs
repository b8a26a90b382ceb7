use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// 开发环境使用的签名密钥，生产环境必须显式配置
pub const DEVELOPMENT_SECRET: &str = "development-only-secret-change-me";

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfiguration {
    pub app_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub server_workers: Option<usize>,
    pub server_debug: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub logging_level: String,
    pub logging_json_format: bool,
    /// 会话 cookie 签名密钥
    pub secret_key: Option<String>,
    /// API token 签名密钥
    pub token_secret: Option<String>,
    pub token_ttl_seconds: u64,
    pub session_ttl_seconds: u64,
    pub allowed_email_domains: Vec<String>,
    pub password_hash_cost: u32,
}

impl Default for AppConfiguration {
    fn default() -> Self {
        Self {
            app_name: "quote-app".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            server_workers: Some(2),
            server_debug: false,
            database_url: "sqlite://app.db?mode=rwc".to_string(),
            database_max_connections: 5,
            logging_level: "info".to_string(),
            logging_json_format: true,
            secret_key: None,
            token_secret: None,
            token_ttl_seconds: 600,
            session_ttl_seconds: 86400,
            allowed_email_domains: vec!["example.com".to_string()],
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// 配置验证器
pub struct ConfigValidator {
    production: bool,
}

impl ConfigValidator {
    /// 创建新的配置验证器
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    /// 验证整个配置
    pub fn validate_config(&self, config: &AppConfiguration) -> AppResult<()> {
        // 验证服务器主机
        if config.server_host.is_empty() {
            return Err(AppError::validation("server_host", "服务器主机不能为空"));
        }

        // 验证端口范围
        if config.server_port < 1024 {
            return Err(AppError::validation("server_port", "端口必须在1024-65535范围内"));
        }

        // 验证工作线程数
        if let Some(workers) = config.server_workers {
            if workers == 0 || workers > 32 {
                return Err(AppError::validation("server_workers", "工作线程数必须在1-32范围内"));
            }
        }

        if config.database_url.is_empty() {
            return Err(AppError::validation("database_url", "数据库地址不能为空"));
        }

        // 验证数据库连接池大小
        if config.database_max_connections == 0 || config.database_max_connections > 100 {
            return Err(AppError::validation(
                "database_max_connections",
                "数据库连接池大小必须在1-100范围内",
            ));
        }

        // 验证日志级别
        if !["trace", "debug", "info", "warn", "error"].contains(&config.logging_level.as_str()) {
            return Err(AppError::validation(
                "logging_level",
                "日志级别必须是 trace, debug, info, warn, error 之一",
            ));
        }

        // 验证 token 过期时间
        if config.token_ttl_seconds == 0 || config.token_ttl_seconds > 30 * 86400 {
            return Err(AppError::validation(
                "token_ttl_seconds",
                "token 过期时间必须在1-2592000秒范围内",
            ));
        }

        if config.session_ttl_seconds == 0 || config.session_ttl_seconds > 30 * 86400 {
            return Err(AppError::validation(
                "session_ttl_seconds",
                "会话过期时间必须在1-2592000秒范围内",
            ));
        }

        if config.allowed_email_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(AppError::validation("allowed_email_domains", "邮箱域名不能为空"));
        }

        if !(crate::auth::password::MIN_COST..=crate::auth::password::MAX_COST).contains(&config.password_hash_cost) {
            return Err(AppError::validation(
                "password_hash_cost",
                format!("密码哈希成本必须在{}-{}范围内", crate::auth::password::MIN_COST, crate::auth::password::MAX_COST),
            ));
        }

        // 生产环境必须显式配置两个签名密钥
        if self.production {
            for (field, value) in [
                ("secret_key", &config.secret_key),
                ("token_secret", &config.token_secret),
            ] {
                match value {
                    Some(secret) if secret.len() >= 16 && secret != DEVELOPMENT_SECRET => {}
                    _ => {
                        return Err(AppError::validation(
                            field,
                            "生产环境必须配置至少16个字符的密钥",
                        ))
                    }
                }
            }
        }

        Ok(())
    }
}

/// 环境特定配置加载器
pub struct EnvironmentConfigLoader {
    environment: String,
}

impl EnvironmentConfigLoader {
    /// 从 `QUOTES_ENV` 读取当前环境
    pub fn new() -> Self {
        Self::with_environment(
            std::env::var("QUOTES_ENV").unwrap_or_else(|_| "development".to_string()),
        )
    }

    /// 指定环境名创建加载器
    pub fn with_environment<T: Into<String>>(environment: T) -> Self {
        Self {
            environment: environment.into(),
        }
    }

    /// 获取当前环境
    pub fn get_environment(&self) -> &str {
        &self.environment
    }

    /// 获取环境特定的配置文件路径，按优先级从低到高
    pub fn get_config_paths(&self) -> Vec<String> {
        vec![
            "config/default.toml".to_string(),
            format!("config/{}.toml", self.environment),
            "config/local.toml".to_string(),
        ]
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for EnvironmentConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
