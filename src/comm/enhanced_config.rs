use config::FileFormat;
use tracing::{debug, info, warn};

use crate::comm::config::{ConfigManager, ConfigSource};
use crate::comm::config_validator::{
    AppConfiguration, ConfigValidator, EnvironmentConfigLoader, DEVELOPMENT_SECRET,
};
use crate::error::AppResult;

/// 环境变量前缀，例如 `QUOTES_AUTH__TOKEN_SECRET`
pub const ENV_PREFIX: &str = "QUOTES";

/// 编译期嵌入的默认配置，作为优先级最低的配置源
const EMBEDDED_DEFAULTS: &str = include_str!("../../config/default.toml");

const REQUIRED_PRODUCTION_KEYS: [&str; 2] = ["auth.secret_key", "auth.token_secret"];

/// 增强的配置管理器
pub struct EnhancedConfigManager {
    config_manager: ConfigManager,
    env_loader: EnvironmentConfigLoader,
    app_config: AppConfiguration,
}

impl EnhancedConfigManager {
    /// 按当前环境加载并验证配置
    pub fn new() -> AppResult<Self> {
        Self::with_loader(EnvironmentConfigLoader::new())
    }

    /// 使用指定的环境加载器创建
    pub fn with_loader(env_loader: EnvironmentConfigLoader) -> AppResult<Self> {
        info!("当前环境: {}", env_loader.get_environment());

        // 构建配置源
        let mut sources = vec![ConfigSource::String {
            content: EMBEDDED_DEFAULTS.to_string(),
            format: FileFormat::Toml,
        }];

        // 添加环境特定的配置文件
        for path in env_loader.get_config_paths() {
            sources.push(ConfigSource::File {
                path: path.clone(),
                format: Some(FileFormat::Toml),
                required: false,
            });
        }

        // 添加环境变量配置
        sources.push(ConfigSource::Env {
            prefix: ENV_PREFIX.to_string(),
            separator: "__",
        });

        let config_manager = ConfigManager::with_sources(sources)?;
        let app_config = Self::load_app_config(&config_manager, &env_loader)?;

        Ok(Self {
            config_manager,
            env_loader,
            app_config,
        })
    }

    /// 加载应用配置
    pub fn load_app_config(
        config_manager: &ConfigManager,
        env_loader: &EnvironmentConfigLoader,
    ) -> AppResult<AppConfiguration> {
        let mut app_config = AppConfiguration::default();

        // 从配置管理器加载配置值，类型错误直接报错
        if let Some(value) = config_manager.get_optional::<String>("app.name")? {
            app_config.app_name = value;
        }
        if let Some(value) = config_manager.get_optional::<String>("server.host")? {
            app_config.server_host = value;
        }
        if let Some(value) = config_manager.get_optional::<u16>("server.port")? {
            app_config.server_port = value;
        }
        if let Some(value) = config_manager.get_optional::<usize>("server.workers")? {
            app_config.server_workers = Some(value);
        }
        if let Some(value) = config_manager.get_optional::<bool>("server.debug")? {
            app_config.server_debug = value;
        }
        if let Some(value) = config_manager.get_optional::<String>("database.url")? {
            app_config.database_url = value;
        }
        if let Some(value) = config_manager.get_optional::<u32>("database.max_connections")? {
            app_config.database_max_connections = value;
        }
        if let Some(value) = config_manager.get_optional::<String>("logging.level")? {
            app_config.logging_level = value;
        }
        if let Some(value) = config_manager.get_optional::<bool>("logging.json_format")? {
            app_config.logging_json_format = value;
        }
        if let Some(value) = config_manager.get_optional::<String>("auth.secret_key")? {
            app_config.secret_key = Some(value);
        }
        if let Some(value) = config_manager.get_optional::<String>("auth.token_secret")? {
            app_config.token_secret = Some(value);
        }
        if let Some(value) = config_manager.get_optional::<u64>("auth.token_ttl_seconds")? {
            app_config.token_ttl_seconds = value;
        }
        if let Some(value) = config_manager.get_optional::<u64>("auth.session_ttl_seconds")? {
            app_config.session_ttl_seconds = value;
        }
        if let Some(value) = config_manager.get_optional::<Vec<String>>("auth.allowed_email_domains")? {
            app_config.allowed_email_domains = value;
        }
        if let Some(value) = config_manager.get_optional::<u32>("auth.password_hash_cost")? {
            app_config.password_hash_cost = value;
        }

        // 生产环境的签名密钥必须来自配置源
        if env_loader.is_production() {
            config_manager.validate_required_keys(&REQUIRED_PRODUCTION_KEYS)?;
        }

        // 验证配置
        ConfigValidator::new(env_loader.is_production()).validate_config(&app_config)?;

        // 非生产环境允许缺省密钥
        if app_config.secret_key.is_none() {
            warn!("auth.secret_key 未配置，使用开发密钥 / using development session secret");
            app_config.secret_key = Some(DEVELOPMENT_SECRET.to_string());
        }
        if app_config.token_secret.is_none() {
            warn!("auth.token_secret 未配置，使用开发密钥 / using development token secret");
            app_config.token_secret = Some(DEVELOPMENT_SECRET.to_string());
        }

        info!("配置加载和验证成功");
        debug!(
            "应用配置: {}:{} db={}",
            app_config.server_host,
            app_config.server_port,
            Self::mask_sensitive_info(&app_config.database_url)
        );

        Ok(app_config)
    }

    /// 获取应用配置
    pub fn get_app_config(&self) -> &AppConfiguration {
        &self.app_config
    }

    /// 取出应用配置
    pub fn into_app_config(self) -> AppConfiguration {
        self.app_config
    }

    /// 打印配置摘要
    pub fn print_config_summary(&self) {
        info!("=== 配置摘要 ===");
        info!("环境: {}", self.env_loader.get_environment());
        info!(
            "服务器: {}:{}",
            self.app_config.server_host, self.app_config.server_port
        );
        info!("工作线程: {:?}", self.app_config.server_workers);
        info!("调试模式: {}", self.app_config.server_debug);
        info!("日志级别: {}", self.app_config.logging_level);
        info!(
            "数据库: {}",
            Self::mask_sensitive_info(&self.app_config.database_url)
        );
        info!("token 有效期: {} 秒", self.app_config.token_ttl_seconds);
        info!("允许注册的邮箱域名: {:?}", self.app_config.allowed_email_domains);

        // 打印配置源信息
        self.config_manager.print_sources_info();
    }

    /// 屏蔽敏感信息
    pub fn mask_sensitive_info(url: &str) -> String {
        // 简单的密码屏蔽，查找://和@之间的内容
        if let Some(start) = url.find("://") {
            if let Some(at_pos) = url[start + 3..].find('@') {
                let mut result = url.to_string();
                let password_start = start + 3;
                let password_end = password_start + at_pos;

                // 查找用户名和密码分隔符
                if let Some(colon_pos) = url[password_start..password_end].find(':') {
                    let actual_colon_pos = password_start + colon_pos + 1;
                    result.replace_range(actual_colon_pos..password_end, "***");
                }
                return result;
            }
        }
        url.to_string()
    }
}
