use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use tracing::info;

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },
    #[error("配置项 '{key}' 不存在")]
    KeyNotFound { key: String },
    #[error("配置项 '{key}' 类型转换失败: {message}")]
    TypeConversionError { key: String, message: String },
    #[error("配置初始化失败: {message}")]
    InitializationError { message: String },
}

/// 配置数据源信息
#[derive(Debug, Clone)]
pub struct ConfigSourceInfo {
    pub source_type: String,
    pub description: String,
    pub priority: u8,
    pub loaded: bool,
}

/// 配置管理器
///
/// 按添加顺序叠加配置源，后添加者优先生效。
pub struct ConfigManager {
    config: Config,
    sources_info: Vec<ConfigSourceInfo>,
}

impl ConfigManager {
    /// 使用指定的配置源创建配置管理器
    pub fn with_sources(sources: Vec<ConfigSource>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        let mut sources_info = Vec::new();

        for (index, source) in sources.into_iter().enumerate() {
            let priority = (index + 1) as u8;
            let source_info = source.get_source_info(priority);

            // 对于文件源，检查文件是否存在
            if let ConfigSource::File { path, required, .. } = &source {
                let file_exists = std::path::Path::new(path).exists();
                if !file_exists && *required {
                    return Err(ConfigError::FileNotFound { path: path.clone() });
                }
                if !file_exists {
                    // 可选文件不存在，记录但不添加
                    sources_info.push(source_info);
                    continue;
                }
            }

            builder = source.add_to_builder(builder);
            sources_info.push(ConfigSourceInfo {
                loaded: true,
                ..source_info
            });
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::InitializationError {
                message: format!("构建配置失败: {}", e),
            })?;
        Ok(Self {
            config,
            sources_info,
        })
    }

    /// 获取配置值，区分"不存在"与"类型错误"
    pub fn get_safe<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.config.get(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::KeyNotFound {
                key: key.to_string(),
            },
            other => ConfigError::TypeConversionError {
                key: key.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// 读取可选配置项，不存在时返回 `None`，类型错误时报错
    pub fn get_optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get_safe(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::KeyNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 检查配置项是否存在
    pub fn exists(&self, key: &str) -> bool {
        self.config.get::<config::Value>(key).is_ok()
    }

    /// 获取配置源统计信息
    pub fn get_sources_stats(&self) -> (usize, usize, usize) {
        let total = self.sources_info.len();
        let loaded = self.sources_info.iter().filter(|info| info.loaded).count();
        (total, loaded, total - loaded)
    }

    /// 打印配置源详细信息
    pub fn print_sources_info(&self) {
        for (index, info) in self.sources_info.iter().enumerate() {
            let status = if info.loaded { "✓ 已加载" } else { "✗ 跳过" };
            info!(
                "配置源 {}. {} - {} (优先级: {}) {}",
                index + 1,
                info.source_type,
                status,
                info.priority,
                info.description
            );
        }

        let (total, loaded, skipped) = self.get_sources_stats();
        info!(
            "统计: 总计 {} 个配置源，加载 {} 个，跳过 {} 个",
            total, loaded, skipped
        );
    }

    /// 验证必需的配置项
    pub fn validate_required_keys(&self, required_keys: &[&str]) -> Result<(), ConfigError> {
        for key in required_keys {
            if !self.exists(key) {
                return Err(ConfigError::KeyNotFound {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// 配置源类型
pub enum ConfigSource {
    /// 文件配置源
    File {
        path: String,
        format: Option<FileFormat>,
        required: bool,
    },
    /// 环境变量配置源
    Env {
        prefix: String,
        separator: &'static str,
    },
    /// 字符串配置源
    String { content: String, format: FileFormat },
}

impl ConfigSource {
    /// 获取配置源信息
    pub fn get_source_info(&self, priority: u8) -> ConfigSourceInfo {
        match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => ConfigSourceInfo {
                source_type: "File".to_string(),
                description: format!(
                    "文件配置源: {} (格式: {}, 必需: {})",
                    path,
                    format.as_ref().map(format_name).unwrap_or("Auto-detect"),
                    required
                ),
                priority,
                loaded: false,
            },
            ConfigSource::Env { prefix, separator } => ConfigSourceInfo {
                source_type: "Environment".to_string(),
                description: format!("环境变量配置源: 前缀={}, 分隔符={}", prefix, separator),
                priority,
                loaded: false,
            },
            ConfigSource::String { format, .. } => ConfigSourceInfo {
                source_type: "String".to_string(),
                description: format!("字符串配置源: 格式={}", format_name(format)),
                priority,
                loaded: false,
            },
        }
    }

    pub fn add_to_builder(
        self,
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigBuilder<config::builder::DefaultState> {
        match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => {
                let file_source = match format {
                    Some(format) => File::with_name(&path).format(format),
                    None => File::with_name(&path),
                };
                builder.add_source(file_source.required(required))
            }
            ConfigSource::Env { prefix, separator } => builder.add_source(
                Environment::with_prefix(&prefix)
                    .prefix_separator("_")
                    .separator(separator)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_email_domains")
                    .try_parsing(true)
                    .ignore_empty(true),
            ),
            ConfigSource::String { content, format } => {
                builder.add_source(File::from_str(&content, format))
            }
        }
    }
}

fn format_name(format: &FileFormat) -> &'static str {
    match format {
        FileFormat::Toml => "TOML",
        FileFormat::Json => "JSON",
        FileFormat::Yaml => "YAML",
        _ => "Other",
    }
}
