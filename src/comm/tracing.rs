use anyhow::{anyhow, Result};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::comm::config_validator::AppConfiguration;

/// 初始化日志
///
/// `RUST_LOG` 优先，其次使用 `logging.level`。
pub fn init_tracing(config: &AppConfiguration) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},sqlx=warn", config.logging_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // actix Logger 走 log 门面
    LogTracer::init().ok();

    if config.logging_json_format {
        let formatting_layer = BunyanFormattingLayer::new(config.app_name.clone(), std::io::stdout);
        let subscriber = Registry::default()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(formatting_layer);
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow!("设置日志订阅器失败: {}", e))?;
    } else {
        let subscriber = Registry::default()
            .with(env_filter)
            .with(fmt::layer().compact().with_target(false));
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow!("设置日志订阅器失败: {}", e))?;
    }
    Ok(())
}
