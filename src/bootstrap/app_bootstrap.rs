use actix_web::{http::header, middleware::DefaultHeaders, middleware::Logger, web, App, HttpServer};
use tracing::{error, info, instrument};

use crate::comm::config_validator::AppConfiguration;
use crate::db;
use crate::error::{AppError, AppResult};
use crate::repo::role_repo;
use crate::route_registry::RouteRegistry;
use crate::state::AppState;

/// 服务器监听配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub debug: bool,
}

impl AppConfig {
    pub fn from_configuration(config: &AppConfiguration) -> Self {
        Self {
            host: config.server_host.clone(),
            port: config.server_port,
            workers: config.server_workers,
            debug: config.server_debug,
        }
    }
}

/// 所有响应都带 `Cache-Control: private`
pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new().add((header::CACHE_CONTROL, "private"))
}

/// 应用启动器
pub struct AppBootstrap {
    settings: AppConfiguration,
    config: Option<AppConfig>,
    routes: RouteRegistry,
}

impl AppBootstrap {
    /// 创建新的应用启动器
    pub fn new(settings: AppConfiguration, routes: RouteRegistry) -> Self {
        Self {
            settings,
            config: None,
            routes,
        }
    }

    /// 设置主机地址
    pub fn with_host(mut self, host: String) -> Self {
        let mut config = self.effective_config();
        config.host = host;
        self.config = Some(config);
        self
    }

    /// 设置端口
    pub fn with_port(mut self, port: u16) -> Self {
        let mut config = self.effective_config();
        config.port = port;
        self.config = Some(config);
        self
    }

    /// 设置工作线程数
    pub fn with_workers(mut self, workers: usize) -> Self {
        let mut config = self.effective_config();
        config.workers = Some(workers);
        self.config = Some(config);
        self
    }

    fn effective_config(&self) -> AppConfig {
        self.config
            .clone()
            .unwrap_or_else(|| AppConfig::from_configuration(&self.settings))
    }

    /// 准备数据库：连接、建表、写入预置角色
    pub async fn prepare_state(settings: &AppConfiguration) -> AppResult<AppState> {
        let pool =
            db::connect_with_retry(&settings.database_url, settings.database_max_connections)
                .await?;
        db::create_all(&pool).await?;
        role_repo::insert_roles(&pool).await?;
        AppState::new(settings, pool)
    }

    /// 运行应用服务器
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let config = self.effective_config();
        info!("启动应用服务器，配置: {:?}", config);

        let state = web::Data::new(Self::prepare_state(&self.settings).await?);
        self.routes.print_routes_info();

        let server_result = self.start_http_server(config, state).await;
        match server_result {
            Ok(_) => {
                info!("服务器已停止");
                Ok(())
            }
            Err(e) => {
                error!("服务器启动失败: {}", e);
                Err(e)
            }
        }
    }

    /// 启动HTTP服务器
    async fn start_http_server(&self, config: AppConfig, state: web::Data<AppState>) -> AppResult<()> {
        let routes = self.routes.clone();

        let mut server = HttpServer::new(move || {
            let routes = routes.clone();
            App::new()
                .wrap(Logger::default())
                .wrap(default_headers())
                .app_data(state.clone())
                .configure(move |cfg| routes.configure_all_routes(cfg))
        });
        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        info!("服务器将在 {}:{} 上启动", config.host, config.port);
        server
            .bind((config.host.as_str(), config.port))
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
            .run()
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        Ok(())
    }
}
