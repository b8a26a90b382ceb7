pub mod api;
#[path = "bootstrap/app_bootstrap.rs"]
pub mod app_bootstrap;
pub mod auth;
#[path = "bootstrap/command_registry.rs"]
pub mod command_registry;
pub mod comm;
pub mod db;
pub mod error;
pub mod model;
pub mod repo;
#[path = "bootstrap/route_registry.rs"]
pub mod route_registry;
pub mod service;
pub mod state;
pub mod web;

// Modules
pub mod modules;

use crate::command_registry::CommandRegistry;
use crate::route_registry::{RouteInfo, RouteRegistry};

/// 初始化所有模块的命令
pub fn init_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    // 注册base模块的命令
    modules::base::register_base_commands(&mut registry);
    registry
}

/// 初始化所有模块的路由
pub fn init_routes() -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    registry.register_route(RouteInfo::new(
        "api.v1",
        "名言 REST API 与 token 续期",
        "api",
        api::configure,
    ));
    registry.register_route(RouteInfo::new(
        "api.docs",
        "OpenAPI 文档与 Swagger UI",
        "api",
        api::configure_docs,
    ));
    // 注册base模块的路由
    modules::base::register_base_routes(&mut registry);
    modules::account::register_account_routes(&mut registry);
    registry
}

/// 配置全部路由，供服务器与集成测试共用
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    init_routes().configure_all_routes(cfg);
}

// Re-export bootstrap modules
pub use app_bootstrap::{default_headers, AppBootstrap, AppConfig};
pub use error::{AppError, AppResult};
pub use state::AppState;
