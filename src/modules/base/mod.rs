/// Base 模块
/// 首页等公共页面与数据库管理命令

pub mod cmd {
    #[path = "cmd.rs"]
    mod commands;
    pub use commands::*;
}
pub mod routes;

use crate::command_registry::CommandRegistry;
use crate::route_registry::{RouteInfo, RouteRegistry};

/// 注册base模块的路由
pub fn register_base_routes(registry: &mut RouteRegistry) {
    registry.register_route(RouteInfo::new(
        "base.pages",
        "首页、关于、联系与测试页",
        "base",
        routes::configure_base_routes,
    ));
}

/// 注册base模块的命令
pub fn register_base_commands(registry: &mut CommandRegistry) {
    registry.register_module(Box::new(cmd::DbCommands));
}
