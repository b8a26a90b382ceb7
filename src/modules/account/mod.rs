/// Account 模块
/// 注册、登录、退出、个人页、token 续期与密码重置

pub mod forms;
pub mod routes;

use crate::route_registry::{RouteInfo, RouteRegistry};

/// 注册account模块的路由
pub fn register_account_routes(registry: &mut RouteRegistry) {
    registry.register_route(RouteInfo::new(
        "account.pages",
        "账户相关页面",
        "account",
        routes::configure_account_routes,
    ));
}
