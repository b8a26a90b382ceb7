use actix_web::web;
use std::collections::BTreeSet;
use tracing::info;

/// 路由配置函数类型
pub type RouteConfigFn = fn(&mut web::ServiceConfig);

/// 路由信息结构
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub name: String,
    pub description: String,
    pub module: String,
    pub config_fn: RouteConfigFn,
}

impl RouteInfo {
    pub fn new(name: &str, description: &str, module: &str, config_fn: RouteConfigFn) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            module: module.to_string(),
            config_fn,
        }
    }
}

/// 路由注册器
///
/// 按注册顺序配置，同名路由后注册者替换先注册者。
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<RouteInfo>,
}

impl RouteRegistry {
    /// 创建新的路由注册器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册路由
    pub fn register_route(&mut self, route_info: RouteInfo) {
        if let Some(existing) = self.routes.iter_mut().find(|r| r.name == route_info.name) {
            *existing = route_info;
        } else {
            self.routes.push(route_info);
        }
    }

    /// 获取指定模块的路由
    pub fn get_routes_by_module(&self, module: &str) -> Vec<&RouteInfo> {
        self.routes
            .iter()
            .filter(|route| route.module == module)
            .collect()
    }

    /// 配置所有路由到 ServiceConfig
    pub fn configure_all_routes(&self, cfg: &mut web::ServiceConfig) {
        for route_info in &self.routes {
            (route_info.config_fn)(cfg);
        }
    }

    /// 获取路由统计信息
    pub fn get_stats(&self) -> (usize, Vec<String>) {
        let modules: BTreeSet<String> = self.routes.iter().map(|r| r.module.clone()).collect();
        (self.routes.len(), modules.into_iter().collect())
    }

    /// 打印路由信息
    pub fn print_routes_info(&self) {
        let (total, modules) = self.get_stats();
        for module in &modules {
            let module_routes = self.get_routes_by_module(module);
            info!("模块: {} ({} 组路由)", module, module_routes.len());
            for route in module_routes {
                info!("  - {}: {}", route.name, route.description);
            }
        }
        info!("总计: {} 组路由", total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut web::ServiceConfig) {}

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = RouteRegistry::new();
        registry.register_route(RouteInfo::new("api", "REST API", "api", noop));
        registry.register_route(RouteInfo::new("pages", "页面", "base", noop));
        registry.register_route(RouteInfo::new("api", "REST API v2", "api", noop));

        let api = registry.get_routes_by_module("api");
        assert_eq!(api.len(), 1);
        assert_eq!(api[0].description, "REST API v2");
        assert_eq!(registry.get_routes_by_module("base")[0].name, "pages");
        assert_eq!(
            registry.get_stats(),
            (2, vec!["api".to_string(), "base".to_string()])
        );
    }
}
