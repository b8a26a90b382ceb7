use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 命令注册器trait，各模块实现此trait来注册命令
#[async_trait]
pub trait CommandModule: Send + Sync {
    /// 获取模块名称
    fn module_name(&self) -> &'static str;

    /// 注册模块的子命令
    fn register_commands(&self) -> Vec<Command>;

    /// 处理模块命令
    async fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> AppResult<()>;
}

/// 命令注册器
#[derive(Default)]
pub struct CommandRegistry {
    modules: Vec<Box<dyn CommandModule>>,
}

impl CommandRegistry {
    /// 创建新的命令注册器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模块
    pub fn register_module(&mut self, module: Box<dyn CommandModule>) {
        self.modules.push(module);
    }

    /// 构建完整的命令行应用
    pub fn build_app(&self) -> Command {
        let mut app = Command::new("quote-app")
            .version(env!("CARGO_PKG_VERSION"))
            .about("名言网站与 REST API")
            .subcommand_required(true)
            .arg_required_else_help(true);

        // 添加内置的server命令
        app = app.subcommand(
            Command::new("server")
                .about("启动 Web 服务器")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("设置服务器主机地址，默认读取配置"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("设置服务器端口，默认读取配置")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .value_name("WORKERS")
                        .help("设置工作线程数，默认读取配置")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("debug")
                        .short('d')
                        .long("debug")
                        .help("启用调试模式")
                        .action(clap::ArgAction::SetTrue),
                ),
        );

        // 添加内置的version命令
        app = app.subcommand(Command::new("version").about("显示版本信息"));

        // 添加各模块注册的命令
        for module in &self.modules {
            for command in module.register_commands() {
                app = app.subcommand(command);
            }
        }

        app
    }

    /// 处理命令
    pub async fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> AppResult<()> {
        // 查找对应的模块来处理命令
        for module in &self.modules {
            if module
                .register_commands()
                .iter()
                .any(|command| command.get_name() == command_name)
            {
                debug!(module = module.module_name(), command = command_name, "分发模块命令");
                return module.handle_command(command_name, matches).await;
            }
        }

        Err(AppError::validation(
            "command",
            format!("未找到处理命令 '{}' 的模块", command_name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoModule;

    #[async_trait]
    impl CommandModule for EchoModule {
        fn module_name(&self) -> &'static str {
            "echo"
        }

        fn register_commands(&self) -> Vec<Command> {
            vec![Command::new("echo")]
        }

        async fn handle_command(&self, _: &str, _: &ArgMatches) -> AppResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_app_includes_modules() {
        let mut registry = CommandRegistry::new();
        registry.register_module(Box::new(EchoModule));

        let app = registry.build_app();
        let names: Vec<_> = app.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, vec!["server", "version", "echo"]);

        let matches = registry
            .build_app()
            .try_get_matches_from(["quote-app", "server", "--port", "8080"])
            .unwrap();
        let (_, server) = matches.subcommand().unwrap();
        assert_eq!(server.get_one::<u16>("port"), Some(&8080));
    }

    #[tokio::test]
    async fn test_dispatch() {
        let mut registry = CommandRegistry::new();
        registry.register_module(Box::new(EchoModule));
        let matches = ArgMatches::default();

        assert!(registry.handle_command("echo", &matches).await.is_ok());
        assert!(registry.handle_command("missing", &matches).await.is_err());
    }
}
