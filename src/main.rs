use clap::ArgMatches;

use quote_app::comm::enhanced_config::EnhancedConfigManager;
use quote_app::comm::tracing::init_tracing;
use quote_app::{init_commands, init_routes, AppBootstrap, AppResult};

#[actix_web::main]
async fn main() {
    // 初始化所有模块的命令
    let commands = init_commands();

    // 构建命令行应用
    let matches: ArgMatches = commands.build_app().get_matches();

    let result = match matches.subcommand() {
        Some(("server", sub_matches)) => handle_server_command(sub_matches).await,
        Some(("version", _)) => {
            handle_version_command();
            Ok(())
        }
        Some((command_name, sub_matches)) => {
            // 尝试使用模块处理命令
            commands.handle_command(command_name, sub_matches).await
        }
        None => {
            // 这种情况不应该发生，因为我们设置了 subcommand_required(true)
            eprintln!("未知命令，请使用 --help 查看可用命令");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

fn handle_version_command() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

async fn handle_server_command(matches: &ArgMatches) -> AppResult<()> {
    // 创建并初始化增强的配置管理器
    let config_manager = EnhancedConfigManager::new()?;
    let mut app_config = config_manager.get_app_config().clone();

    // 命令行参数覆盖配置文件
    if matches.get_flag("debug") {
        app_config.server_debug = true;
        app_config.logging_level = "debug".to_string();
        app_config.logging_json_format = false;
    }

    // 初始化日志
    init_tracing(&app_config)?;

    // 打印配置摘要
    config_manager.print_config_summary();

    let mut bootstrap = AppBootstrap::new(app_config, init_routes());
    if let Some(host) = matches.get_one::<String>("host") {
        bootstrap = bootstrap.with_host(host.clone());
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        bootstrap = bootstrap.with_port(*port);
    }
    if let Some(workers) = matches.get_one::<usize>("workers") {
        bootstrap = bootstrap.with_workers(*workers);
    }

    // 启动应用
    bootstrap.run().await
}
