use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::command_registry::CommandModule;
use crate::comm::enhanced_config::EnhancedConfigManager;
use crate::db;
use crate::error::{AppError, AppResult};
use crate::repo::role_repo;
use crate::service::{AuthService, Registration};
use crate::state::AppState;

/// 数据库管理命令
pub struct DbCommands;

impl DbCommands {
    async fn open_state() -> AppResult<AppState> {
        let config = EnhancedConfigManager::new()?.into_app_config();
        let pool = db::connect(&config.database_url, config.database_max_connections).await?;
        AppState::new(&config, pool)
    }
}

/// 读取必填参数
fn required<'a>(matches: &'a ArgMatches, name: &str) -> AppResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(name, "参数不能为空"))
}

async fn create_admin(auth: &AuthService, matches: &ArgMatches) -> AppResult<()> {
    let registration = Registration {
        name: required(matches, "name")?.to_string(),
        email: required(matches, "email")?.to_string(),
        password: required(matches, "password")?.to_string(),
    };
    let user = auth.create_admin(registration).await?;
    println!("管理员已创建: {} <{}> (id={})", user.name, user.email, user.id);
    Ok(())
}

#[async_trait]
impl CommandModule for DbCommands {
    fn module_name(&self) -> &'static str {
        "base"
    }

    fn register_commands(&self) -> Vec<Command> {
        vec![
            Command::new("create-db").about("创建数据表并写入预置角色"),
            Command::new("drop-db").about("删除全部数据表"),
            Command::new("create-admin")
                .about("创建管理员账户")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .env("ADMIN_EMAIL")
                        .help("管理员邮箱")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .env("ADMIN_USER")
                        .help("管理员名称")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .env("ADMIN_PASSWORD")
                        .hide_env_values(true)
                        .help("管理员密码")
                        .required(true),
                ),
        ]
    }

    async fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> AppResult<()> {
        let state = Self::open_state().await?;
        match command_name {
            "create-db" => {
                println!("正在创建数据库...");
                db::create_all(&state.pool).await?;
                role_repo::insert_roles(&state.pool).await?;
                println!("数据库已创建，预置角色已写入");
            }
            "drop-db" => {
                println!("正在删除数据库...");
                db::drop_all(&state.pool).await?;
                println!("数据表已删除");
            }
            "create-admin" => {
                println!("正在创建管理员...");
                create_admin(&state.auth, matches).await?;
            }
            _ => {
                return Err(AppError::validation("command", format!("未知命令: {}", command_name)));
            }
        }
        Ok(())
    }
}
