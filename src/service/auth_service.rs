use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::token::{TokenError, TokenService};
use crate::error::{AppError, AppResult};
use crate::model::role::{QUOTE_ADMINS, QUOTE_USERS};
use crate::model::{Authenticatable, NewUser, Role, User};
use crate::repo::{role_repo, user_repo};

/// 注册信息
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// 注册结果
#[derive(Debug)]
pub enum RegisterOutcome {
    Created(User),
    /// 邮箱域名不在白名单，未写入任何数据
    DomainNotAllowed,
    EmailTaken,
}

/// 账户相关业务
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenService,
    hasher: PasswordHasher,
    allowed_email_domains: Vec<String>,
}

impl AuthService {
    pub fn new(
        pool: SqlitePool,
        tokens: TokenService,
        hasher: PasswordHasher,
        allowed_email_domains: Vec<String>,
    ) -> Self {
        Self {
            pool,
            tokens,
            hasher,
            allowed_email_domains,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// 邮箱是否以 `@<允许的域名>` 结尾（忽略大小写）
    pub fn is_allowed_email(&self, email: &str) -> bool {
        let email = email.trim().to_ascii_lowercase();
        self.allowed_email_domains.iter().any(|domain| {
            let suffix = format!("@{}", domain.trim().trim_start_matches('@').to_ascii_lowercase());
            email.ends_with(&suffix) && email.len() > suffix.len()
        })
    }

    /// 注册普通用户：分配 QUOTE_USERS 角色并签发初始 token
    pub async fn register(&self, registration: Registration) -> AppResult<RegisterOutcome> {
        if !self.is_allowed_email(&registration.email) {
            warn!(email = %registration.email, "注册邮箱域名不被允许");
            return Ok(RegisterOutcome::DomainNotAllowed);
        }

        if user_repo::find_by_email(&self.pool, &registration.email)
            .await?
            .is_some()
        {
            info!(email = %registration.email, "邮箱已被注册");
            return Ok(RegisterOutcome::EmailTaken);
        }

        let role = self.role_for_signup().await?;
        match self.create_user(registration, &role, false).await {
            Ok(user) => {
                info!(user_id = user.id, "新用户注册成功");
                Ok(RegisterOutcome::Created(user))
            }
            // 并发注册同一邮箱
            Err(AppError::Database(sqlx::Error::Database(e))) if e.is_unique_violation() => {
                Ok(RegisterOutcome::EmailTaken)
            }
            Err(e) => Err(e),
        }
    }

    /// 创建管理员账户，不校验邮箱域名
    pub async fn create_admin(&self, registration: Registration) -> AppResult<User> {
        if user_repo::find_by_email(&self.pool, &registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::validation("email", "Email is already in use."));
        }

        let role = role_repo::find_by_name(&self.pool, QUOTE_ADMINS)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow!("角色 {} 不存在，请先执行 create-db", QUOTE_ADMINS)))?;

        let user = self.create_user(registration, &role, true).await?;
        info!(user_id = user.id, "管理员账户已创建");
        Ok(user)
    }

    async fn role_for_signup(&self) -> AppResult<Role> {
        if let Some(role) = role_repo::find_by_name(&self.pool, QUOTE_USERS).await? {
            return Ok(role);
        }
        role_repo::find_default(&self.pool)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow!("没有可分配的角色，请先执行 create-db")))
    }

    /// 写入用户与初始 token，同一事务
    async fn create_user(&self, registration: Registration, role: &Role, is_admin: bool) -> AppResult<User> {
        let password_hash = self.hasher.hash(&registration.password).await?;
        let new_user = NewUser {
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            password_hash,
            role_id: role.id,
            is_admin,
        };

        let mut tx = self.pool.begin().await?;
        let id = user_repo::insert(&mut *tx, &new_user).await?;
        let token = self.tokens.issue(id)?;
        user_repo::update_token(&mut *tx, id, &token).await?;
        let user = user_repo::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow!("新建用户 {} 读取失败", id)))?;
        tx.commit().await?;

        Ok(user)
    }

    /// 邮箱 + 密码登录，失败返回 None
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = user_repo::find_by_email(&self.pool, email.trim()).await? else {
            info!("登录失败：用户不存在");
            return Ok(None);
        };

        if !user.is_active() {
            info!(user_id = user.auth_id(), "登录失败：账户未启用");
            return Ok(None);
        }

        if user.verify_password(&self.hasher, password).await? {
            info!(user_id = user.auth_id(), "登录成功");
            Ok(Some(user))
        } else {
            info!(user_id = user.auth_id(), "登录失败：密码错误");
            Ok(None)
        }
    }

    /// 签发新 token 并覆盖保存，旧 token 在过期前仍然有效
    pub async fn renew_token(&self, user_id: i64) -> AppResult<String> {
        let token = self.tokens.issue(user_id)?;
        if !user_repo::update_token(&self.pool, user_id, &token).await? {
            return Err(AppError::not_found("user"));
        }
        info!(user_id, "token 已更新");
        Ok(token)
    }

    pub async fn reset_password(&self, user_id: i64, password: &str) -> AppResult<()> {
        let password_hash = self.hasher.hash(password).await?;
        if !user_repo::update_password(&self.pool, user_id, &password_hash).await? {
            return Err(AppError::not_found("user"));
        }
        info!(user_id, "密码已重置");
        Ok(())
    }

    /// 解析 bearer token 对应的用户
    pub async fn resolve_token(&self, token: &str) -> AppResult<User> {
        let user_id = match self.tokens.verify(token) {
            Ok(user_id) => user_id,
            Err(TokenError::Expired) => {
                info!("valid token, but expired");
                return Err(TokenError::Expired.into());
            }
            Err(e) => {
                info!("invalid token entered");
                return Err(e.into());
            }
        };

        match user_repo::find_by_id(&self.pool, user_id).await? {
            Some(user) => Ok(user),
            None => {
                info!(user_id, "token 对应的用户不存在");
                Err(AppError::auth("Unauthorized Access"))
            }
        }
    }

    pub async fn find_user(&self, user_id: i64) -> AppResult<Option<User>> {
        user_repo::find_by_id(&self.pool, user_id).await
    }

    pub async fn role_of(&self, user: &User) -> AppResult<Option<Role>> {
        role_repo::find_by_id(&self.pool, user.role_id).await
    }
}
