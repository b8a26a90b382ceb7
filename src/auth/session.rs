use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;
use tracing::debug;

use crate::auth::token::{TokenError, TokenService, SESSION_AUDIENCE};

/// 会话 cookie 名称
pub const SESSION_COOKIE: &str = "session";

/// 基于签名 cookie 的浏览器会话
#[derive(Clone)]
pub struct SessionManager {
    tokens: TokenService,
}

impl SessionManager {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            tokens: TokenService::new(secret, SESSION_AUDIENCE, ttl_seconds),
        }
    }

    /// 登录成功后写入的 cookie
    pub fn start(&self, user_id: i64) -> Result<Cookie<'static>, TokenError> {
        let value = self.tokens.issue(user_id)?;
        Ok(Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(self.tokens.default_ttl() as i64))
            .finish())
    }

    /// 当前请求的用户 id；缺失、过期或被篡改的 cookie 都视为匿名
    pub fn current_user_id(&self, req: &HttpRequest) -> Option<i64> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        match self.tokens.verify(cookie.value()) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                debug!("忽略无效会话 cookie: {}", e);
                None
            }
        }
    }

    /// 清除会话的 cookie
    pub fn end(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}
