//! 一次性提示消息，保存在 URL 编码的 cookie 中，下一次渲染页面时读取并清除

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{http::header, HttpRequest, HttpResponse, HttpResponseBuilder};

pub const FLASH_COOKIE: &str = "flash";

/// 写入消息的 cookie
pub fn cookie(message: &str) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, urlencoding::encode(message).into_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .finish()
}

/// 读取当前请求携带的消息
///
/// actix 解析请求 cookie 时已做过一次百分号解码。
pub fn read(req: &HttpRequest) -> Vec<String> {
    req.cookie(FLASH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| vec![s])
        .unwrap_or_default()
}

/// 清除消息的 cookie
pub fn clear() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// 302 跳转，可继续追加 cookie
pub fn found(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}

pub fn redirect(location: &str) -> HttpResponse {
    found(location).finish()
}

/// 带提示消息的 302 跳转
pub fn redirect_with(location: &str, message: &str) -> HttpResponse {
    found(location).cookie(cookie(message)).finish()
}
