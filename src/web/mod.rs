//! HTML 页面公共部分

pub mod flash;
pub mod templates;

use actix_web::{http::header::ContentType, HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};

use crate::error::AppResult;
use crate::model::User;
use crate::state::AppState;

/// 渲染页面，注入标题、当前用户与 flash 消息
pub fn render(
    state: &AppState,
    req: &HttpRequest,
    user: Option<&User>,
    template: &str,
    title: &str,
    data: Value,
) -> AppResult<HttpResponse> {
    let messages = flash::read(req);

    let mut context = Map::new();
    context.insert("app_name".into(), json!(state.app_name));
    context.insert("title".into(), json!(title));
    context.insert("flash".into(), json!(messages));
    context.insert(
        "current_user".into(),
        user.map(|u| json!({"id": u.id, "name": u.name, "email": u.email}))
            .unwrap_or(Value::Null),
    );
    if let Value::Object(extra) = data {
        context.extend(extra);
    }

    let body = state.templates.render(template, &Value::Object(context))?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if !messages.is_empty() {
        response.cookie(flash::clear());
    }
    Ok(response.body(body))
}
