use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::auth::SessionUser;
use crate::error::AppResult;
use crate::modules::account::forms::{ResetPasswordForm, SigninForm, SignupForm};
use crate::service::{RegisterOutcome, Registration};
use crate::state::AppState;
use crate::web::{flash, render};

#[get("/signup")]
pub async fn signup_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "auth/signup", "Sign up", json!({}))
}

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
    form: web::Form<SignupForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let refill = json!({"name": form.name, "email": form.email});

    let errors = form.validate();
    if !errors.is_empty() {
        return render(
            &state,
            &req,
            user.0.as_ref(),
            "auth/signup",
            "Sign up",
            json!({"form": refill, "errors": errors}),
        );
    }

    let registration = Registration {
        name: form.name,
        email: form.email,
        password: form.password,
    };
    match state.auth.register(registration).await? {
        RegisterOutcome::Created(_) => Ok(flash::redirect_with(
            "/signin",
            "You have successfully registered! You may now login.",
        )),
        RegisterOutcome::DomainNotAllowed => Ok(flash::redirect_with(
            "/",
            "Sorry, We are not accepting users at this time.",
        )),
        RegisterOutcome::EmailTaken => render(
            &state,
            &req,
            user.0.as_ref(),
            "auth/signup",
            "Sign up",
            json!({"form": refill, "errors": ["Email is already in use."]}),
        ),
    }
}

#[get("/signin")]
pub async fn signin_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "auth/signin", "Sign in", json!({}))
}

/// 登录成功写入会话，不重新签发 API token
#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
    form: web::Form<SigninForm>,
) -> AppResult<HttpResponse> {
    let refill = json!({"email": form.email});

    let mut errors = form.validate();
    if errors.is_empty() {
        if let Some(user) = state.auth.authenticate(&form.email, &form.password).await? {
            let session = state.sessions.start(user.id)?;
            return Ok(flash::found("/").cookie(session).finish());
        }
        errors.push("Invalid email or password.".to_string());
    }

    render(
        &state,
        &req,
        user.0.as_ref(),
        "auth/signin",
        "Sign in",
        json!({"form": refill, "errors": errors}),
    )
}

#[get("/signout")]
pub async fn signout(state: web::Data<AppState>, user: SessionUser) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };
    info!(user_id = user.id, "用户退出登录");
    Ok(flash::found("/signin")
        .cookie(state.sessions.end())
        .cookie(flash::cookie("You have successfully been signed out."))
        .finish())
}

#[get("/profile")]
pub async fn profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };

    let role = state.auth.role_of(&user).await?;
    let role_name = role.as_ref().map(|r| r.name.clone()).unwrap_or_default();
    let is_administrator = role.as_ref().is_some_and(|r| user.is_administrator(r));

    render(
        &state,
        &req,
        Some(&user),
        "auth/profile",
        "Profile",
        json!({
            "user": user,
            "role": role_name,
            "is_administrator": is_administrator,
            "token": user.token.clone().unwrap_or_default(),
        }),
    )
}

/// 重新签发 API token 后回到个人页
#[get("/renew")]
pub async fn renew(state: web::Data<AppState>, user: SessionUser) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };
    state.auth.renew_token(user.id).await?;
    Ok(flash::redirect("/profile"))
}

/// 仅展示说明页，不发送邮件
#[get("/forgot")]
pub async fn forgot_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "auth/forgot", "Forgot password", json!({}))
}

#[post("/forgot")]
pub async fn forgot(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    render(&state, &req, user.0.as_ref(), "auth/forgot", "Forgot password", json!({}))
}

#[get("/passwordreset")]
pub async fn password_reset_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };
    render(&state, &req, Some(&user), "auth/reset", "Reset password", json!({}))
}

/// 重置当前会话用户的密码，并要求重新登录
#[post("/passwordreset")]
pub async fn password_reset(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: SessionUser,
    form: web::Form<ResetPasswordForm>,
) -> AppResult<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(flash::redirect("/signin"));
    };

    let errors = form.validate();
    if !errors.is_empty() {
        return render(
            &state,
            &req,
            Some(&user),
            "auth/reset",
            "Reset password",
            json!({"errors": errors}),
        );
    }

    state.auth.reset_password(user.id, &form.password).await?;
    Ok(flash::found("/signin")
        .cookie(state.sessions.end())
        .cookie(flash::cookie(
            "You have successfully reset your password. Please signin.",
        ))
        .finish())
}

pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup_page)
        .service(signup)
        .service(signin_page)
        .service(signin)
        .service(signout)
        .service(profile)
        .service(renew)
        .service(forgot_page)
        .service(forgot)
        .service(password_reset_page)
        .service(password_reset);
}
