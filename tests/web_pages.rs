#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{cookie, location, register, test_state, PASSWORD};
use quote_app::model::role::QUOTE_USERS;
use quote_app::model::NewQuote;
use quote_app::repo::user_repo;

async fn body_text<B: actix_web::body::MessageBody>(resp: actix_web::dev::ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_index_placeholder_and_random_quote() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("no_quotes"));
    assert!(html.contains("admin"));

    state
        .quotes
        .create(&NewQuote {
            quote_text: Some("May the Force be with you".to_string()),
            character: Some("Han Solo".to_string()),
        })
        .await
        .unwrap();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let html = body_text(resp).await;
    assert!(html.contains("May the Force be with you"));
    assert!(html.contains("Han Solo"));
}

#[actix_web::test]
async fn test_static_pages_render() {
    let state = test_state().await;
    let app = test_app!(state);

    for uri in ["/about", "/contact", "/signup", "/signin", "/forgot"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }

    let req = test::TestRequest::post().uri("/forgot").set_form([("email", "ada@example.com")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_anonymous_redirected_to_signin() {
    let state = test_state().await;
    let app = test_app!(state);

    for uri in ["/test", "/profile", "/renew", "/signout", "/passwordreset"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{}", uri);
        assert_eq!(location(&resp), "/signin");
    }
}

#[actix_web::test]
async fn test_signup_foreign_domain_creates_nothing() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("name", "Mallory"),
            ("email", "mallory@elsewhere.org"),
            ("password", "abc123"),
            ("confirm_password", "abc123"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    assert!(cookie(&resp, "flash").is_some());
    assert_eq!(user_repo::count(&state.pool).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_signup_creates_user_with_token() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("password", "abc123"),
            ("confirm_password", "abc123"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/signin");

    let user = user_repo::find_by_email(&state.pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.token.is_some());
    let role = state.auth.role_of(&user).await.unwrap().unwrap();
    assert_eq!(role.name, QUOTE_USERS);

    // 重复注册留在表单页
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("password", "abc123"),
            ("confirm_password", "abc123"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Email is already in use."));
    assert_eq!(user_repo::count(&state.pool).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_signin_profile_and_signout() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/signin")
        .set_form([("email", "ada@example.com"), ("password", "wrong")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Invalid email or password."));

    let req = test::TestRequest::post()
        .uri("/signin")
        .set_form([("email", "ada@example.com"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let session = cookie(&resp, "session").unwrap();

    let req = test::TestRequest::get().uri("/profile").cookie(session.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("ada@example.com"));
    assert!(html.contains(user.token.as_deref().unwrap()));

    let req = test::TestRequest::get().uri("/test").cookie(session.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(body_text(resp).await.contains("This is a secret page"));

    let req = test::TestRequest::get().uri("/signout").cookie(session).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/signin");
    assert_eq!(cookie(&resp, "session").unwrap().value(), "");
}

#[actix_web::test]
async fn test_renew_from_profile_replaces_stored_token() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);
    let session = state.sessions.start(user.id).unwrap();

    // 保证新 token 的签发时间不同
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let req = test::TestRequest::get().uri("/renew").cookie(session).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile");

    let stored = state.auth.find_user(user.id).await.unwrap().unwrap();
    assert_ne!(stored.token, user.token);
}

#[actix_web::test]
async fn test_password_reset() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);
    let session = state.sessions.start(user.id).unwrap();

    let req = test::TestRequest::post()
        .uri("/passwordreset")
        .cookie(session.clone())
        .set_form([("password", "new-pass"), ("confirm_password", "mismatch")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Passwords must match."));

    let req = test::TestRequest::post()
        .uri("/passwordreset")
        .cookie(session)
        .set_form([("password", "new-pass"), ("confirm_password", "new-pass")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/signin");
    assert_eq!(cookie(&resp, "session").unwrap().value(), "");

    assert!(state.auth.authenticate("ada@example.com", PASSWORD).await.unwrap().is_none());
    assert!(state.auth.authenticate("ada@example.com", "new-pass").await.unwrap().is_some());
}

#[actix_web::test]
async fn test_flash_shown_once() {
    let state = test_state().await;
    let app = test_app!(state);

    let message = "You have successfully been signed out.";
    let sent = quote_app::web::flash::cookie(message);
    let req = test::TestRequest::get()
        .uri("/about")
        .insert_header(("Cookie", format!("flash={}", sent.value())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(cookie(&resp, "flash").unwrap().value(), "");
    assert!(body_text(resp).await.contains(message));
}
