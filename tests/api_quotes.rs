#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, register, test_state};
use quote_app::auth::TokenError;

#[actix_web::test]
async fn test_list_is_public_and_private_cached() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/quotes/all").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("Cache-Control").unwrap(), "private");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"quotes": []}));
}

#[actix_web::test]
async fn test_protected_routes_reject_missing_or_bad_token() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/quotes?quote_id=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized Access");

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .set_json(json!({"quote_text": "x", "character": "y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.quotes.list().await.unwrap().len(), 0);
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let token = state.auth.tokens().generate(user.id, 0).unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    assert_eq!(state.auth.tokens().verify(&token), Err(TokenError::Expired));

    for req in [
        test::TestRequest::get().uri("/api/v1/quotes?quote_id=1"),
        test::TestRequest::get().uri("/api/v1/auth/renew"),
    ] {
        let req = req
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Unauthorized Access");
    }

    // 续期失败时库中 token 保持不变
    let stored = state.auth.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.token, user.token);
}

#[actix_web::test]
async fn test_create_then_get() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_text": "To be or not to be", "character": "Hamlet"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["quote"]["id"].as_i64().unwrap();
    assert_eq!(body["quote"]["character"], "Hamlet");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/quotes?quote_id={}", id))
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"quote": [{"id": id, "quote_text": "To be or not to be", "character": "Hamlet"}]})
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/quotes/all").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["quotes"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_requires_both_fields() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_text": "Orphan line"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.quotes.list().await.unwrap().len(), 0);

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_get_missing_quote() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/quotes?quote_id=999")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Sorry, quote ID: 999 Not Found");

    let req = test::TestRequest::get()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_partial_update() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_text": "Hello there", "character": "Obi-Wan"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["quote"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_id": id, "character": "Ben Kenobi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], format!("Quote {} Updated", id));

    let quote = state.quotes.get(id).await.unwrap();
    assert_eq!(quote.quote_text, "Hello there");
    assert_eq!(quote.character, "Ben Kenobi");
}

#[actix_web::test]
async fn test_update_missing_quote_is_unauthorized() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_id": 42, "quote_text": "Nobody home"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "QUOTE WAS NOT FOUND");
}

#[actix_web::test]
async fn test_delete_then_delete_again() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/quotes")
        .insert_header(bearer(&user))
        .set_json(json!({"quote_text": "I'll be back", "character": "Terminator"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["quote"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/quotes?quote_id={}", id);
    let req = test::TestRequest::delete().uri(&uri).insert_header(bearer(&user)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], format!("{} Deleted", id));

    let req = test::TestRequest::delete().uri(&uri).insert_header(bearer(&user)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Something went wrong. Missing quote_id?");
}

#[actix_web::test]
async fn test_renew_issues_working_token() {
    let state = test_state().await;
    let user = register(&state, "ada@example.com").await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/renew")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let stored = state.auth.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.token.as_deref(), Some(token.as_str()));

    // 旧 token 未被吊销
    for credential in [token, user.token.clone().unwrap()] {
        let req = test::TestRequest::get()
            .uri("/api/v1/quotes?quote_id=1")
            .insert_header(("Authorization", format!("Bearer {}", credential)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_openapi_document_served() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api-doc/openapi.json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["paths"]["/api/v1/quotes/all"].is_object());
}
