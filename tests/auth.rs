use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::json;
use taskvault::auth::TokenKeys;
use taskvault::routes;
use taskvault::state::AppState;
use taskvault::store::memory::{MemoryAccountStore, MemoryTaskStore};

const TEST_SECRET: &str = "integration-test-secret";

fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryAccountStore::new()),
        Arc::new(MemoryTaskStore::new()),
    )
}

macro_rules! test_app {
    ($state:expr, $keys:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($keys.clone()))
                .service(routes::health::health)
                .service(web::scope("/api").configure(routes::config)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_register_returns_account_without_hash() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "email": "Ann@X.Com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "ann@x.com", "email is normalized to lowercase");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[actix_rt::test]
async fn test_register_validation_failures() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    for payload in [
        json!({ "name": "", "email": "ann@x.com", "password": "secret1" }),
        json!({ "name": "Ann", "email": "not-an-email", "password": "secret1" }),
        json!({ "name": "Ann", "email": "ann@x.com", "password": "hunt" }),
        json!({ "email": "ann@x.com", "password": "secret1" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "payload should be rejected: {}", payload);
    }
}

#[actix_rt::test]
async fn test_duplicate_email_any_case_conflicts() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Another Ann",
            "email": "ANN@X.COM",
            "password": "different1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_rt::test]
async fn test_register_then_login_yields_matching_token() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let account: serde_json::Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "ann@x.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;

    let token = body["token"].as_str().expect("token should be a string");
    assert!(!token.is_empty());

    // The token's subject is the registered account's id.
    let claims = keys.verify(token).unwrap();
    assert_eq!(claims.sub.to_string(), account["id"].as_str().unwrap());
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // Wrong password for a registered email.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ann@x.com", "password": "secret2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let wrong_password_body: serde_json::Value = test::read_body_json(resp).await;

    // Email that was never registered.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let unknown_email_body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(
        wrong_password_body, unknown_email_body,
        "wrong-password and unknown-email responses must match"
    );
    assert_eq!(wrong_password_body["error"], "invalid credentials");
}

#[actix_rt::test]
async fn test_login_with_case_variant_email() {
    let state = test_state();
    let keys = TokenKeys::new(TEST_SECRET, 24);
    let app = test_app!(state, keys);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "Ann@X.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}
