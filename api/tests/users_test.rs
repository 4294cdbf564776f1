//! Self-profile and admin account administration endpoints.

mod common;

use actix_web::test;
use serde_json::json;

use common::{bearer, TestBackend};
use cr_api::app::create_app;
use cr_core::domain::entities::user::Role;
use cr_core::repositories::UserRepository;

#[actix_rt::test]
async fn me_requires_authentication() {
    let backend = TestBackend::new();
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_rt::test]
async fn me_reads_and_updates_own_profile() {
    let backend = TestBackend::new();
    let (_, token) = backend.seed_user("alice", Role::User).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({"bio": "I review films", "first_name": "Alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["bio"], "I review films");
    assert_eq!(body["first_name"], "Alice");
}

#[actix_rt::test]
async fn self_update_cannot_escalate_role() {
    let backend = TestBackend::new();
    let (alice, token) = backend.seed_user("alice", Role::User).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({"role": "admin"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "user");

    // The stored role is untouched as well
    let stored = backend.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::User);
}

#[actix_rt::test]
async fn user_administration_is_admin_only() {
    let backend = TestBackend::new();
    let (_, user_token) = backend.seed_user("plain", Role::User).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&user_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/plain")
        .insert_header(bearer(&user_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);
}

#[actix_rt::test]
async fn admin_manages_accounts_and_roles() {
    let backend = TestBackend::new();
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    backend.seed_user("bob", Role::User).await;
    let app = test::init_service(create_app(backend.state())).await;

    // List includes both accounts
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Promote bob to moderator
    let req = test::TestRequest::patch()
        .uri("/api/v1/users/bob")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"role": "moderator"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "moderator");

    // Create an account with an explicit role
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "username": "carol",
            "email": "carol@example.com",
            "role": "moderator"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Unknown role names are rejected
    let req = test::TestRequest::patch()
        .uri("/api/v1/users/bob")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"role": "wizard"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Delete carol
    let req = test::TestRequest::delete()
        .uri("/api/v1/users/carol")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/carol")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn unknown_username_is_404_for_admin() {
    let backend = TestBackend::new();
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/nobody")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
