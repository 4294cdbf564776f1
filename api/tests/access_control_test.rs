//! Role-based access control across catalog, review, and comment endpoints.

mod common;

use actix_web::test;
use serde_json::json;

use common::{bearer, TestBackend};
use cr_api::app::create_app;
use cr_core::domain::entities::user::{Role, User};
use cr_core::repositories::UserRepository;

#[actix_rt::test]
async fn catalog_mutation_is_admin_only() {
    let backend = TestBackend::new();
    let (_, user_token) = backend.seed_user("plain", Role::User).await;
    let (_, mod_token) = backend.seed_user("mod", Role::Moderator).await;
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    let payload = json!({"name": "Films", "slug": "films"});

    // Anonymous: 401
    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    // Regular user and moderator: 403
    for token in [&user_token, &mod_token] {
        let req = test::TestRequest::post()
            .uri("/api/v1/categories")
            .insert_header(bearer(token))
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    // Admin: created
    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(bearer(&admin_token))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    // Reads stay public
    let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn superuser_counts_as_admin() {
    let backend = TestBackend::new();
    let mut root = User::new("root", "root@example.com");
    root.is_superuser = true;
    let root = backend.users.create(root).await.unwrap();
    let token = backend.tokens.issue(&root).unwrap().token;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/genres")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Drama", "slug": "drama"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);
}

#[actix_rt::test]
async fn review_ownership_matrix() {
    let backend = TestBackend::new();
    let (_, alice_token) = backend.seed_user("alice", Role::User).await;
    let (_, bob_token) = backend.seed_user("bob", Role::User).await;
    let (_, mod_token) = backend.seed_user("mod", Role::Moderator).await;
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    // Admin sets up a title
    let req = test::TestRequest::post()
        .uri("/api/v1/titles")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"name": "Alien", "year": 1979}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let title: serde_json::Value = test::read_body_json(resp).await;
    let title_id = title["id"].as_str().unwrap().to_string();

    // Alice posts a review
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/titles/{title_id}/reviews"))
        .insert_header(bearer(&alice_token))
        .set_json(json!({"text": "a classic", "score": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let review: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(review["author"], "alice");
    let review_id = review["id"].as_str().unwrap().to_string();
    let review_uri = format!("/api/v1/titles/{title_id}/reviews/{review_id}");

    // Anonymous users may read it
    let req = test::TestRequest::get().uri(&review_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // Bob may not delete Alice's review
    let req = test::TestRequest::delete()
        .uri(&review_uri)
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    // Bob may not edit it either
    let req = test::TestRequest::patch()
        .uri(&review_uri)
        .insert_header(bearer(&bob_token))
        .set_json(json!({"score": 1}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    // Alice edits her own review
    let req = test::TestRequest::patch()
        .uri(&review_uri)
        .insert_header(bearer(&alice_token))
        .set_json(json!({"score": 9}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // A moderator deletes it despite not owning it
    let req = test::TestRequest::delete()
        .uri(&review_uri)
        .insert_header(bearer(&mod_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);
}

#[actix_rt::test]
async fn one_review_per_title_per_user() {
    let backend = TestBackend::new();
    let (_, alice_token) = backend.seed_user("alice", Role::User).await;
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/titles")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"name": "Alien", "year": 1979}))
        .to_request();
    let title: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let title_id = title["id"].as_str().unwrap().to_string();

    let post_review = |score: i32| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/titles/{title_id}/reviews"))
            .insert_header(bearer(&alice_token))
            .set_json(json!({"text": "thoughts", "score": score}))
            .to_request()
    };

    assert_eq!(test::call_service(&app, post_review(8)).await.status(), 201);
    let resp = test::call_service(&app, post_review(9)).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn comments_follow_the_same_ownership_rules() {
    let backend = TestBackend::new();
    let (_, alice_token) = backend.seed_user("alice", Role::User).await;
    let (_, bob_token) = backend.seed_user("bob", Role::User).await;
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/titles")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"name": "Alien", "year": 1979}))
        .to_request();
    let title: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let title_id = title["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/titles/{title_id}/reviews"))
        .insert_header(bearer(&alice_token))
        .set_json(json!({"text": "a classic", "score": 10}))
        .to_request();
    let review: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let review_id = review["id"].as_str().unwrap().to_string();
    let comments_uri = format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments");

    // Anonymous comment attempt: 401
    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .set_json(json!({"text": "drive-by"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    // Bob comments on Alice's review
    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer(&bob_token))
        .set_json(json!({"text": "agreed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let comment: serde_json::Value = test::read_body_json(resp).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();
    let comment_uri = format!("{comments_uri}/{comment_id}");

    // Alice may not delete Bob's comment; an admin may
    let req = test::TestRequest::delete()
        .uri(&comment_uri)
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::delete()
        .uri(&comment_uri)
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);
}

#[actix_rt::test]
async fn rating_is_aggregated_from_reviews() {
    let backend = TestBackend::new();
    let (_, alice_token) = backend.seed_user("alice", Role::User).await;
    let (_, bob_token) = backend.seed_user("bob", Role::User).await;
    let (_, admin_token) = backend.seed_user("boss", Role::Admin).await;
    let app = test::init_service(create_app(backend.state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/titles")
        .insert_header(bearer(&admin_token))
        .set_json(json!({"name": "Alien", "year": 1979}))
        .to_request();
    let title: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(title["rating"], serde_json::Value::Null);
    let title_id = title["id"].as_str().unwrap().to_string();

    for (token, score) in [(&alice_token, 6), (&bob_token, 9)] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/titles/{title_id}/reviews"))
            .insert_header(bearer(token))
            .set_json(json!({"text": "thoughts", "score": score}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/titles/{title_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    // (6 + 9) / 2 = 7.5, rounded to 8
    assert_eq!(body["rating"], 8);
}
