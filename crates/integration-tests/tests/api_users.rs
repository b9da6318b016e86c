//! Router-level tests for the /users routes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use integration_tests::{bearer, json_request, multipart_body, response_json, TestEnv};
use serde_json::json;

#[tokio::test]
async fn register_returns_created_profile_without_hash() {
    let env = TestEnv::new();
    let response = env
        .send(json_request(
            "POST",
            "/users/register",
            json!({
                "name": "Alice",
                "email": "A@X.com",
                "password": "secret1",
                "password2": "secret1",
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["post_count"], 0);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_yields_the_uniform_error_shape() {
    let env = TestEnv::new();
    env.signed_up_user("Alice", "a@x.com").await;
    let response = env
        .send(json_request(
            "POST",
            "/users/register",
            json!({
                "name": "Alice",
                "email": "a@x.com",
                "password": "secret1",
                "password_confirm": "secret1",
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Email already exists.");
    assert_eq!(body["code"], 422);
}

#[tokio::test]
async fn login_then_fetch_profile() {
    let env = TestEnv::new();
    let (id, _) = env.signed_up_user("Alice", "a@x.com").await;

    let response = env
        .send(json_request(
            "POST",
            "/users/login",
            json!({ "email": "a@x.com", "password": "secret1" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["name"], "Alice");
    assert!(body["token"].as_str().unwrap().contains('.'));

    let response = env
        .send(
            Request::builder()
                .uri(format!("/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Alice");
}

#[tokio::test]
async fn unknown_user_is_a_404() {
    let env = TestEnv::new();
    let response = env
        .send(
            Request::builder()
                .uri(format!("/users/{}", uuid::Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn protected_routes_reject_missing_and_invalid_tokens() {
    let env = TestEnv::new();
    let (content_type, body) = multipart_body(&[], Some(("avatar", "me.png", b"img")));

    // No Authorization header at all.
    let response = env
        .send(
            Request::builder()
                .method("POST")
                .uri("/users/change-avatar")
                .header("content-type", content_type.clone())
                .body(Body::from(body.clone()))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A token signed by someone else.
    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("POST")
                    .uri("/users/change-avatar")
                    .header("content-type", content_type),
                "for.ged.token",
            )
            .body(Body::from(body))
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn change_avatar_round_trip() {
    let env = TestEnv::new();
    let (_, token) = env.signed_up_user("Alice", "a@x.com").await;
    let (content_type, body) = multipart_body(&[], Some(("avatar", "me.png", b"portrait")));

    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("POST")
                    .uri("/users/change-avatar")
                    .header("content-type", content_type),
                &token,
            )
            .body(Body::from(body))
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = response_json(response).await;
    let avatar = profile["avatar"].as_str().unwrap();
    assert!(avatar.ends_with(".png"));
    assert!(env.blobs.contains(avatar));
}

#[tokio::test]
async fn authors_route_lists_everyone() {
    let env = TestEnv::new();
    env.signed_up_user("Alice", "a@x.com").await;
    env.signed_up_user("Bob", "b@x.com").await;

    let response = env
        .send(
            Request::builder()
                .uri("/users/authors")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
