//! Router-level tests for the /posts routes, multipart uploads included.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use integration_tests::{bearer, multipart_body, response_json, TestEnv};

const POST_FIELDS: &[(&str, &str)] = &[
    ("title", "T"),
    ("category", "Technology"),
    ("description", "D"),
];

async fn create_via_api(env: &TestEnv, token: &str) -> serde_json::Value {
    let (content_type, body) =
        multipart_body(POST_FIELDS, Some(("thumbnail", "pic.png", b"image-bytes")));
    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("POST")
                    .uri("/posts/create")
                    .header("content-type", content_type),
                token,
            )
            .body(Body::from(body))
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await
}

#[tokio::test]
async fn create_requires_a_token() {
    let env = TestEnv::new();
    let (content_type, body) =
        multipart_body(POST_FIELDS, Some(("thumbnail", "pic.png", b"image-bytes")));
    let response = env
        .send(
            Request::builder()
                .method("POST")
                .uri("/posts/create")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_fetch_and_list() {
    let env = TestEnv::new();
    let (alice, token) = env.signed_up_user("Alice", "a@x.com").await;
    let created = create_via_api(&env, &token).await;
    assert_eq!(created["creator"], alice.to_string());
    assert_eq!(created["category"], "Technology");

    let id = created["id"].as_str().unwrap();
    let response = env
        .send(
            Request::builder()
                .uri(format!("/posts/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["title"], "T");
    assert_eq!(fetched["thumbnail"], created["thumbnail"]);

    for uri in [
        "/posts".to_string(),
        "/posts/category/Technology".to_string(),
        format!("/posts/user/{alice}"),
    ] {
        let response = env
            .send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let list = response_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn invalid_category_is_rejected_on_create_and_listing() {
    let env = TestEnv::new();
    let (_, token) = env.signed_up_user("Alice", "a@x.com").await;

    let (content_type, body) = multipart_body(
        &[("title", "T"), ("category", "Gardening"), ("description", "D")],
        Some(("thumbnail", "pic.png", b"image-bytes")),
    );
    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("POST")
                    .uri("/posts/create")
                    .header("content-type", content_type),
                &token,
            )
            .body(Body::from(body))
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = env
        .send(
            Request::builder()
                .uri("/posts/category/Gardening")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_edits_text_fields_without_a_new_thumbnail() {
    let env = TestEnv::new();
    let (_, token) = env.signed_up_user("Alice", "a@x.com").await;
    let created = create_via_api(&env, &token).await;
    let id = created["id"].as_str().unwrap();

    let (content_type, body) = multipart_body(
        &[
            ("title", "Updated title"),
            ("category", "Health"),
            ("description", "New description"),
        ],
        None,
    );
    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/posts/{id}"))
                    .header("content-type", content_type),
                &token,
            )
            .body(Body::from(body))
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["title"], "Updated title");
    assert_eq!(updated["category"], "Health");
    assert_eq!(updated["thumbnail"], created["thumbnail"]);
}

#[tokio::test]
async fn delete_enforces_ownership_through_the_api() {
    let env = TestEnv::new();
    let (_, alice_token) = env.signed_up_user("Alice", "a@x.com").await;
    let (_, bob_token) = env.signed_up_user("Bob", "b@x.com").await;
    let created = create_via_api(&env, &alice_token).await;
    let id = created["id"].as_str().unwrap();

    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/posts/{id}")),
                &bob_token,
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = env
        .send(
            bearer(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/posts/{id}")),
                &alice_token,
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("deleted"));

    let response = env
        .send(
            Request::builder()
                .uri(format!("/posts/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
