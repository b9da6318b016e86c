//! Shared fixtures for the end-to-end test suite: real workflow services
//! wired to in-memory adapters, plus helpers for driving the router.

use std::sync::Arc;

use api_adapters::AppState;
use auth_adapters::{ArgonPasswordHasher, JwtTokenService};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use domains::{BlobStore, PasswordHasher, PostRepo, TokenService, UserRepo};
use services::{PostService, Registration, UserService};
use storage_adapters::{MemoryBlobStore, MemoryPostRepo, MemoryUserRepo};
use tower::util::ServiceExt;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Everything a test needs: the services, the router, and concrete
/// handles onto the in-memory stores for state assertions.
pub struct TestEnv {
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<JwtTokenService>,
    pub user_repo: Arc<MemoryUserRepo>,
    pub blobs: Arc<MemoryBlobStore>,
    pub router: Router,
}

impl TestEnv {
    pub fn new() -> Self {
        let user_repo = Arc::new(MemoryUserRepo::new());
        let post_repo = Arc::new(MemoryPostRepo::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let tokens = Arc::new(JwtTokenService::with_default_ttl(TEST_SECRET));

        let users_port: Arc<dyn UserRepo> = user_repo.clone();
        let posts_port: Arc<dyn PostRepo> = post_repo.clone();
        let blobs_port: Arc<dyn BlobStore> = blobs.clone();
        let passwords: Arc<dyn PasswordHasher> = Arc::new(ArgonPasswordHasher);
        let tokens_port: Arc<dyn TokenService> = tokens.clone();

        let users = Arc::new(UserService::new(
            users_port.clone(),
            blobs_port.clone(),
            passwords,
            tokens_port.clone(),
        ));
        let posts = Arc::new(PostService::new(posts_port, users_port, blobs_port));

        let state = AppState::new(users.clone(), posts.clone(), tokens_port);
        let router = api_adapters::router(state, None);

        Self {
            users,
            posts,
            tokens,
            user_repo,
            blobs,
            router,
        }
    }

    /// Registers and logs in one user, returning `(user_id, token)`.
    pub async fn signed_up_user(&self, name: &str, email: &str) -> (uuid::Uuid, String) {
        let profile = self
            .users
            .register(registration(name, email, "secret1"))
            .await
            .expect("registration should succeed");
        let session = self
            .users
            .login(email, "secret1")
            .await
            .expect("login should succeed");
        (profile.id, session.token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never errors")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn registration(name: &str, email: &str, password: &str) -> Registration {
    Registration {
        name: name.into(),
        email: email.into(),
        password: password.into(),
        password_confirm: password.into(),
    }
}

/// Builds a multipart request body; returns `(content_type, body)`.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn bearer(request: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .expect("body should collect");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
