//! Route table and middleware assembly.

use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::{Any, CorsLayer}, services::ServeDir, trace::TraceLayer};

use crate::{posts, state::AppState, users};

/// Uploads top out at 2 MB plus multipart framing overhead.
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

// CORS is wide open: the API serves a separate frontend origin and
// carries no cookies (auth is the bearer header).
fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the application router. `uploads_dir`, when given, is served
/// statically under `/uploads` so stored blob filenames resolve to
/// public image URLs.
pub fn router(state: AppState, uploads_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/authors", get(users::authors))
        .route("/users/{id}", get(users::get_user))
        .route("/users/change-avatar", post(users::change_avatar))
        .route("/users/edit-user", post(users::edit_user))
        .route("/posts/create", post(posts::create_post))
        .route("/posts", get(posts::list_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .patch(posts::edit_post)
                .delete(posts::delete_post),
        )
        .route("/posts/category/{category}", get(posts::list_by_category))
        .route("/posts/user/{id}", get(posts::list_by_user))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_policy())
        .with_state(state);

    match uploads_dir {
        Some(dir) => api.nest_service("/uploads", ServeDir::new(dir)),
        None => api,
    }
}
