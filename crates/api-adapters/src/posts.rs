//! Handlers for the `/posts` routes.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use domains::{AppError, Post};
use serde::Serialize;
use services::PostDraft;
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, form::FormData, state::AppState};

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

fn draft_from(form: &FormData) -> PostDraft {
    PostDraft {
        title: form.text("title"),
        category: form.text("category"),
        description: form.text("description"),
    }
}

/// POST /posts/create — multipart with text fields and a `thumbnail` file.
pub async fn create_post(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let mut form = FormData::read(multipart).await?;
    let draft = draft_from(&form);
    let thumbnail = form
        .take_file("thumbnail")
        .ok_or_else(|| AppError::Validation("Please upload a thumbnail.".into()))?;
    let post = state.posts.create_post(caller.id, draft, thumbnail).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get_post(id).await?))
}

/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_posts().await?))
}

/// GET /posts/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_by_category(&category).await?))
}

/// GET /posts/user/{id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_by_creator(id).await?))
}

/// PATCH /posts/{id} — multipart; the `thumbnail` file is optional.
pub async fn edit_post(
    AuthUser(_caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Post>, ApiError> {
    let mut form = FormData::read(multipart).await?;
    let draft = draft_from(&form);
    let thumbnail = form.take_file("thumbnail");
    let post = state.posts.edit_post(id, draft, thumbnail).await?;
    Ok(Json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.posts.delete_post(id, caller.id).await?;
    Ok(Json(DeletedResponse {
        message: format!("Post {id} has been deleted successfully."),
    }))
}
