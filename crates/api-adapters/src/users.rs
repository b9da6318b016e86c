//! Handlers for the `/users` routes.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use domains::{AppError, UserProfile};
use serde::Deserialize;
use services::{EditProfile, Registration, Session};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, form::FormData, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<Registration>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = state.users.register(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.users.login(&input.email, &input.password).await?;
    Ok(Json(session))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.users.get_profile(id).await?;
    Ok(Json(profile))
}

/// GET /users/authors
pub async fn authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let authors = state.users.list_authors().await?;
    Ok(Json(authors))
}

/// POST /users/change-avatar — multipart with an `avatar` file field.
pub async fn change_avatar(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UserProfile>, ApiError> {
    let mut form = FormData::read(multipart).await?;
    let avatar = form
        .take_file("avatar")
        .ok_or_else(|| AppError::Validation("Please upload an image.".into()))?;
    let profile = state.users.change_avatar(caller.id, avatar).await?;
    Ok(Json(profile))
}

/// POST /users/edit-user
pub async fn edit_user(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<EditProfile>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.users.edit_profile(caller.id, input).await?;
    Ok(Json(profile))
}
