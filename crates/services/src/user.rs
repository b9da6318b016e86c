//! User workflow: registration, login, profile fetch, avatar replacement,
//! profile edit, author listing.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, BlobStore, Caller, PasswordHasher, Result, TokenService, UploadedFile, User,
    UserChanges, UserProfile, UserRepo,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::upload::{unique_blob_name, validate_image, MAX_AVATAR_BYTES};

const MIN_PASSWORD_CHARS: usize = 6;

/// Registration input. Empty fields count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "password2")]
    pub password_confirm: String,
}

/// Profile edit input. All fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub id: Uuid,
    pub name: String,
}

pub struct UserService {
    users: Arc<dyn UserRepo>,
    blobs: Arc<dyn BlobStore>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        blobs: Arc<dyn BlobStore>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            blobs,
            passwords,
            tokens,
        }
    }

    /// Creates a new account with a zeroed post count.
    pub async fn register(&self, input: Registration) -> Result<UserProfile> {
        let name = required(&input.name)?;
        let email = required(&input.email)?.to_lowercase();
        required(&input.password)?;
        required(&input.password_confirm)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Validation("Email already exists.".into()));
        }
        if input.password.trim().chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::Validation(
                "Password must be at least 6 characters.".into(),
            ));
        }
        if input.password != input.password_confirm {
            return Err(AppError::Validation("Passwords do not match.".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email,
            password_hash: self.passwords.hash(&input.password).await?,
            avatar: None,
            post_count: 0,
            created_at: now,
            updated_at: now,
        };
        let user = self.users.insert(user).await?;
        info!(user_id = %user.id, "registered new user");
        Ok(user.into())
    }

    /// Verifies credentials and issues a bearer token embedding `{id, name}`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = required(email)?.to_lowercase();
        required(password)?;

        // Unknown email and bad password share one message so login
        // failures never reveal which accounts exist.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".into()))?;

        if !self.passwords.verify(password, &user.password_hash).await? {
            return Err(AppError::Unauthorized("Invalid email or password.".into()));
        }

        let caller = Caller {
            id: user.id,
            name: user.name.clone(),
        };
        let token = self.tokens.issue(&caller)?;
        debug!(user_id = %user.id, "issued session token");
        Ok(Session {
            token,
            id: user.id,
            name: user.name,
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<UserProfile> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User", id.to_string()))
    }

    /// Replaces the caller's avatar: write the new blob, repoint the record,
    /// then drop the superseded blob. The record update is the commit point;
    /// if it fails the just-written blob is rolled back.
    pub async fn change_avatar(&self, caller_id: Uuid, file: UploadedFile) -> Result<UserProfile> {
        validate_image(&file, MAX_AVATAR_BYTES, "avatar")?;

        let user = self
            .users
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User", caller_id.to_string()))?;

        let blob_name = unique_blob_name(&file.file_name);
        self.blobs.put(&blob_name, file.bytes).await?;

        let updated = match self.users.set_avatar(caller_id, &blob_name).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.discard_blob(&blob_name).await;
                return Err(AppError::NotFound("User", caller_id.to_string()));
            }
            Err(err) => {
                self.discard_blob(&blob_name).await;
                return Err(err.into());
            }
        };

        if let Some(old) = user.avatar {
            if let Err(err) = self.blobs.remove(&old).await {
                warn!(blob = %old, error = %err, "failed to remove superseded avatar blob");
            }
        }

        info!(user_id = %caller_id, blob = %blob_name, "avatar replaced");
        Ok(updated.into())
    }

    /// Updates name, email, and password in one step.
    pub async fn edit_profile(&self, caller_id: Uuid, input: EditProfile) -> Result<UserProfile> {
        let name = required(&input.name)?;
        let email = required(&input.email)?.to_lowercase();
        required(&input.current_password)?;
        required(&input.new_password)?;
        required(&input.confirm_password)?;

        let user = self
            .users
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User", caller_id.to_string()))?;

        if let Some(other) = self.users.find_by_email(&email).await? {
            if other.id != caller_id {
                return Err(AppError::Validation("Email already exists.".into()));
            }
        }

        if !self
            .passwords
            .verify(&input.current_password, &user.password_hash)
            .await?
        {
            return Err(AppError::Unauthorized("Current password is incorrect.".into()));
        }
        if self
            .passwords
            .verify(&input.new_password, &user.password_hash)
            .await?
        {
            return Err(AppError::Validation(
                "You can not reuse your old password. Create a new one.".into(),
            ));
        }
        if input.new_password != input.confirm_password {
            return Err(AppError::Validation("Passwords do not match.".into()));
        }
        if input.new_password.trim().chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::Validation(
                "Password must be at least 6 characters.".into(),
            ));
        }

        let changes = UserChanges {
            name: name.to_string(),
            email,
            password_hash: self.passwords.hash(&input.new_password).await?,
        };
        let updated = self
            .users
            .update(caller_id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User", caller_id.to_string()))?;
        info!(user_id = %caller_id, "profile updated");
        Ok(updated.into())
    }

    /// All registered users, password hashes excluded by construction.
    pub async fn list_authors(&self) -> Result<Vec<UserProfile>> {
        let users = self.users.list_all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    async fn discard_blob(&self, name: &str) {
        if let Err(err) = self.blobs.remove(name).await {
            warn!(blob = %name, error = %err, "rollback of just-written blob failed; file orphaned");
        }
    }
}

fn required(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Fill in all fields.".into()));
    }
    Ok(trimmed)
}
