//! # Core Traits (Ports)
//!
//! Contracts between the workflow services and the outside world. Any
//! adapter (Postgres, in-memory, filesystem, JWT, …) plugs in by
//! implementing one of these. Under the `testing` feature (or in this
//! crate's own tests) every port also has a generated `MockXxx` twin.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::models::{Caller, Category, Post, User};

/// Fields replaced by a profile edit. The avatar travels through
/// [`UserRepo::set_avatar`] instead since it is mutated on its own path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields replaced by a post edit. `thumbnail` is `None` when only the
/// text fields change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub thumbnail: Option<String>,
}

/// Persistence contract for user records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: User) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Lookup by lowercased email. Callers normalize before calling.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Replaces name/email/password hash, bumping `updated_at`.
    /// Returns `None` if the user no longer exists.
    async fn update(&self, id: Uuid, changes: UserChanges) -> anyhow::Result<Option<User>>;
    /// Points the avatar reference at a new blob filename.
    async fn set_avatar(&self, id: Uuid, avatar: &str) -> anyhow::Result<Option<User>>;
    /// Adjusts the denormalized post count by `delta`, flooring at zero.
    async fn adjust_post_count(&self, id: Uuid, delta: i64) -> anyhow::Result<()>;
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
}

/// Persistence contract for post records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: Post) -> anyhow::Result<Post>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    /// All posts, newest first by `updated_at`.
    async fn list_recent(&self) -> anyhow::Result<Vec<Post>>;
    /// Posts in one category, newest first by `created_at`.
    async fn list_by_category(&self, category: Category) -> anyhow::Result<Vec<Post>>;
    /// Posts by one creator, newest first by `created_at`.
    async fn list_by_creator(&self, creator: Uuid) -> anyhow::Result<Vec<Post>>;
    /// Returns `None` if the post no longer exists.
    async fn update(&self, id: Uuid, changes: PostChanges) -> anyhow::Result<Option<Post>>;
    /// Returns whether a record was actually removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Blob storage contract for uploaded images.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Creates or overwrites the named blob.
    async fn put(&self, name: &str, data: Bytes) -> anyhow::Result<()>;
    /// Removes the named blob. Removing a blob that does not exist is
    /// not an error.
    async fn remove(&self, name: &str) -> anyhow::Result<()>;
    /// Public URL path under which the blob is served.
    fn public_url(&self, name: &str) -> String;
}

/// Password hashing contract (salted adaptive hash).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> anyhow::Result<String>;
    /// `Ok(false)` covers both a mismatch and an unparseable stored hash.
    async fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool>;
}

/// Bearer token contract. Verification is stateless; the secret is
/// injected into the implementation at construction.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, caller: &Caller) -> anyhow::Result<String>;
    /// Fails on invalid, tampered, or expired tokens.
    fn verify(&self, token: &str) -> anyhow::Result<Caller>;
}
