//! # Domain Models
//!
//! These structs represent the core entities of the blog backend.
//! We use UUID v7 for time-ordered, globally unique identification.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. The `email` field is always stored lowercase so
/// uniqueness checks are case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Blob filename of the profile picture, if one was uploaded.
    pub avatar: Option<String>,
    /// Denormalized count of posts whose creator is this user.
    /// Maintained incrementally on post create/delete, never negative.
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a [`User`]. This is the only user shape that crosses the
/// API boundary; the password hash stays behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            post_count: user.post_count,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The closed set of post categories. Anything outside this set is rejected
/// at the boundary, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Agriculture,
    Business,
    Entertainment,
    Health,
    Technology,
    Sports,
    Art,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Agriculture,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Technology,
        Category::Sports,
        Category::Art,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Agriculture => "Agriculture",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Art => "Art",
            Category::Others => "Others",
        }
    }

    /// Case-insensitive lookup. Returns `None` for anything outside the set.
    pub fn parse(input: &str) -> Option<Category> {
        let needle = input.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published blog post. `creator` is a weak reference to a [`User`] id;
/// deleting a user does not cascade here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub description: String,
    /// Blob filename of the thumbnail image. Required, never empty.
    pub thumbnail: String,
    pub creator: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Verified identity of an authenticated request, decoded from the bearer
/// token by the [`TokenService`](crate::traits::TokenService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub name: String,
}

/// An uploaded file as handed over by the multipart layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename. Untrusted; only the extension survives
    /// into the generated blob name.
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
