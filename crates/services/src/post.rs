//! Post workflow: create, fetch, list, edit, delete — each one a fixed
//! blob-then-record sequence with compensating cleanup.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, BlobStore, Category, Post, PostChanges, PostRepo, Result, UploadedFile, UserRepo,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::upload::{unique_blob_name, validate_image, MAX_THUMBNAIL_BYTES};

/// Text fields of a post, as submitted. Empty fields count as missing;
/// the category is validated against the closed set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl PostDraft {
    fn validate(&self) -> Result<(String, Category, String)> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || self.category.trim().is_empty() || description.is_empty() {
            return Err(AppError::Validation("All fields are required.".into()));
        }
        let category = parse_category(&self.category)?;
        Ok((title.to_string(), category, description.to_string()))
    }
}

pub struct PostService {
    posts: Arc<dyn PostRepo>,
    users: Arc<dyn UserRepo>,
    blobs: Arc<dyn BlobStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        users: Arc<dyn UserRepo>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self { posts, users, blobs }
    }

    /// Creates a post: thumbnail blob first, then the record, then the
    /// creator's counter. A failed record insert rolls the blob back.
    pub async fn create_post(
        &self,
        caller_id: Uuid,
        draft: PostDraft,
        thumbnail: UploadedFile,
    ) -> Result<Post> {
        let (title, category, description) = draft.validate()?;
        validate_image(&thumbnail, MAX_THUMBNAIL_BYTES, "thumbnail")?;

        let blob_name = unique_blob_name(&thumbnail.file_name);
        self.blobs.put(&blob_name, thumbnail.bytes).await?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::now_v7(),
            title,
            category,
            description,
            thumbnail: blob_name.clone(),
            creator: caller_id,
            created_at: now,
            updated_at: now,
        };
        let post = match self.posts.insert(post).await {
            Ok(post) => post,
            Err(err) => {
                self.discard_blob(&blob_name).await;
                return Err(err.into());
            }
        };

        if let Err(err) = self.users.adjust_post_count(caller_id, 1).await {
            // The post exists but the counter does not reflect it; the
            // drift is logged because nothing reconciles it later.
            error!(post_id = %post.id, user_id = %caller_id, error = %err,
                "post created but counter increment failed");
            return Err(err.into());
        }

        info!(post_id = %post.id, user_id = %caller_id, "post created");
        Ok(post)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post", id.to_string()))
    }

    /// All posts, newest first by update time.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.list_recent().await?)
    }

    /// Posts in one category, newest first by creation time.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Post>> {
        let category = parse_category(category)?;
        Ok(self.posts.list_by_category(category).await?)
    }

    /// Posts by one author, newest first by creation time.
    pub async fn list_by_creator(&self, creator: Uuid) -> Result<Vec<Post>> {
        Ok(self.posts.list_by_creator(creator).await?)
    }

    /// Edits a post's text fields and, when a new thumbnail is supplied,
    /// swaps the blob: write new, repoint record, drop old.
    pub async fn edit_post(
        &self,
        id: Uuid,
        draft: PostDraft,
        new_thumbnail: Option<UploadedFile>,
    ) -> Result<Post> {
        let (title, category, description) = draft.validate()?;

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post", id.to_string()))?;

        let Some(thumbnail) = new_thumbnail else {
            let changes = PostChanges {
                title,
                category,
                description,
                thumbnail: None,
            };
            return self
                .posts
                .update(id, changes)
                .await?
                .ok_or_else(|| AppError::NotFound("Post", id.to_string()));
        };

        validate_image(&thumbnail, MAX_THUMBNAIL_BYTES, "thumbnail")?;
        let blob_name = unique_blob_name(&thumbnail.file_name);
        self.blobs.put(&blob_name, thumbnail.bytes).await?;

        let changes = PostChanges {
            title,
            category,
            description,
            thumbnail: Some(blob_name.clone()),
        };
        let updated = match self.posts.update(id, changes).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.discard_blob(&blob_name).await;
                return Err(AppError::NotFound("Post", id.to_string()));
            }
            Err(err) => {
                self.discard_blob(&blob_name).await;
                return Err(err.into());
            }
        };

        if let Err(err) = self.blobs.remove(&existing.thumbnail).await {
            warn!(blob = %existing.thumbnail, error = %err,
                "failed to remove superseded thumbnail blob");
        }

        info!(post_id = %id, "post updated");
        Ok(updated)
    }

    /// Deletes a post owned by the caller. The record delete is the
    /// authoritative step; the thumbnail unlink is tolerated to fail, and
    /// the counter decrement targets the post's recorded creator.
    pub async fn delete_post(&self, id: Uuid, caller_id: Uuid) -> Result<()> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post", id.to_string()))?;

        if post.creator != caller_id {
            return Err(AppError::Forbidden(
                "Only the creator can delete this post.".into(),
            ));
        }

        if !self.posts.delete(id).await? {
            // Lost a race with another delete.
            return Err(AppError::NotFound("Post", id.to_string()));
        }

        if let Err(err) = self.blobs.remove(&post.thumbnail).await {
            warn!(blob = %post.thumbnail, error = %err,
                "failed to remove thumbnail of deleted post");
        }

        if let Err(err) = self.users.adjust_post_count(post.creator, -1).await {
            error!(post_id = %id, user_id = %post.creator, error = %err,
                "post deleted but counter decrement failed");
            return Err(err.into());
        }

        info!(post_id = %id, user_id = %caller_id, "post deleted");
        Ok(())
    }

    async fn discard_blob(&self, name: &str) {
        if let Err(err) = self.blobs.remove(name).await {
            warn!(blob = %name, error = %err, "rollback of just-written blob failed; file orphaned");
        }
    }
}

fn parse_category(input: &str) -> Result<Category> {
    Category::parse(input).ok_or_else(|| {
        AppError::Validation(format!("'{}' is not a supported category.", input.trim()))
    })
}
