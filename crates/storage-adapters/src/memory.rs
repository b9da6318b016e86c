//! In-memory implementations of `UserRepo` and `PostRepo` on DashMap.
//!
//! Used by the workflow and router tests; semantics (filters, sort
//! orders, clamped counters) match the Postgres adapter.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use domains::{Category, Post, PostChanges, PostRepo, User, UserChanges, UserRepo};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryUserRepo {
    users: DashMap<Uuid, User>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: User) -> anyhow::Result<User> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.clone()))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone()))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> anyhow::Result<Option<User>> {
        Ok(self.users.get_mut(&id).map(|mut entry| {
            entry.name = changes.name;
            entry.email = changes.email;
            entry.password_hash = changes.password_hash;
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn set_avatar(&self, id: Uuid, avatar: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.get_mut(&id).map(|mut entry| {
            entry.avatar = Some(avatar.to_string());
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn adjust_post_count(&self, id: Uuid, delta: i64) -> anyhow::Result<()> {
        if let Some(mut entry) = self.users.get_mut(&id) {
            entry.post_count = (entry.post_count + delta).max(0);
            entry.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.clone()).collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}

#[derive(Default)]
pub struct MemoryPostRepo {
    posts: DashMap<Uuid, Post>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn insert(&self, post: Post) -> anyhow::Result<Post> {
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|entry| entry.clone()))
    }

    async fn list_recent(&self) -> anyhow::Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.clone()).collect();
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    async fn list_by_category(&self, category: Category) -> anyhow::Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn list_by_creator(&self, creator: Uuid) -> anyhow::Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| entry.creator == creator)
            .map(|entry| entry.clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> anyhow::Result<Option<Post>> {
        Ok(self.posts.get_mut(&id).map(|mut entry| {
            entry.title = changes.title;
            entry.category = changes.category;
            entry.description = changes.description;
            if let Some(thumbnail) = changes.thumbnail {
                entry.thumbnail = thumbnail;
            }
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.posts.remove(&id).is_some())
    }
}
