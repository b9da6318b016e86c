//! Postgres implementations of `UserRepo` and `PostRepo` on sqlx.
//!
//! Rows are mapped by hand between the relational schema and the domain
//! models; the category column stores the enum's canonical string.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use domains::{Category, Post, PostChanges, PostRepo, User, UserChanges, UserRepo};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

const SCHEMA: &str = include_str!("schema.sql");

/// Creates the tables and indexes if they are not present yet.
pub async fn bootstrap_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("schema bootstrap failed")?;
    Ok(())
}

fn map_user(row: PgRow) -> anyhow::Result<User> {
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        avatar: row.get("avatar"),
        post_count: row.get("post_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn map_post(row: PgRow) -> anyhow::Result<Post> {
    let category: String = row.get("category");
    Ok(Post {
        id: row.get("id"),
        title: row.get("title"),
        category: Category::parse(&category)
            .ok_or_else(|| anyhow!("unknown category {category:?} in posts table"))?,
        description: row.get("description"),
        thumbnail: row.get("thumbnail"),
        creator: row.get("creator"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: User) -> anyhow::Result<User> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, avatar, post_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(user.post_count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_user).transpose()
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "UPDATE users SET name = $2, email = $3, password_hash = $4, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_user).transpose()
    }

    async fn set_avatar(&self, id: Uuid, avatar: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "UPDATE users SET avatar = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_user).transpose()
    }

    async fn adjust_post_count(&self, id: Uuid, delta: i64) -> anyhow::Result<()> {
        // GREATEST keeps the denormalized counter from going negative even
        // if a prior increment was lost.
        sqlx::query(
            "UPDATE users SET post_count = GREATEST(post_count + $2, 0), updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_user).collect()
    }
}

pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn insert(&self, post: Post) -> anyhow::Result<Post> {
        sqlx::query(
            "INSERT INTO posts (id, title, category, description, thumbnail, creator, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(post.category.as_str())
        .bind(&post.description)
        .bind(&post.thumbnail)
        .bind(post.creator)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_post).transpose()
    }

    async fn list_recent(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY updated_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_post).collect()
    }

    async fn list_by_category(&self, category: Category) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts WHERE category = $1 ORDER BY created_at DESC")
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_post).collect()
    }

    async fn list_by_creator(&self, creator: Uuid) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts WHERE creator = $1 ORDER BY created_at DESC")
            .bind(creator)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_post).collect()
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(
            "UPDATE posts SET title = $2, category = $3, description = $4, \
             thumbnail = COALESCE($5, thumbnail), updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.category.as_str())
        .bind(&changes.description)
        .bind(&changes.thumbnail)
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_post).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
