//! Post repository for Pluma.
//!
//! CRUD plus the listing queries behind every paginated page: recent
//! posts, posts by group, posts by author, and the follow feed. All
//! listings are ordered newest first (`created_at DESC, id DESC`).

use sqlx::{QueryBuilder, SqlitePool};

use super::post::{NewPost, Post, PostUpdate};
use crate::{PlumaError, Result};

const POST_COLUMNS: &str = "id, text, author_id, group_id, image, created_at";

/// Repository for post CRUD and listing operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result =
            sqlx::query("INSERT INTO posts (text, author_id, group_id, image) VALUES (?, ?, ?, ?)")
                .bind(&new_post.text)
                .bind(new_post.author_id)
                .bind(new_post.group_id)
                .bind(&new_post.image)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlumaError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref text) = update.text {
            separated.push("text = ");
            separated.push_bind_unseparated(text);
        }
        if let Some(group_id) = update.group_id {
            separated.push("group_id = ");
            separated.push_bind_unseparated(group_id);
        }
        if let Some(ref image) = update.image {
            separated.push("image = ");
            separated.push_bind_unseparated(image.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List recent posts with pagination, newest first.
    pub async fn list_recent(&self, offset: u64, limit: u32) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count all posts.
    pub async fn count_all(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List posts in a group with pagination, newest first.
    pub async fn list_by_group(&self, group_id: i64, offset: u64, limit: u32) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE group_id = ?
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(group_id)
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count posts in a group.
    pub async fn count_by_group(&self, group_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = ?")
            .bind(group_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List posts by author with pagination, newest first.
    pub async fn list_by_author(
        &self,
        author_id: i64,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = ?
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(author_id)
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count posts by author.
    pub async fn count_by_author(&self, author_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List feed posts for a user: posts by authors the user follows,
    /// newest first, with pagination.
    pub async fn list_feed(&self, user_id: i64, offset: u64, limit: u32) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT p.id, p.text, p.author_id, p.group_id, p.image, p.created_at
             FROM posts p
             JOIN follows f ON f.author_id = p.author_id
             WHERE f.user_id = ?
             ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count feed posts for a user.
    pub async fn count_feed(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM posts p
             JOIN follows f ON f.author_id = p.author_id
             WHERE f.user_id = ?",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}
