//! Comment model and repository.

use sqlx::SqlitePool;

use crate::{PlumaError, Result};

/// Comment entity - a reply attached to a post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Post the comment belongs to.
    pub post_id: i64,
    /// ID of the commenting user.
    pub author_id: i64,
    /// Comment text.
    pub text: String,
    /// Comment creation timestamp.
    pub created_at: String,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Post the comment belongs to.
    pub post_id: i64,
    /// ID of the commenting user.
    pub author_id: i64,
    /// Comment text.
    pub text: String,
}

impl NewComment {
    /// Create a new comment with required fields.
    pub fn new(post_id: i64, author_id: i64, text: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            text: text.into(),
        }
    }
}

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let result =
            sqlx::query("INSERT INTO comments (post_id, author_id, text) VALUES (?, ?, ?)")
                .bind(new_comment.post_id)
                .bind(new_comment.author_id)
                .bind(&new_comment.text)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlumaError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, text, created_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(comment)
    }

    /// List comments on a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, text, created_at
             FROM comments WHERE post_id = ?
             ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
