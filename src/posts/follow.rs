//! Follow repository.
//!
//! A follow edge lets a user subscribe to an author's posts. Edges are
//! unique per (user, author) pair and self-follows are never stored.

use sqlx::SqlitePool;

use crate::Result;

/// Repository for follow relationships.
pub struct FollowRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FollowRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Follow an author.
    ///
    /// Returns true if a new edge was created. Repeated follows and
    /// self-follows are no-ops.
    pub async fn follow(&self, user_id: i64, author_id: i64) -> Result<bool> {
        if user_id == author_id {
            return Ok(false);
        }

        let result =
            sqlx::query("INSERT OR IGNORE INTO follows (user_id, author_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(author_id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Unfollow an author.
    ///
    /// Returns true if an edge was removed.
    pub async fn unfollow(&self, user_id: i64, author_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
            .bind(user_id)
            .bind(author_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user follows an author.
    pub async fn is_following(&self, user_id: i64, author_id: i64) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = ? AND author_id = ?")
                .bind(user_id)
                .bind(author_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Count how many authors a user follows.
    pub async fn count_following(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Count how many users follow an author.
    pub async fn count_followers(&self, author_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
