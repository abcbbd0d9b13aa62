//! User repository for Pluma.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::{QueryBuilder, SqlitePool};

use super::user::{NewUser, User, UserUpdate};
use crate::{PlumaError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlumaError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, last_login, is_active
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, last_login, is_active
             FROM users WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref password) = update.password {
            separated.push("password = ");
            separated.push_bind_unseparated(password);
        }
        if let Some(is_active) = update.is_active {
            separated.push("is_active = ");
            separated.push_bind_unseparated(is_active);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Update the last login timestamp for a user.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Delete a user by ID.
    ///
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash");
        assert!(user.is_active);
        assert!(user.last_login.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        let dup = repo.create(&NewUser::new("alice", "other")).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let created = repo.create(&NewUser::new("alice", "hash")).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "alice");

        let not_found = repo.get_by_id(999).await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_get_by_username_case_insensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Alice", "hash")).await.unwrap();

        let found = repo.get_by_username("alice").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "Alice");
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();

        let update = UserUpdate::new().password("newhash");
        let updated = repo.update(user.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.password, "newhash");
    }

    #[tokio::test]
    async fn test_update_empty_returns_current() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();

        let result = repo.update(user.id, &UserUpdate::new()).await.unwrap();
        assert_eq!(result.unwrap().password, "hash");
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let update = UserUpdate::new().password("x");
        let result = repo.update(999, &update).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        repo.update_last_login(user.id).await.unwrap();

        let found = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(found.last_login.is_some());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(repo.get_by_id(user.id).await.unwrap().is_none());
        assert!(!repo.delete(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_count() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        repo.create(&NewUser::new("bob", "hash")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
