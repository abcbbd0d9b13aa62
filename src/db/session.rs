//! Session repository for cookie authentication.
//!
//! Sessions are opaque random tokens stored server-side; the token travels
//! in a cookie and is looked up on every authenticated request.

use sqlx::SqlitePool;

use crate::{PlumaError, Result};

/// Session entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Session ID.
    pub id: i64,
    /// User ID the session belongs to.
    pub user_id: i64,
    /// Opaque token string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Revocation timestamp (None if not revoked).
    pub revoked_at: Option<String>,
}

/// New session for creation.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// User ID.
    pub user_id: i64,
    /// Opaque token string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

impl NewSession {
    /// Create a session record for a user with a fresh random token,
    /// expiring after the given number of days.
    pub fn issue(user_id: i64, expiry_days: u64) -> Self {
        let expires_at = chrono::Utc::now() + chrono::Duration::days(expiry_days as i64);
        Self {
            user_id,
            token: uuid::Uuid::new_v4().to_string(),
            expires_at: expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new session.
    pub async fn create(&self, new_session: &NewSession) -> Result<Session> {
        let result =
            sqlx::query("INSERT INTO sessions (user_id, token, expires_at) VALUES (?, ?, ?)")
                .bind(new_session.user_id)
                .bind(&new_session.token)
                .bind(&new_session.expires_at)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlumaError::NotFound("session".to_string()))
    }

    /// Get a session by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token, expires_at, created_at, revoked_at
             FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Get a valid (not expired, not revoked) session by token.
    pub async fn get_valid(&self, token: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token, expires_at, created_at, revoked_at
             FROM sessions
             WHERE token = ?
               AND revoked_at IS NULL
               AND expires_at > datetime('now')",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Revoke a session by token.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = datetime('now')
             WHERE token = ? AND revoked_at IS NULL",
        )
        .bind(token)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke all sessions for a user.
    pub async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = datetime('now')
             WHERE user_id = ? AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete expired and revoked sessions (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM sessions WHERE expires_at < datetime('now') OR revoked_at IS NOT NULL",
        )
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "hash"))
            .await
            .unwrap();
        (db, user.id)
    }

    #[test]
    fn test_issue_generates_unique_tokens() {
        let a = NewSession::issue(1, 14);
        let b = NewSession::issue(1, 14);
        assert_ne!(a.token, b.token);
        assert_eq!(a.user_id, 1);
    }

    #[tokio::test]
    async fn test_create_and_get_valid() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let new_session = NewSession::issue(user_id, 14);
        let session = repo.create(&new_session).await.unwrap();

        assert_eq!(session.user_id, user_id);
        assert!(session.revoked_at.is_none());

        let valid = repo.get_valid(&new_session.token).await.unwrap();
        assert!(valid.is_some());
        assert_eq!(valid.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let (db, _) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let valid = repo.get_valid("no-such-token").await.unwrap();
        assert!(valid.is_none());
    }

    #[tokio::test]
    async fn test_revoked_token_is_invalid() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let new_session = NewSession::issue(user_id, 14);
        repo.create(&new_session).await.unwrap();

        assert!(repo.revoke(&new_session.token).await.unwrap());
        assert!(repo.get_valid(&new_session.token).await.unwrap().is_none());

        // Revoking again is a no-op
        assert!(!repo.revoke(&new_session.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_token_is_invalid() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let expired = NewSession {
            user_id,
            token: "expired-token".to_string(),
            expires_at: "2000-01-01 00:00:00".to_string(),
        };
        repo.create(&expired).await.unwrap();

        assert!(repo.get_valid("expired-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoke_all_for_user() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let a = NewSession::issue(user_id, 14);
        let b = NewSession::issue(user_id, 14);
        repo.create(&a).await.unwrap();
        repo.create(&b).await.unwrap();

        let revoked = repo.revoke_all_for_user(user_id).await.unwrap();
        assert_eq!(revoked, 2);
        assert!(repo.get_valid(&a.token).await.unwrap().is_none());
        assert!(repo.get_valid(&b.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let live = NewSession::issue(user_id, 14);
        repo.create(&live).await.unwrap();
        repo.create(&NewSession {
            user_id,
            token: "stale".to_string(),
            expires_at: "2000-01-01 00:00:00".to_string(),
        })
        .await
        .unwrap();

        let removed = repo.cleanup_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(repo.get_valid(&live.token).await.unwrap().is_some());
    }
}
