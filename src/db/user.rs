//! User model for Pluma.

/// User entity - an author identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Argon2 password hash.
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    pub last_login: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Argon2 password hash (already hashed by the caller).
    pub password: String,
}

impl NewUser {
    /// Create a new user record with required fields.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Data for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New password hash.
    pub password: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new password hash.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the active flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("alice", "hash");
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash");
    }

    #[test]
    fn test_user_update_empty() {
        assert!(UserUpdate::new().is_empty());
    }

    #[test]
    fn test_user_update_builder() {
        let update = UserUpdate::new().password("newhash").is_active(false);
        assert_eq!(update.password, Some("newhash".to_string()));
        assert_eq!(update.is_active, Some(false));
        assert!(!update.is_empty());
    }
}
