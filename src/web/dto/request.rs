//! Request DTOs for the Pluma web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = no_control_chars)
    )]
    pub username: String,
    /// Password (validated separately against password policy).
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(custom(function = not_empty_trimmed))]
    pub username: String,
    /// Password.
    #[validate(custom(function = not_empty_trimmed))]
    pub password: String,
}

/// Create post request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post text (1-200 characters).
    #[validate(
        length(min = 1, max = 200, message = "Text must be 1-200 characters"),
        custom(function = not_empty_trimmed)
    )]
    pub text: String,
    /// Optional group ID.
    pub group_id: Option<i64>,
    /// Optional image path or URL.
    pub image: Option<String>,
}

/// Edit post request.
///
/// Absent fields are left unchanged. `group_id: null` in the body is
/// indistinguishable from an absent field in JSON, so clearing the group
/// goes through `clear_group`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New post text.
    #[validate(length(min = 1, max = 200, message = "Text must be 1-200 characters"))]
    pub text: Option<String>,
    /// New group ID.
    pub group_id: Option<i64>,
    /// Set to true to detach the post from its group.
    #[serde(default)]
    pub clear_group: bool,
    /// New image path or URL.
    pub image: Option<String>,
}

/// Add comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text.
    #[validate(
        length(max = 2000, message = "Comment is too long"),
        custom(function = not_empty_trimmed)
    )]
    pub text: String,
}

/// Page number query parameter.
///
/// Kept as a raw string so garbage values clamp to page 1 instead of
/// failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Requested page number.
    pub page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_valid() {
        let req = SignupRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_signup_request_short_username() {
        let req = SignupRequest {
            username: "ab".to_string(),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_post_request_valid() {
        let req = CreatePostRequest {
            text: "Hello World".to_string(),
            group_id: None,
            image: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_post_request_empty_text() {
        let req = CreatePostRequest {
            text: "".to_string(),
            group_id: None,
            image: None,
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            text: "   ".to_string(),
            group_id: None,
            image: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_post_request_text_too_long() {
        let req = CreatePostRequest {
            text: "x".repeat(201),
            group_id: None,
            image: None,
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            text: "x".repeat(200),
            group_id: None,
            image: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_post_request_optional_text() {
        let req = UpdatePostRequest {
            text: None,
            group_id: Some(2),
            clear_group: false,
            image: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdatePostRequest {
            text: Some("x".repeat(201)),
            group_id: None,
            clear_group: false,
            image: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_comment_request_empty() {
        let req = CommentRequest {
            text: " \t".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_page_query_deserializes_garbage() {
        let q: PageQuery = serde_json::from_str(r#"{"page": "abc"}"#).unwrap();
        assert_eq!(q.page.as_deref(), Some("abc"));

        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert!(q.page.is_none());
    }
}
