//! Post model for Pluma.

/// Maximum length of a post text, in characters.
pub const POST_TEXT_MAX: usize = 200;

/// Number of characters shown in a post preview.
pub const PREVIEW_LIMIT: usize = 15;

/// Post entity - a single blog entry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post text.
    pub text: String,
    /// ID of the user who created the post.
    pub author_id: i64,
    /// ID of the group this post belongs to (None for ungrouped posts).
    pub group_id: Option<i64>,
    /// Optional image path or URL.
    pub image: Option<String>,
    /// Post creation timestamp.
    pub created_at: String,
}

impl Post {
    /// Short preview of the post text, used in log lines.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_LIMIT).collect()
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post text.
    pub text: String,
    /// ID of the authoring user.
    pub author_id: i64,
    /// Optional group.
    pub group_id: Option<i64>,
    /// Optional image path or URL.
    pub image: Option<String>,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(author_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author_id,
            group_id: None,
            image: None,
        }
    }

    /// Attach the post to a group.
    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Attach an image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Data for updating an existing post.
///
/// `group_id` and `image` use nested options so a caller can
/// distinguish "leave unchanged" from "clear the field".
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New text.
    pub text: Option<String>,
    /// New group assignment (Some(None) clears the group).
    pub group_id: Option<Option<i64>>,
    /// New image (Some(None) clears the image).
    pub image: Option<Option<String>>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set new group assignment.
    pub fn group_id(mut self, group_id: Option<i64>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Set new image.
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.group_id.is_none() && self.image.is_none()
    }
}
