//! Response DTOs for the Pluma web API.

use serde::Serialize;

use crate::pagination::Page;
use crate::posts::{Comment, Group, Post};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Build a paginated response from a page.
    pub fn from_page(page: Page<T>) -> Self {
        let meta = PaginationMeta {
            page: page.number,
            per_page: page.per_page,
            total: page.total_items,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        };
        Self {
            data: page.items,
            meta,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_previous: bool,
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

/// Login / signup response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The authenticated user. The session token travels in a cookie.
    pub user: UserInfo,
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Post in responses.
#[derive(Debug, Serialize)]
pub struct PostView {
    /// Post ID.
    pub id: i64,
    /// Post text.
    pub text: String,
    /// Author username.
    pub author: String,
    /// Group slug, if the post belongs to a group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Image path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl PostView {
    /// Build a view from a post and resolved author/group names.
    pub fn new(post: Post, author: String, group: Option<String>) -> Self {
        Self {
            id: post.id,
            text: post.text,
            author,
            group,
            image: post.image,
            created_at: post.created_at,
        }
    }
}

/// Post detail response, with comments.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    /// The post.
    pub post: PostView,
    /// Total posts by the same author.
    pub author_post_count: u64,
    /// Comments on the post, oldest first.
    pub comments: Vec<CommentView>,
}

/// Comment in responses.
#[derive(Debug, Serialize)]
pub struct CommentView {
    /// Comment ID.
    pub id: i64,
    /// Author username.
    pub author: String,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl CommentView {
    /// Build a view from a comment and its resolved author name.
    pub fn new(comment: Comment, author: String) -> Self {
        Self {
            id: comment.id,
            author,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Group and profile DTOs
// ============================================================================

/// Group in responses.
#[derive(Debug, Serialize)]
pub struct GroupView {
    /// Group ID.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Description.
    pub description: String,
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

/// Edit form response: the post being edited plus the group choices.
#[derive(Debug, Serialize)]
pub struct PostFormResponse {
    /// The post being edited.
    pub post: PostView,
    /// Available groups.
    pub groups: Vec<GroupView>,
}

/// Group page response: group info plus its posts.
#[derive(Debug, Serialize)]
pub struct GroupPageResponse {
    /// The group.
    pub group: GroupView,
    /// Posts in the group, paginated.
    pub posts: Vec<PostView>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

/// Profile page response: author info plus their posts.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The author.
    pub author: UserInfo,
    /// Total posts by this author.
    pub post_count: u64,
    /// Number of users following this author.
    pub follower_count: u64,
    /// Number of authors this user follows.
    pub following_count: u64,
    /// Whether the requesting user follows this author (absent when anonymous).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    /// Posts by the author, paginated.
    pub posts: Vec<PostView>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}
