//! Posts module: posts, groups, comments, and follow relationships.

mod comment;
mod follow;
mod group;
mod post;
mod repository;

pub use comment::{Comment, CommentRepository, NewComment};
pub use follow::FollowRepository;
pub use group::{Group, GroupRepository, NewGroup};
pub use post::{NewPost, Post, PostUpdate, POST_TEXT_MAX, PREVIEW_LIMIT};
pub use repository::PostRepository;
