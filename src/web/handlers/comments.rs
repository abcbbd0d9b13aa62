//! Comment handlers.

use axum::{
    extract::{Path, State},
    response::Response,
};
use std::sync::Arc;

use crate::posts::{CommentRepository, NewComment, PostRepository};
use crate::web::dto::{CommentRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{found, AppState};

/// POST /posts/:id/comment - Add a comment, then redirect to the post.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> Result<Response, ApiError> {
    PostRepository::new(state.db.pool())
        .get_by_id(post_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    CommentRepository::new(state.db.pool())
        .create(&NewComment::new(post_id, user.id, req.text))
        .await
        .map_err(ApiError::from)?;

    Ok(found(format!("/posts/{}", post_id)))
}
