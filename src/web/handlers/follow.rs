//! Follow handlers: follow, unfollow, and the subscription feed.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::posts::{FollowRepository, PostRepository};
use crate::web::dto::{PageQuery, PaginatedResponse, PostView};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{found, post_views, AppState};

/// GET /profile/:username/follow - Follow an author.
///
/// Repeated follows and self-follows are no-ops; either way the client
/// is sent back to the author's profile.
pub async fn follow_author(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let author = UserRepository::new(state.db.pool())
        .get_by_username(&username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    FollowRepository::new(state.db.pool())
        .follow(user.id, author.id)
        .await
        .map_err(ApiError::from)?;

    Ok(found(format!("/profile/{}", author.username)))
}

/// GET /profile/:username/unfollow - Unfollow an author.
pub async fn unfollow_author(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let author = UserRepository::new(state.db.pool())
        .get_by_username(&username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    FollowRepository::new(state.db.pool())
        .unfollow(user.id, author.id)
        .await
        .map_err(ApiError::from)?;

    Ok(found(format!("/profile/{}", author.username)))
}

/// GET /follow - Posts by authors the user follows, paginated.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<PostView>>, ApiError> {
    let repo = PostRepository::new(state.db.pool());
    let total = repo.count_feed(user.id).await.map_err(ApiError::from)? as u64;

    let requested = crate::pagination::Paginator::parse_page_param(query.page.as_deref());
    let number = state.paginator.clamp(requested, total);
    let posts = repo
        .list_feed(
            user.id,
            state.paginator.offset(number),
            state.paginator.per_page(),
        )
        .await
        .map_err(ApiError::from)?;

    let views = post_views(&state.db, posts).await?;
    Ok(Json(PaginatedResponse::from_page(
        state.paginator.page(views, number, total),
    )))
}
