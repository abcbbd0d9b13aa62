//! Profile handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::posts::{FollowRepository, PostRepository};
use crate::web::dto::{ApiResponse, PageQuery, PaginatedResponse, ProfileResponse, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::OptionalAuthUser;

use super::{post_views, AppState};

/// GET /profile/:username - An author's posts plus follow counts.
///
/// When the requester is logged in, the response also says whether they
/// follow this author.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let author = UserRepository::new(state.db.pool())
        .get_by_username(&username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let posts_repo = PostRepository::new(state.db.pool());
    let follows = FollowRepository::new(state.db.pool());

    let total = posts_repo
        .count_by_author(author.id)
        .await
        .map_err(ApiError::from)? as u64;
    let follower_count = follows
        .count_followers(author.id)
        .await
        .map_err(ApiError::from)? as u64;
    let following_count = follows
        .count_following(author.id)
        .await
        .map_err(ApiError::from)? as u64;

    let following = match &viewer {
        Some(viewer) => Some(
            follows
                .is_following(viewer.id, author.id)
                .await
                .map_err(ApiError::from)?,
        ),
        None => None,
    };

    let requested = crate::pagination::Paginator::parse_page_param(query.page.as_deref());
    let number = state.paginator.clamp(requested, total);
    let posts = posts_repo
        .list_by_author(
            author.id,
            state.paginator.offset(number),
            state.paginator.per_page(),
        )
        .await
        .map_err(ApiError::from)?;

    let views = post_views(&state.db, posts).await?;
    let paginated = PaginatedResponse::from_page(state.paginator.page(views, number, total));

    Ok(Json(ApiResponse::new(ProfileResponse {
        author: UserInfo {
            id: author.id,
            username: author.username,
        },
        post_count: total,
        follower_count,
        following_count,
        following,
        posts: paginated.data,
        meta: paginated.meta,
    })))
}
