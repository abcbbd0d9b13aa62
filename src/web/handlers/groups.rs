//! Group handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::posts::{GroupRepository, PostRepository};
use crate::web::dto::{ApiResponse, GroupPageResponse, GroupView, PageQuery, PaginatedResponse};
use crate::web::error::ApiError;

use super::{post_views, AppState};

/// GET /groups - All groups, ordered by title.
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GroupView>>>, ApiError> {
    let groups = GroupRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        groups.into_iter().map(GroupView::from).collect(),
    )))
}

/// GET /group/:slug - A group's posts, paginated.
pub async fn group_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<GroupPageResponse>>, ApiError> {
    let group = GroupRepository::new(state.db.pool())
        .get_by_slug(&slug)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Group not found"))?;

    let repo = PostRepository::new(state.db.pool());
    let total = repo.count_by_group(group.id).await.map_err(ApiError::from)? as u64;

    let requested = crate::pagination::Paginator::parse_page_param(query.page.as_deref());
    let number = state.paginator.clamp(requested, total);
    let posts = repo
        .list_by_group(
            group.id,
            state.paginator.offset(number),
            state.paginator.per_page(),
        )
        .await
        .map_err(ApiError::from)?;

    let views = post_views(&state.db, posts).await?;
    let page = state.paginator.page(views, number, total);
    let paginated = PaginatedResponse::from_page(page);

    Ok(Json(ApiResponse::new(GroupPageResponse {
        group: GroupView::from(group),
        posts: paginated.data,
        meta: paginated.meta,
    })))
}
