//! Post handlers: index listing, detail, create, edit.

use axum::{
    extract::{Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::posts::{
    CommentRepository, GroupRepository, NewPost, PostRepository, PostUpdate,
};
use crate::web::dto::{
    ApiResponse, CommentView, CreatePostRequest, GroupView, PageQuery, PaginatedResponse,
    PostDetailResponse, PostFormResponse, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{found, post_views, AppState};

/// Build a JSON response from an already-serialized body.
fn json_body(body: String) -> Response {
    ([(CONTENT_TYPE, "application/json")], body).into_response()
}

/// GET / - Recent posts, paginated.
///
/// Rendered pages are served from a short TTL cache, so a post created
/// moments ago may not show up until the cached page expires.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let requested = crate::pagination::Paginator::parse_page_param(query.page.as_deref());

    if let Some(body) = state.index_cache.get(requested) {
        return Ok(json_body(body));
    }

    let repo = PostRepository::new(state.db.pool());
    let total = repo.count_all().await.map_err(ApiError::from)? as u64;
    let number = state.paginator.clamp(requested, total);
    let posts = repo
        .list_recent(state.paginator.offset(number), state.paginator.per_page())
        .await
        .map_err(ApiError::from)?;

    let views = post_views(&state.db, posts).await?;
    let response = PaginatedResponse::from_page(state.paginator.page(views, number, total));

    let body = serde_json::to_string(&response)
        .map_err(|e| ApiError::internal(format!("Serialization failed: {}", e)))?;
    state.index_cache.put(requested, body.clone());

    Ok(json_body(body))
}

/// GET /posts/:id - Post detail with comments.
pub async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let author_post_count = repo
        .count_by_author(post.author_id)
        .await
        .map_err(ApiError::from)? as u64;

    let comments = CommentRepository::new(state.db.pool())
        .list_by_post(id)
        .await
        .map_err(ApiError::from)?;

    let users = UserRepository::new(state.db.pool());
    let mut comment_views = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = users
            .get_by_id(comment.author_id)
            .await
            .map_err(ApiError::from)?
            .map(|u| u.username)
            .unwrap_or_else(|| "[deleted]".to_string());
        comment_views.push(CommentView::new(comment, author));
    }

    let mut views = post_views(&state.db, vec![post]).await?;
    let post_view = views.remove(0);

    Ok(Json(ApiResponse::new(PostDetailResponse {
        post: post_view,
        author_post_count,
        comments: comment_views,
    })))
}

/// GET /create - Data for the post creation form (the available groups).
///
/// Requires a logged-in user, like the POST it accompanies.
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
) -> Result<Json<ApiResponse<Vec<GroupView>>>, ApiError> {
    let groups = GroupRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        groups.into_iter().map(GroupView::from).collect(),
    )))
}

/// POST /create - Create a post, then redirect to the author's profile.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<Response, ApiError> {
    if let Some(group_id) = req.group_id {
        GroupRepository::new(state.db.pool())
            .get_by_id(group_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unprocessable("Unknown group"))?;
    }

    let mut new_post = NewPost::new(user.id, req.text);
    if let Some(group_id) = req.group_id {
        new_post = new_post.with_group(group_id);
    }
    if let Some(image) = req.image {
        new_post = new_post.with_image(image);
    }

    let post = PostRepository::new(state.db.pool())
        .create(&new_post)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        post_id = post.id,
        author = %user.username,
        preview = %post.preview(),
        "Post created"
    );

    Ok(found(format!("/profile/{}", user.username)))
}

/// GET /posts/:id/edit - Data for the edit form (post plus group choices).
///
/// Restricted to the author, like the POST it accompanies.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostFormResponse>>, ApiError> {
    let post = PostRepository::new(state.db.pool())
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if post.author_id != user.id {
        return Err(ApiError::forbidden("Only the author can edit a post"));
    }

    let groups = GroupRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    let mut views = post_views(&state.db, vec![post]).await?;
    Ok(Json(ApiResponse::new(PostFormResponse {
        post: views.remove(0),
        groups: groups.into_iter().map(GroupView::from).collect(),
    })))
}

/// POST /posts/:id/edit - Edit a post. Only the author may edit.
pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Response, ApiError> {
    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if post.author_id != user.id {
        return Err(ApiError::forbidden("Only the author can edit a post"));
    }

    let mut update = PostUpdate::new();
    if let Some(text) = req.text {
        update = update.text(text);
    }
    if req.clear_group {
        update = update.group_id(None);
    } else if let Some(group_id) = req.group_id {
        GroupRepository::new(state.db.pool())
            .get_by_id(group_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unprocessable("Unknown group"))?;
        update = update.group_id(Some(group_id));
    }
    if let Some(image) = req.image {
        update = update.image(Some(image));
    }

    repo.update(id, &update).await.map_err(ApiError::from)?;

    Ok(found(format!("/posts/{}", id)))
}
