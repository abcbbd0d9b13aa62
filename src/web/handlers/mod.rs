//! HTTP handlers for the web API.

mod auth;
mod comments;
mod follow;
mod groups;
mod posts;
mod profiles;

pub use auth::{login, logout, signup};
pub use comments::add_comment;
pub use follow::{feed, follow_author, unfollow_author};
pub use groups::{group_page, list_groups};
pub use posts::{create_form, create_post, edit_form, edit_post, index, post_detail};
pub use profiles::profile;

use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::time::Duration;

use crate::db::{Database, UserRepository};
use crate::pagination::Paginator;
use crate::posts::{GroupRepository, Post};
use crate::web::cache::PageCache;
use crate::web::dto::PostView;
use crate::web::error::ApiError;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Paginator configured with the page size.
    pub paginator: Paginator,
    /// TTL cache for the index page.
    pub index_cache: PageCache,
    /// Session cookie lifetime in days.
    pub session_expiry_days: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, per_page: u32, index_ttl: Duration, session_expiry_days: u64) -> Self {
        Self {
            db,
            paginator: Paginator::new(per_page),
            index_cache: PageCache::new(index_ttl),
            session_expiry_days,
        }
    }
}

/// A 302 Found redirect to the given location.
///
/// `axum::response::Redirect` emits 303 for `to`, so page-style redirects
/// build the response directly.
pub fn found(location: impl AsRef<str>) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, location.as_ref().to_string())],
    )
        .into_response()
}

/// Resolve posts into views, looking up author usernames and group slugs.
///
/// Lookups are memoized per call; listings rarely span more than a page.
pub(crate) async fn post_views(db: &Database, posts: Vec<Post>) -> Result<Vec<PostView>, ApiError> {
    let users = UserRepository::new(db.pool());
    let groups = GroupRepository::new(db.pool());

    let mut usernames: HashMap<i64, String> = HashMap::new();
    let mut slugs: HashMap<i64, String> = HashMap::new();
    let mut views = Vec::with_capacity(posts.len());

    for post in posts {
        if !usernames.contains_key(&post.author_id) {
            let user = users
                .get_by_id(post.author_id)
                .await
                .map_err(ApiError::from)?
                .ok_or_else(|| ApiError::internal("Post author missing"))?;
            usernames.insert(post.author_id, user.username);
        }
        let author = usernames[&post.author_id].clone();

        let group = match post.group_id {
            Some(group_id) => {
                if !slugs.contains_key(&group_id) {
                    let group = groups
                        .get_by_id(group_id)
                        .await
                        .map_err(ApiError::from)?
                        .ok_or_else(|| ApiError::internal("Post group missing"))?;
                    slugs.insert(group_id, group.slug);
                }
                Some(slugs[&group_id].clone())
            }
            None => None,
        };

        views.push(PostView::new(post, author, group));
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_redirect() {
        let response = found("/profile/alice");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/profile/alice"
        );
    }
}
