//! Router configuration for the web API.

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_comment, create_form, create_post, edit_form, edit_post, feed, follow_author, group_page,
    index, list_groups, login, logout, post_detail, profile, signup, unfollow_author, AppState,
};
use super::middleware::{create_cors_layer, session_auth};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout));

    // State is injected into request extensions so the session extractors
    // can reach the database.
    let state_for_middleware = app_state.clone();

    Router::new()
        .route("/", get(index))
        .route("/groups", get(list_groups))
        .route("/group/:slug", get(group_page))
        .route("/profile/:username", get(profile))
        .route("/profile/:username/follow", get(follow_author))
        .route("/profile/:username/unfollow", get(unfollow_author))
        .route("/posts/:id", get(post_detail))
        .route("/posts/:id/edit", get(edit_form).post(edit_post))
        .route("/posts/:id/comment", post(add_comment))
        .route("/create", get(create_form).post(create_post))
        .route("/follow", get(feed))
        .nest("/auth", auth_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = state_for_middleware.clone();
                    session_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// 404 fallback for unknown paths.
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "Page not found"
            }
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
