//! Web API Follow Tests
//!
//! Integration tests for following authors and the subscription feed.

use axum::http::{header::LOCATION, StatusCode};
use axum_test::{TestServer, TestServerConfig};
use pluma::posts::{FollowRepository, NewPost, PostRepository};
use pluma::web::{create_router, AppState};
use pluma::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Attach a new test server (with its own cookie jar) to a database.
fn attach_server(db: Database) -> TestServer {
    let state = Arc::new(AppState::new(db, 10, Duration::ZERO, 14));
    let router = create_router(state, &[]);
    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(router, config).expect("Failed to create test server")
}

/// Sign up a user; the session cookie lands in the server's cookie jar.
async fn signup(server: &TestServer, username: &str) {
    let response = server
        .post("/auth/signup")
        .json(&json!({
            "username": username,
            "password": "password123"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

/// Two logged-in users (alice and bob) on the same database.
async fn two_users() -> (TestServer, TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let alice = attach_server(db.clone());
    let bob = attach_server(db.clone());
    signup(&alice, "alice").await;
    signup(&bob, "bob").await;
    (alice, bob, db)
}

// ============================================================================
// Follow / Unfollow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_and_unfollow_author() {
    let (alice, _bob, db) = two_users().await;

    let response = alice.get("/profile/bob/follow").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/profile/bob");

    let follows = FollowRepository::new(db.pool());
    assert!(follows.is_following(1, 2).await.unwrap());

    let response = alice.get("/profile/bob/unfollow").await;
    response.assert_status(StatusCode::FOUND);
    assert!(!follows.is_following(1, 2).await.unwrap());
}

#[tokio::test]
async fn test_follow_unfollow_nets_to_zero() {
    let (alice, _bob, db) = two_users().await;
    let follows = FollowRepository::new(db.pool());

    let before = follows.count_following(1).await.unwrap();

    alice.get("/profile/bob/follow").await;
    alice.get("/profile/bob/unfollow").await;

    assert_eq!(follows.count_following(1).await.unwrap(), before);
}

#[tokio::test]
async fn test_repeated_follow_creates_single_edge() {
    let (alice, _bob, db) = two_users().await;

    alice.get("/profile/bob/follow").await;
    alice.get("/profile/bob/follow").await;
    alice.get("/profile/bob/follow").await;

    let follows = FollowRepository::new(db.pool());
    assert_eq!(follows.count_followers(2).await.unwrap(), 1);
}

#[tokio::test]
async fn test_self_follow_is_noop() {
    let (alice, _bob, db) = two_users().await;

    let response = alice.get("/profile/alice/follow").await;
    response.assert_status(StatusCode::FOUND);

    let follows = FollowRepository::new(db.pool());
    assert!(!follows.is_following(1, 1).await.unwrap());
}

#[tokio::test]
async fn test_follow_unknown_author_not_found() {
    let (alice, _bob, _db) = two_users().await;

    let response = alice.get("/profile/nobody/follow").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_requires_login() {
    let db = Database::open_in_memory().await.unwrap();
    let server = attach_server(db);

    let response = server.get("/profile/bob/follow").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/auth/login?next=%2Fprofile%2Fbob%2Ffollow"
    );
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_feed_shows_followed_authors_posts() {
    let (alice, bob, _db) = two_users().await;

    bob.post("/create")
        .json(&json!({"text": "Bob's post"}))
        .await
        .assert_status(StatusCode::FOUND);

    alice.get("/profile/bob/follow").await;

    let body: Value = alice.get("/follow").await.json();
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["text"], "Bob's post");
    assert_eq!(posts[0]["author"], "bob");
}

#[tokio::test]
async fn test_feed_excludes_unfollowed_authors() {
    let (alice, bob, _db) = two_users().await;

    bob.post("/create")
        .json(&json!({"text": "Bob's post"}))
        .await;

    // Alice follows nobody
    let body: Value = alice.get("/follow").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Bob does not see his own posts in his feed either
    let body: Value = bob.get("/follow").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_feed_empties_after_unfollow() {
    let (alice, bob, _db) = two_users().await;

    bob.post("/create")
        .json(&json!({"text": "Bob's post"}))
        .await;
    alice.get("/profile/bob/follow").await;

    let body: Value = alice.get("/follow").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    alice.get("/profile/bob/unfollow").await;

    let body: Value = alice.get("/follow").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_feed_newest_first_and_paginated() {
    let (alice, _bob, db) = two_users().await;

    let repo = PostRepository::new(db.pool());
    for i in 1..=12 {
        repo.create(&NewPost::new(2, format!("Post {i}")))
            .await
            .unwrap();
    }
    alice.get("/profile/bob/follow").await;

    let body: Value = alice.get("/follow").await.json();
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0]["text"], "Post 12");
    assert_eq!(body["meta"]["total"], 12);
    assert_eq!(body["meta"]["total_pages"], 2);

    let body: Value = alice
        .get("/follow")
        .add_query_param("page", "2")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Profile Follow Metadata Tests
// ============================================================================

#[tokio::test]
async fn test_profile_shows_follow_counts_and_flag() {
    let (alice, _bob, _db) = two_users().await;

    alice.get("/profile/bob/follow").await;

    let body: Value = alice.get("/profile/bob").await.json();
    assert_eq!(body["data"]["author"]["username"], "bob");
    assert_eq!(body["data"]["follower_count"], 1);
    assert_eq!(body["data"]["following"], true);

    let body: Value = alice.get("/profile/alice").await.json();
    assert_eq!(body["data"]["following_count"], 1);
    assert_eq!(body["data"]["follower_count"], 0);
    assert_eq!(body["data"]["following"], false);
}

#[tokio::test]
async fn test_profile_anonymous_has_no_follow_flag() {
    let (alice, _bob, db) = two_users().await;
    alice.get("/profile/bob/follow").await;

    let anon = attach_server(db);
    let body: Value = anon.get("/profile/bob").await.json();

    assert_eq!(body["data"]["follower_count"], 1);
    assert!(body["data"].get("following").is_none());
}
