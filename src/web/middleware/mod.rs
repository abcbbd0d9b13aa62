//! Middleware for the web API.

pub mod auth;
pub mod cors;

pub use auth::{
    session_auth, AuthUser, CurrentUser, LoginRedirect, OptionalAuthUser, SESSION_COOKIE,
};
pub use cors::create_cors_layer;
