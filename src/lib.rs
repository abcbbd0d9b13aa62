//! Pluma - a small publishing platform.
//!
//! Users write short posts, optionally filed under a group, comment on
//! each other's posts, and follow authors to build a subscription feed.
//! Served as a JSON API over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod posts;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, PasswordError};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository, UserUpdate};
pub use error::{PlumaError, Result};
pub use pagination::{Page, Paginator};
pub use posts::{Comment, Group, Post, POST_TEXT_MAX};
pub use web::WebServer;
