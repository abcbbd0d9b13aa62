//! Session authentication middleware.
//!
//! Authentication is cookie-based: an opaque session token set at login
//! is resolved against the sessions table on every request. Handlers that
//! require a logged-in user take [`AuthUser`]; anonymous visitors are
//! redirected to the login page with the original path in `next`.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::LOCATION, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::db::{SessionRepository, UserRepository};
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "pluma_session";

/// The authenticated user resolved from a session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

/// Rejection for [`AuthUser`]: a 302 redirect to the login page.
///
/// The requested path is preserved in the `next` query parameter so the
/// client can return after logging in.
#[derive(Debug)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    /// Build a redirect that returns to `next` after login.
    pub fn to(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// The login URL this redirect points at.
    pub fn location(&self) -> String {
        format!("/auth/login?next={}", urlencoding::encode(&self.next))
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, self.location())]).into_response()
    }
}

/// Extractor for authenticated users.
///
/// Handlers taking this extractor require a valid session; requests
/// without one get a 302 redirect to the login page.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

/// Resolve the session cookie to a user, if possible.
async fn resolve_session(parts: &Parts) -> Option<CurrentUser> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let state = parts.extensions.get::<Arc<AppState>>()?;

    let session = SessionRepository::new(state.db.pool())
        .get_valid(&token)
        .await
        .ok()??;

    let user = UserRepository::new(state.db.pool())
        .get_by_id(session.user_id)
        .await
        .ok()??;

    if !user.is_active {
        return None;
    }

    Some(CurrentUser {
        id: user.id,
        username: user.username,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match resolve_session(parts).await {
            Some(user) => Ok(AuthUser(user)),
            None => Err(LoginRedirect::to(parts.uri.path())),
        }
    }
}

/// Optional authentication extractor.
///
/// Similar to [`AuthUser`] but yields `None` instead of redirecting when
/// no valid session is present.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<CurrentUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(resolve_session(parts).await))
    }
}

/// Middleware function to inject application state into request extensions,
/// where the session extractors can reach it.
pub async fn session_auth(state: Arc<AppState>, mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(state);
    next.run(request).await
}
