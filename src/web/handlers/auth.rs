//! Authentication handlers: signup, login, logout.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::db::{NewSession, NewUser, SessionRepository, UserRepository};
use crate::web::dto::{ApiResponse, LoginRequest, LoginResponse, SignupRequest, UserInfo, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::SESSION_COOKIE;

use super::AppState;

/// Build the session cookie for a freshly issued token.
///
/// Expiry is enforced server-side against the sessions table, so the
/// cookie itself carries no max-age.
fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Issue and store a session for a user, returning the token.
async fn issue_session(state: &AppState, user_id: i64) -> Result<String, ApiError> {
    let new_session = NewSession::issue(user_id, state.session_expiry_days);
    SessionRepository::new(state.db.pool())
        .create(&new_session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store session: {}", e);
            ApiError::internal("Failed to create session")
        })?;
    Ok(new_session.token)
}

/// POST /auth/signup - Create an account and log in.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    crate::auth::validate_password(&req.password)
        .map_err(|e| ApiError::unprocessable(format!("Password error: {}", e)))?;

    let password_hash = crate::auth::hash_password(&req.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .create(&NewUser::new(req.username.as_str(), password_hash))
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                ApiError::conflict("Username already exists")
            } else {
                tracing::error!("User creation failed: {}", e);
                ApiError::internal("Failed to create user")
            }
        })?;

    let token = issue_session(&state, user.id).await?;
    let jar = jar.add(session_cookie(token));

    tracing::info!(username = %user.username, "New user signed up");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            username: user.username,
        },
    };

    Ok((StatusCode::CREATED, jar, Json(ApiResponse::new(response))))
}

/// POST /auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_username(&req.username)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    crate::auth::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?;

    if !user.is_active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    let token = issue_session(&state, user.id).await?;
    let jar = jar.add(session_cookie(token));

    if let Err(e) = repo.update_last_login(user.id).await {
        tracing::warn!(error = %e, "Failed to record last login");
    }

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            username: user.username,
        },
    };

    Ok((jar, Json(ApiResponse::new(response))))
}

/// POST /auth/logout - Revoke the session and clear the cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let _ = SessionRepository::new(state.db.pool())
            .revoke(cookie.value())
            .await;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    let jar = jar.remove(removal);

    Ok((jar, Json(ApiResponse::new(()))))
}
