//! Authentication route handlers.
//!
//! Login verifies credentials against the user store; a failure is
//! always reported the same way regardless of cause.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use driftwood_core::Username;

use crate::error::{AppError, Result};
use crate::middleware::{clear_session, set_current_user};
use crate::models::session::CurrentUser;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: Username,
    pub is_admin: bool,
}

/// Log in and establish a session.
///
/// # Errors
///
/// Returns 401 for any credential failure, without distinguishing an
/// unknown username from a wrong password.
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username =
        Username::parse(&body.username).map_err(|_| AppError::InvalidCredentials)?;

    if !state.users().verify(&username, &body.password) {
        tracing::debug!(username = %username, "login rejected");
        return Err(AppError::InvalidCredentials);
    }

    let user = CurrentUser {
        username: username.clone(),
    };
    set_current_user(&session, &user).await?;
    tracing::info!(username = %username, "login succeeded");

    Ok(Json(LoginResponse {
        is_admin: username.is_admin(),
        username,
    }))
}

/// Log out, dropping the session and its cart.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_session(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
