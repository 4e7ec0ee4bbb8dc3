//! User administration route handlers.
//!
//! All handlers require the admin account; a regular user gets 403.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use driftwood_core::Username;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Request to create a user.
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub username: String,
    pub password: String,
}

/// Request to reset a user's password.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// User list response body.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<Username>,
}

/// List all usernames, sorted.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>> {
    let users = state.users().usernames()?;
    Ok(Json(UserListResponse { users }))
}

/// Create a user.
///
/// # Errors
///
/// Returns 400 for an invalid username or weak password and 409 when
/// the username already exists.
pub async fn add_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<AddUserRequest>,
) -> Result<StatusCode> {
    let username = Username::parse(&body.username)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    state.users().add(&username, &body.password)?;
    tracing::info!(username = %username, "user created");

    Ok(StatusCode::CREATED)
}

/// Delete a user.
///
/// # Errors
///
/// Returns 404 for an unknown username and 403 for the admin account.
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode> {
    let username =
        Username::parse(&username).map_err(|e| AppError::BadRequest(e.to_string()))?;
    state.users().delete(&username)?;
    tracing::info!(username = %username, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Reset a user's password.
///
/// # Errors
///
/// Returns 404 for an unknown username and 400 for a weak password.
pub async fn reset_password(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode> {
    let username =
        Username::parse(&username).map_err(|e| AppError::BadRequest(e.to_string()))?;
    state.users().reset_password(&username, &body.password)?;
    tracing::info!(username = %username, "password reset");

    Ok(StatusCode::NO_CONTENT)
}
