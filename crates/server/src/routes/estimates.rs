//! Estimate generation route handler.
//!
//! Renders the session cart into a PDF, archives a copy under the
//! configured output directory, and returns the bytes as a download.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use tokio::fs;
use tower_sessions::Session;

use driftwood_core::ClientInfo;

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::pdf;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Request body naming the client the estimate is for.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Render the current cart as a PDF estimate.
///
/// # Errors
///
/// Returns 400 for a blank client name or an empty cart, 500 if
/// rendering or archiving fails.
pub async fn create(
    RequireUser(user): RequireUser,
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<EstimateRequest>,
) -> Result<Response> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("client name is required".to_string()));
    }

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let client = ClientInfo {
        name: body.name.trim().to_string(),
        address: body.address.trim().to_string(),
        email: body.email.trim().to_string(),
        phone: body.phone.trim().to_string(),
    };

    let generated_at = Local::now();
    let logo = state.config().logo_path.clone();
    let grand_total = cart.grand_total();
    let lines = cart.lines().to_vec();

    // printpdf assembly is CPU work; keep it off the async executor.
    let bytes = tokio::task::spawn_blocking({
        let client = client.clone();
        move || pdf::render(&client, &lines, grand_total, generated_at, logo.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("render task failed: {e}")))??;

    let filename = pdf::output_filename(&client, generated_at);
    let output_dir = state.config().output_dir.clone();
    fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create output dir: {e}")))?;
    let output_path = output_dir.join(&filename);
    fs::write(&output_path, &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("failed to archive estimate: {e}")))?;

    tracing::info!(
        username = %user.username,
        path = %output_path.display(),
        lines = cart.len(),
        "estimate generated"
    );

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response();
    Ok(response)
}
