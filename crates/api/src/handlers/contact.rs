use crate::handlers::auth::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Form, Json};
use std::sync::Arc;
use validator::Validate;
use vitrine_models::{ContactForm, NewMessage};

/// Public contact-form submission. Bot submissions (honeypot filled)
/// and invalid input are rejected before anything touches storage.
pub async fn submit_message(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if form.is_bot() {
        tracing::warn!("Honeypot triggered, dropping contact submission");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid_input", "Invalid submission")),
        ));
    }

    form.validate().map_err(|e| {
        tracing::debug!("Contact form validation failed: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid_input", "Invalid submission")),
        )
    })?;

    state
        .messages
        .create(&NewMessage::from(form))
        .await
        .map_err(|e| {
            tracing::error!("Failed to save contact message: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        })?;

    Ok(StatusCode::OK)
}
