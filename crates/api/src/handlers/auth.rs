use crate::cookie;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderName, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use vitrine_auth::{AuthError, SESSION_TTL_HOURS};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

type SetCookie = [(HeaderName, String); 1];

fn set_cookie(value: String) -> SetCookie {
    [(SET_COOKIE, value)]
}

/// Verify the admin password and set the session cookie. A failed
/// attempt also clears any stale cookie the client may still hold.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, SetCookie), (StatusCode, SetCookie, Json<ErrorResponse>)> {
    match state.auth.login(&request.password, Some(addr.ip())).await {
        Ok(session) => {
            let cookie = cookie::session_cookie(&session.session_token, SESSION_TTL_HOURS * 3600);
            Ok((StatusCode::OK, set_cookie(cookie)))
        }
        Err(AuthError::InvalidCredentials) => Err((
            StatusCode::UNAUTHORIZED,
            set_cookie(cookie::clear_cookie()),
            Json(ErrorResponse::new("invalid_credentials", "Invalid credentials")),
        )),
        Err(e) => {
            tracing::error!("Login error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                set_cookie(cookie::clear_cookie()),
                Json(ErrorResponse::new("internal_error", "Database error")),
            ))
        }
    }
}

/// Revoke the current session and clear the cookie. Idempotent: a
/// missing or already-invalid cookie still gets a 200.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, SetCookie), (StatusCode, Json<ErrorResponse>)> {
    if let Some(token) = cookie::extract_token(&headers) {
        state.auth.logout(&token).await.map_err(|e| {
            tracing::error!("Error deleting admin session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        })?;
    } else {
        tracing::debug!("Logout attempted without session cookie");
    }

    Ok((StatusCode::OK, set_cookie(cookie::clear_cookie())))
}

/// Report whether the request carries a valid admin session. Always a
/// boolean body; "not authenticated" is never an error status here.
pub async fn check(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<bool>, (StatusCode, Json<ErrorResponse>)> {
    let Some(token) = cookie::extract_token(&headers) else {
        return Ok(Json(false));
    };

    let authenticated = state
        .auth
        .check(&token, Some(addr.ip()))
        .await
        .map_err(|e| {
            tracing::error!("Error checking admin session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        })?;

    tracing::debug!("Admin check: authenticated={}", authenticated);
    Ok(Json(authenticated))
}
