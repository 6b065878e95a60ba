use crate::cookie;
use crate::handlers::auth::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Requester address for session IP binding, when the transport knows it
pub fn client_ip(request: &Request) -> Option<IpAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("unauthorized", "Admin session required")),
    )
}

/// Middleware guarding every admin route: a request proceeds only with
/// a valid, unexpired, IP-matching session cookie. Everything else is
/// a uniform 401.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie::extract_token(request.headers()).ok_or_else(unauthorized)?;
    let ip = client_ip(&request);

    let authenticated = state.auth.check(&token, ip).await.map_err(|e| {
        tracing::error!("Error checking admin session: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("internal_error", "Database error")),
        )
    })?;

    if !authenticated {
        return Err(unauthorized());
    }

    Ok(next.run(request).await)
}
