use crate::handlers::auth::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use vitrine_database::LifecycleError;
use vitrine_models::{ArchiveAction, PaginatedMessages};

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn clamp(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        (page, limit)
    }
}

#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub action: String,
}

pub(crate) fn lifecycle_error(e: LifecycleError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        LifecycleError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", "Message not found")),
        ),
        LifecycleError::Transaction(e) => {
            tracing::error!("Message lifecycle transaction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        }
    }
}

/// Paginated listing of active messages, newest first
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedMessages>, (StatusCode, Json<ErrorResponse>)> {
    let (page, limit) = pagination.clamp();

    let db_error = |e| {
        tracing::error!("Error loading messages: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("internal_error", "Database error")),
        )
    };

    let total = state.messages.count().await.map_err(db_error)?;
    let data = state.messages.list(page, limit).await.map_err(db_error)?;

    tracing::debug!("Retrieved {} messages (page {})", data.len(), page);
    Ok(Json(PaginatedMessages {
        data,
        total,
        page,
        limit,
    }))
}

/// Move a message between the active table and the archive, driven by
/// the request's `action` field.
pub async fn archive_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let action: ArchiveAction = request.action.parse().map_err(|_| {
        tracing::warn!("Invalid archive action requested: {}", request.action);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid_input", "Invalid archive action")),
        )
    })?;

    match action {
        ArchiveAction::Archive => {
            state.lifecycle.archive(id).await.map_err(lifecycle_error)?;
            tracing::info!("Message {} archived", id);
        }
        ArchiveAction::Restore => {
            state.lifecycle.restore(id).await.map_err(lifecycle_error)?;
            tracing::info!("Message {} restored from archive", id);
        }
    }

    Ok(StatusCode::OK)
}

/// Compatibility shim: the delete verb on an active message archives
/// it. Clients have relied on this for years; there is no hard delete
/// of active messages.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Delete requested for message {}, archiving instead", id);
    state.lifecycle.archive(id).await.map_err(lifecycle_error)?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let p = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(p.clamp(), (1, 10));

        let p = Pagination {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(p.clamp(), (1, 100));

        let p = Pagination {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(p.clamp(), (3, 25));
    }
}
