use crate::handlers::auth::ErrorResponse;
use crate::handlers::messages::{lifecycle_error, Pagination};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use vitrine_models::PaginatedArchivedMessages;

/// Paginated listing of archived messages, most recently archived first
pub async fn list_archived_messages(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedArchivedMessages>, (StatusCode, Json<ErrorResponse>)> {
    let (page, limit) = pagination.clamp();

    let total = state
        .lifecycle
        .count_archived()
        .await
        .map_err(lifecycle_error)?;
    let data = state
        .lifecycle
        .list_archived(page, limit)
        .await
        .map_err(lifecycle_error)?;

    tracing::debug!("Retrieved {} archived messages (page {})", data.len(), page);
    Ok(Json(PaginatedArchivedMessages {
        data,
        total,
        page,
        limit,
    }))
}

/// Hard delete of an archived message. Irreversible.
pub async fn permanently_delete_archived_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .lifecycle
        .permanently_delete(id)
        .await
        .map_err(lifecycle_error)?;

    tracing::info!("Archived message {} permanently deleted", id);
    Ok(StatusCode::OK)
}
