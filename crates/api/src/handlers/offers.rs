use crate::handlers::auth::ErrorResponse;
use crate::handlers::upload::{self, FormFields};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::{header::CONTENT_TYPE, HeaderName, StatusCode},
    Json,
};
use std::sync::Arc;
use vitrine_database::{repositories::offers::OfferChanges, DatabaseError};
use vitrine_models::{NewOffer, OfferDto};

fn db_error(e: DatabaseError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        DatabaseError::NotFound(what) => {
            tracing::debug!("Not found: {}", what);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("not_found", "Offer not found")),
            )
        }
        e => {
            tracing::error!("Offer storage error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        }
    }
}

/// Create an offer from a multipart form. An uploaded image goes
/// through the ingestion pipeline first; if that fails, nothing is
/// written.
pub async fn create_offer(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<OfferDto>, (StatusCode, Json<ErrorResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;
    let (image, image_mime) = match upload::process_image(fields.image.take())? {
        Some((bytes, mime)) => (Some(bytes), Some(mime)),
        None => (None, None),
    };

    let new_offer = NewOffer {
        title: fields.required("title")?,
        slug: fields.required("slug")?,
        description: fields.optional("description"),
        link: fields.optional("link"),
        image,
        image_mime,
    };

    let offer = state.offers.create(&new_offer).await.map_err(db_error)?;

    tracing::info!("Offer {} created", offer.id);
    Ok(Json(OfferDto::from(offer)))
}

/// Update an offer. The stored image is replaced, kept, or removed
/// depending on the uploaded file and the `keep_existing_image` flag.
pub async fn update_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;
    let image = upload::image_update(fields.image.take(), fields.flag("keep_existing_image"))?;

    let changes = OfferChanges {
        title: fields.required("title")?,
        slug: fields.required("slug")?,
        description: fields.optional("description"),
        link: fields.optional("link"),
    };

    state
        .offers
        .update(id, &changes, image)
        .await
        .map_err(db_error)?;

    tracing::info!("Offer {} updated", id);
    Ok(StatusCode::OK)
}

pub async fn delete_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.offers.delete(id).await.map_err(db_error)?;
    tracing::info!("Offer {} deleted", id);
    Ok(StatusCode::OK)
}

/// Public listing of offers, newest first
pub async fn list_offers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OfferDto>>, (StatusCode, Json<ErrorResponse>)> {
    let offers = state.offers.list().await.map_err(db_error)?;
    Ok(Json(offers.into_iter().map(OfferDto::from).collect()))
}

/// Serve an offer's stored image with its canonical MIME type
pub async fn offer_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<([(HeaderName, String); 1], Vec<u8>), (StatusCode, Json<ErrorResponse>)> {
    let image = state.offers.image(id).await.map_err(db_error)?;

    match image {
        Some((bytes, mime)) => Ok(([(CONTENT_TYPE, mime)], bytes)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", "Offer has no image")),
        )),
    }
}
