use crate::handlers::auth::ErrorResponse;
use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use vitrine_media::ImageError;
use vitrine_models::ImageUpdate;

/// Raw `image` field of a multipart form, before ingestion
#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub declared_mime: Option<String>,
}

/// Text fields and the optional image file of a multipart form.
#[derive(Debug, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("invalid_input", message)),
    )
}

/// An upload that blows the request body limit is still an oversized
/// file, so keep the 413 contract instead of a generic 400.
fn multipart_error(e: MultipartError) -> (StatusCode, Json<ErrorResponse>) {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!("Upload rejected at the body limit: {}", e);
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse::new("invalid_image", "Uploaded file is too large")),
        );
    }

    tracing::debug!("Malformed multipart body: {}", e);
    bad_request("Malformed form data")
}

impl FormFields {
    pub async fn parse(
        mut multipart: Multipart,
    ) -> Result<Self, (StatusCode, Json<ErrorResponse>)> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let declared_mime = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();

                // Browsers submit an empty part when no file is chosen
                if !bytes.is_empty() {
                    fields.image = Some(UploadedImage {
                        bytes,
                        declared_mime,
                    });
                }
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                fields.values.insert(name, value);
            }
        }

        Ok(fields)
    }

    pub fn required(&self, name: &str) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
        self.values
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .ok_or_else(|| bad_request(&format!("Missing field: {}", name)))
    }

    /// Optional text field; empty submissions read as absent
    pub fn optional(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.values.get(name).map(String::as_str),
            Some("true") | Some("1") | Some("on")
        )
    }
}

pub fn image_error(e: ImageError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        ImageError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ImageError::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ImageError::DecodeFailed(_) => StatusCode::BAD_REQUEST,
        ImageError::EncodeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if e.is_client_error() {
        tracing::debug!("Rejected image upload: {}", e);
    } else {
        tracing::error!("Image re-encode failed: {}", e);
    }

    (status, Json(ErrorResponse::new("invalid_image", &e.to_string())))
}

/// Run an uploaded file through the ingestion pipeline. `None` in,
/// `None` out; the record keeps no image.
pub fn process_image(
    image: Option<UploadedImage>,
) -> Result<Option<(Vec<u8>, String)>, (StatusCode, Json<ErrorResponse>)> {
    let Some(upload) = image else {
        return Ok(None);
    };

    let processed = vitrine_media::ingest(&upload.bytes, upload.declared_mime.as_deref())
        .map_err(image_error)?;

    Ok(Some((processed.bytes, processed.mime.to_string())))
}

/// Decide what an update does to a stored image: a new upload replaces
/// it, the `keep_existing_image` flag preserves it, anything else
/// clears it.
pub fn image_update(
    image: Option<UploadedImage>,
    keep_existing: bool,
) -> Result<ImageUpdate, (StatusCode, Json<ErrorResponse>)> {
    match process_image(image)? {
        Some((bytes, mime)) => Ok(ImageUpdate::Replace { bytes, mime }),
        None if keep_existing => Ok(ImageUpdate::Keep),
        None => Ok(ImageUpdate::Remove),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::DefaultBodyLimit,
        http::{header::CONTENT_TYPE, Request},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    async fn collect(multipart: Multipart) -> StatusCode {
        match FormFields::parse(multipart).await {
            Ok(_) => StatusCode::OK,
            Err((status, _)) => status,
        }
    }

    fn upload_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn file_part(boundary: &str, file_bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(file_bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    #[tokio::test]
    async fn test_body_limit_overrun_maps_to_payload_too_large() {
        let app = Router::new()
            .route("/", post(collect))
            .layer(DefaultBodyLimit::max(1024));

        let request = upload_request("xyz", file_part("xyz", &[0u8; 4096]));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_bad_request() {
        let app = Router::new().route("/", post(collect));

        let request = upload_request("xyz", b"--xyz\r\nnot a header".to_vec());
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_flag_parsing() {
        let mut fields = FormFields::default();
        fields
            .values
            .insert("keep_existing_image".to_string(), "true".to_string());
        assert!(fields.flag("keep_existing_image"));

        fields
            .values
            .insert("keep_existing_image".to_string(), "false".to_string());
        assert!(!fields.flag("keep_existing_image"));
        assert!(!fields.flag("missing"));
    }

    #[test]
    fn test_empty_optional_reads_as_absent() {
        let mut fields = FormFields::default();
        fields.values.insert("link".to_string(), "   ".to_string());
        assert_eq!(fields.optional("link"), None);
        assert!(fields.required("link").is_err());
    }

    #[test]
    fn test_keep_flag_without_upload_keeps_image() {
        assert!(matches!(image_update(None, true), Ok(ImageUpdate::Keep)));
        assert!(matches!(image_update(None, false), Ok(ImageUpdate::Remove)));
    }

    #[test]
    fn test_bad_upload_aborts_update() {
        let upload = UploadedImage {
            bytes: b"not an image".to_vec(),
            declared_mime: Some("image/png".to_string()),
        };
        let err = image_update(Some(upload), false).unwrap_err();
        assert_eq!(err.0, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
