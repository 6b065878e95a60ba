use crate::error::ImageError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Reject payloads above this size before handing them to a decoder
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Longest edge of a stored image; larger uploads are scaled down
pub const MAX_EDGE: u32 = 1920;

/// Quality setting for the canonical JPEG re-encode
pub const JPEG_QUALITY: u8 = 90;

/// Canonical MIME type of every stored asset
pub const JPEG_MIME: &str = "image/jpeg";

/// Result of a successful ingest: canonical JPEG bytes plus the
/// dimensions they encode.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Validate, decode, bound, and re-encode an untrusted upload.
///
/// The declared MIME type is advisory only; the real format is sniffed
/// from the bytes. Images whose longer edge exceeds [`MAX_EDGE`] are
/// scaled down preserving aspect ratio; smaller images keep their
/// pixel dimensions. Output is always JPEG, whatever came in.
pub fn ingest(raw: &[u8], declared_mime: Option<&str>) -> Result<ProcessedImage, ImageError> {
    if raw.len() > MAX_UPLOAD_BYTES {
        return Err(ImageError::TooLarge {
            size: raw.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let format = image::guess_format(raw).map_err(|_| ImageError::UnsupportedFormat)?;
    if !is_allowed(format) {
        return Err(ImageError::UnsupportedFormat);
    }

    if let Some(declared) = declared_mime {
        if declared != format.to_mime_type() {
            tracing::debug!(
                declared,
                sniffed = format.to_mime_type(),
                "Declared MIME disagrees with sniffed format"
            );
        }
    }

    let decoded =
        image::load_from_memory_with_format(raw, format).map_err(ImageError::DecodeFailed)?;

    let bounded = downscale(decoded);
    let (width, height) = (bounded.width(), bounded.height());

    // JPEG has no alpha channel; flatten before encoding
    let rgb = bounded.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(ImageError::EncodeFailed)?;

    Ok(ProcessedImage {
        bytes: out.into_inner(),
        mime: JPEG_MIME,
        width,
        height,
    })
}

fn is_allowed(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP
    )
}

/// Downscale-only bound: never upscales an image that already fits.
fn downscale(img: DynamicImage) -> DynamicImage {
    if img.width().max(img.height()) <= MAX_EDGE {
        return img;
    }
    img.resize(MAX_EDGE, MAX_EDGE, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 30, 200]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn decode(processed: &ProcessedImage) -> DynamicImage {
        image::load_from_memory(&processed.bytes).unwrap()
    }

    #[test]
    fn test_large_image_is_bounded() {
        let processed = ingest(&png_bytes(4000, 3000), Some("image/png")).unwrap();
        assert_eq!(processed.mime, "image/jpeg");
        assert_eq!(processed.width.max(processed.height), 1920);

        let decoded = decode(&processed);
        assert_eq!(decoded.width(), 1920);
        // Aspect ratio preserved: 4000x3000 -> 1920x1440
        assert_eq!(decoded.height(), 1440);
        assert_eq!(
            image::guess_format(&processed.bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        let processed = ingest(&png_bytes(800, 600), None).unwrap();
        assert_eq!((processed.width, processed.height), (800, 600));

        // Still re-encoded to canonical JPEG
        let decoded = decode(&processed);
        assert_eq!((decoded.width(), decoded.height()), (800, 600));
        assert_eq!(
            image::guess_format(&processed.bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_exact_bound_is_not_resized() {
        let processed = ingest(&png_bytes(1920, 4), None).unwrap();
        assert_eq!((processed.width, processed.height), (1920, 4));
    }

    #[test]
    fn test_alpha_input_is_flattened() {
        let img = ImageBuffer::from_pixel(10, 10, Rgba::<u8>([0, 0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();

        let processed = ingest(&out.into_inner(), Some("image/png")).unwrap();
        assert_eq!(processed.mime, "image/jpeg");
    }

    #[test]
    fn test_oversized_payload_rejected_before_decode() {
        let raw = vec![0u8; MAX_UPLOAD_BYTES + 1];
        match ingest(&raw, None) {
            Err(ImageError::TooLarge { size, limit }) => {
                assert_eq!(size, MAX_UPLOAD_BYTES + 1);
                assert_eq!(limit, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected TooLarge, got {:?}", other.map(|p| p.mime)),
        }
    }

    #[test]
    fn test_undecodable_bytes_rejected() {
        // Not any known image magic
        let raw = b"hello, definitely not an image".to_vec();
        assert!(matches!(
            ingest(&raw, Some("image/jpeg")),
            Err(ImageError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_truncated_png_fails_decode() {
        let mut raw = png_bytes(100, 100);
        raw.truncate(30); // keep the magic, drop the data
        assert!(matches!(
            ingest(&raw, None),
            Err(ImageError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_declared_mime_is_advisory() {
        // PNG bytes declared as JPEG still ingest fine
        let processed = ingest(&png_bytes(20, 20), Some("image/jpeg")).unwrap();
        assert_eq!(processed.mime, "image/jpeg");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ImageError::UnsupportedFormat.is_client_error());
        assert!(ImageError::TooLarge { size: 1, limit: 0 }.is_client_error());
    }
}
