//! Image ingestion pipeline: size-cap, sniff, decode, bounded downscale, JPEG re-encode.

pub mod error;
pub mod processor;

pub use error::ImageError;
pub use processor::{ingest, ProcessedImage, JPEG_MIME, JPEG_QUALITY, MAX_EDGE, MAX_UPLOAD_BYTES};
