//! Product image validation and storage
//!
//! Uploads are decoded (so only real images are accepted), re-encoded as
//! JPEG and stored under a content-hash file name, which deduplicates
//! identical uploads.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::utils::{AppError, AppResult, ErrorCode};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// JPEG quality for product images
const JPEG_QUALITY: u8 = 85;

/// URL prefix under which stored images are referenced
pub const IMAGE_URL_PREFIX: &str = "/uploads";

/// Validate raw upload bytes against size and extension rules
pub fn validate_image(data: &[u8], filename: &str) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Decode and re-encode as JPEG
fn compress_to_jpeg(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
    })?;

    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    Ok(buffer)
}

/// Validate, compress and store an upload; returns the image reference
pub async fn store_image(uploads_dir: &Path, data: Vec<u8>, filename: &str) -> AppResult<String> {
    validate_image(&data, filename)?;

    let compressed = tokio::task::spawn_blocking(move || compress_to_jpeg(&data))
        .await
        .map_err(|e| AppError::internal(format!("Image task failed: {e}")))??;

    let hash = hex::encode(Sha256::digest(&compressed));
    let stored_name = format!("{hash}.jpg");
    let path: PathBuf = uploads_dir.join(&stored_name);

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| storage_failed(format!("Failed to create uploads directory: {e}")))?;
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        tracing::info!(original_name = %filename, stored = %stored_name, "Duplicate image reused");
    } else {
        tokio::fs::write(&path, &compressed)
            .await
            .map_err(|e| storage_failed(format!("Failed to save file: {e}")))?;
        tracing::info!(
            original_name = %filename,
            stored = %stored_name,
            size = compressed.len(),
            "Image stored"
        );
    }

    Ok(format!("{IMAGE_URL_PREFIX}/{stored_name}"))
}

fn storage_failed(msg: String) -> AppError {
    AppError::with_message(ErrorCode::FileStorageFailed, msg)
}
