//! # AppError
//!
//! Centralized error handling for the photokeep ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all pk-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Album lookup by id came back empty
    #[error("album not found with ID {0}")]
    AlbumNotFound(Uuid),

    /// Photo lookup by id came back empty
    #[error("photo not found with ID {0}")]
    PhotoNotFound(Uuid),

    /// Ownership chain violated (account → album → photo)
    #[error("forbidden")]
    Forbidden,

    /// Malformed metadata payload (e.g., empty album name)
    #[error("validation error: {0}")]
    Validation(String),

    /// Upload content type is not in the raster-image allow-list
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Thumbnail derivation could not decode or re-encode the image
    #[error("image decode failure: {0}")]
    ImageDecode(String),

    /// A stored artifact is gone from the file store
    #[error("stored file missing: {0}")]
    FileMissing(String),

    /// Storage read/write/delete failed
    #[error("storage I/O failure: {0}")]
    Io(String),

    /// Infrastructure failure (e.g., database down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for the variants that mean "the resource does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::AlbumNotFound(_) | AppError::PhotoNotFound(_))
    }
}

/// A specialized Result type for photokeep logic.
pub type Result<T> = std::result::Result<T, AppError>;
