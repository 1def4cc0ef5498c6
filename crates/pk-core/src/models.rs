//! # Domain Models
//!
//! These structs represent the core entities of photokeep.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated principal. Accounts are created and verified by an
/// external identity subsystem; this crate only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// The identity key used by upstream authentication
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A named collection of photos with exactly one immutable owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// The owning account, set at creation and never reassigned
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A stored image scoped to exactly one album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    /// Display name, defaults to the uploaded filename
    pub name: String,
    pub description: String,
    /// The client-supplied filename, used as the download name
    pub original_file_name: String,
    /// The opaque, randomly-prefixed name the bytes live under
    pub storage_file_name: String,
    pub album_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// The slice of a Photo reported back for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            name: photo.name.clone(),
            description: photo.description.clone(),
        }
    }
}

/// One item of a multipart upload, as handed to the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as declared by the client
    pub file_name: String,
    /// Declared content type (e.g., "image/jpeg")
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Per-item outcome of a batch upload. Items are independent; a failed
/// item is reported by its original filename and never aborts the rest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub succeeded: Vec<PhotoSummary>,
    pub failed: Vec<String>,
}
