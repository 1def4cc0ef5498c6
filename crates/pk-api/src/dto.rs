//! Request payloads and response views. Pure field mapping between the
//! wire shapes and the `pk-core` models.

use pk_core::models::{Album, IngestReport, Photo, PhotoSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for creating or updating an album.
#[derive(Debug, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body for updating a photo's display metadata.
#[derive(Debug, Deserialize)]
pub struct PhotoPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub file_name: String,
    pub download_link: String,
}

impl PhotoView {
    pub fn from_photo(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            name: photo.name.clone(),
            description: photo.description.clone(),
            file_name: photo.original_file_name.clone(),
            download_link: download_link(photo.album_id, photo.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlbumView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub photos: Vec<PhotoView>,
}

impl AlbumView {
    pub fn new(album: &Album, photos: &[Photo]) -> Self {
        Self {
            id: album.id,
            name: album.name.clone(),
            description: album.description.clone(),
            photos: photos.iter().map(PhotoView::from_photo).collect(),
        }
    }
}

/// Batch upload outcome: per-item successes and the original filenames
/// of the items that failed.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: Vec<PhotoSummary>,
    pub errors: Vec<String>,
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            success: report.succeeded,
            errors: report.failed,
        }
    }
}

/// Relative link a client can follow to fetch the original bytes.
pub fn download_link(album_id: Uuid, photo_id: Uuid) -> String {
    format!("albums/{album_id}/photos/{photo_id}/download-photo")
}
