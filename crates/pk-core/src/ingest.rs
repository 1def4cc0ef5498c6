//! # PhotoIngestionPipeline
//!
//! Orchestrates validate → name → store original → thumbnail → store
//! thumbnail → record metadata for each uploaded item. Items are
//! independent: one failure is reported in the batch result and never
//! aborts the rest.

use crate::error::{AppError, Result};
use crate::layout::{ArtifactKind, StorageLocation};
use crate::models::{Album, IngestReport, Photo, PhotoSummary, UploadedFile};
use crate::traits::{FileStore, PhotoRepo};
use crate::{naming, thumbnail};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// The raster image types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

pub struct PhotoIngestionPipeline {
    photos: Arc<dyn PhotoRepo>,
    store: Arc<dyn FileStore>,
    thumbnail_width: u32,
}

impl PhotoIngestionPipeline {
    pub fn new(photos: Arc<dyn PhotoRepo>, store: Arc<dyn FileStore>, thumbnail_width: u32) -> Self {
        Self {
            photos,
            store,
            thumbnail_width,
        }
    }

    /// Ingests a batch into an album the caller has already authorized
    /// through the `OwnershipGuard`. Failed items are reported by their
    /// original filename.
    pub async fn ingest(&self, album: &Album, uploads: Vec<UploadedFile>) -> IngestReport {
        let mut report = IngestReport::default();
        for upload in uploads {
            match self.ingest_one(album, &upload).await {
                Ok(summary) => report.succeeded.push(summary),
                Err(err) => {
                    log::warn!(
                        "upload of {:?} into album {} failed: {}",
                        upload.file_name,
                        album.id,
                        err
                    );
                    report.failed.push(upload.file_name);
                }
            }
        }
        report
    }

    /// The Photo record is persisted only after both artifact writes
    /// succeed, so a record never points at files that were not stored.
    /// A failure between the two writes can leave an orphaned original;
    /// the item is still reported as failed, never as success.
    async fn ingest_one(&self, album: &Album, upload: &UploadedFile) -> Result<PhotoSummary> {
        if !ALLOWED_CONTENT_TYPES.contains(&upload.content_type.as_str()) {
            return Err(AppError::UnsupportedMediaType(upload.content_type.clone()));
        }

        let storage_file_name = naming::storage_file_name(&upload.file_name);
        let original = StorageLocation::new(album.id, ArtifactKind::Original, &storage_file_name);
        self.store.write(&original, &upload.bytes).await?;

        let thumb_bytes = thumbnail::make_thumbnail(&upload.bytes, self.thumbnail_width)?;
        let thumb = StorageLocation::new(album.id, ArtifactKind::Thumbnail, &storage_file_name);
        self.store.write(&thumb, &thumb_bytes).await?;

        let photo = Photo {
            id: Uuid::now_v7(),
            name: upload.file_name.clone(),
            description: String::new(),
            original_file_name: upload.file_name.clone(),
            storage_file_name,
            album_id: album.id,
            created_at: Utc::now(),
        };
        let summary = PhotoSummary::from(&photo);
        self.photos.create(photo).await?;
        Ok(summary)
    }
}
