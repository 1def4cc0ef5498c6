//! # PhotoRetrievalService
//!
//! Resolves authorized download requests to bytes plus a client-facing
//! filename, and handles owner-initiated photo deletion.

use crate::error::{AppError, Result};
use crate::guard::OwnershipGuard;
use crate::layout::{ArtifactKind, StorageLocation};
use crate::traits::{FileStore, PhotoRepo};
use std::sync::Arc;
use uuid::Uuid;

/// Bytes of one stored artifact plus the name the client should see.
#[derive(Debug, Clone)]
pub struct RetrievedPhoto {
    pub bytes: Vec<u8>,
    /// The original client-supplied filename, never the internal
    /// storage name.
    pub file_name: String,
}

pub struct PhotoRetrievalService {
    guard: OwnershipGuard,
    photos: Arc<dyn PhotoRepo>,
    store: Arc<dyn FileStore>,
}

impl PhotoRetrievalService {
    pub fn new(guard: OwnershipGuard, photos: Arc<dyn PhotoRepo>, store: Arc<dyn FileStore>) -> Self {
        Self {
            guard,
            photos,
            store,
        }
    }

    /// Guard first, then read the requested artifact kind.
    pub async fn retrieve(
        &self,
        account_id: Uuid,
        album_id: Uuid,
        photo_id: Uuid,
        kind: ArtifactKind,
    ) -> Result<RetrievedPhoto> {
        let (album, photo) = self
            .guard
            .authorize_photo(account_id, album_id, photo_id)
            .await?;
        let location = StorageLocation::new(album.id, kind, &photo.storage_file_name);
        let bytes = self.store.read(&location).await?;
        Ok(RetrievedPhoto {
            bytes,
            file_name: photo.original_file_name,
        })
    }

    /// Removes the original file, the thumbnail file, and the record, in
    /// that order. The file steps run independently: a failed one is
    /// logged and remembered, the remaining steps still run. Removing
    /// files before the record means the worst partial outcome is a
    /// record pointing at deleted files, which the caller can retry.
    pub async fn delete(&self, account_id: Uuid, album_id: Uuid, photo_id: Uuid) -> Result<()> {
        let (album, photo) = self
            .guard
            .authorize_photo(account_id, album_id, photo_id)
            .await?;

        let mut failed_steps = Vec::new();
        for kind in [ArtifactKind::Original, ArtifactKind::Thumbnail] {
            let location = StorageLocation::new(album.id, kind, &photo.storage_file_name);
            if let Err(err) = self.store.delete(&location).await {
                log::error!("failed to remove {} for photo {}: {}", location, photo.id, err);
                failed_steps.push(kind.namespace());
            }
        }

        self.photos.delete(photo.id).await?;

        if !failed_steps.is_empty() {
            return Err(AppError::Io(format!(
                "photo record removed but file cleanup failed for: {}",
                failed_steps.join(", ")
            )));
        }
        Ok(())
    }
}
