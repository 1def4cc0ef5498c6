//! # OwnershipGuard
//!
//! The single policy enforcement point for the account → album → photo
//! ownership chain. Every handler consults this before touching storage
//! or metadata; the chain is never re-derived ad hoc per endpoint.

use crate::error::{AppError, Result};
use crate::models::{Album, Photo};
use crate::traits::{AlbumRepo, PhotoRepo};
use std::sync::Arc;
use uuid::Uuid;

/// Read-only verifier of the ownership chain. No side effects.
#[derive(Clone)]
pub struct OwnershipGuard {
    albums: Arc<dyn AlbumRepo>,
    photos: Arc<dyn PhotoRepo>,
}

impl OwnershipGuard {
    pub fn new(albums: Arc<dyn AlbumRepo>, photos: Arc<dyn PhotoRepo>) -> Self {
        Self { albums, photos }
    }

    /// Verifies `account_id == album.account_id`. Album ownership gates
    /// all descendant access, so this runs before any photo check.
    pub async fn authorize_album(&self, account_id: Uuid, album_id: Uuid) -> Result<Album> {
        let album = self
            .albums
            .find_by_id(album_id)
            .await?
            .ok_or(AppError::AlbumNotFound(album_id))?;
        if album.account_id != account_id {
            return Err(AppError::Forbidden);
        }
        Ok(album)
    }

    /// Verifies the full chain: the album belongs to the account and the
    /// photo belongs to that album. A photo may not be reached through
    /// the wrong album even by its owner.
    pub async fn authorize_photo(
        &self,
        account_id: Uuid,
        album_id: Uuid,
        photo_id: Uuid,
    ) -> Result<(Album, Photo)> {
        let album = self.authorize_album(account_id, album_id).await?;
        let photo = self
            .photos
            .find_by_id(photo_id)
            .await?
            .ok_or(AppError::PhotoNotFound(photo_id))?;
        if photo.album_id != album.id {
            return Err(AppError::Forbidden);
        }
        Ok((album, photo))
    }
}
