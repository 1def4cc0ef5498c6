//! # StorageLayout
//!
//! Pure path construction for stored artifacts. Every photo owns two
//! artifacts (original and thumbnail) living in disjoint namespaces,
//! each subdivided by album id, so artifacts of the same photo never
//! collide with each other or with another album's files. No filesystem
//! access happens here; plugins root these relative paths and create
//! directories on first write.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Which derived artifact of a photo is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Original,
    Thumbnail,
}

impl ArtifactKind {
    /// Top-level namespace directory for this kind.
    pub fn namespace(self) -> &'static str {
        match self {
            ArtifactKind::Original => "originals",
            ArtifactKind::Thumbnail => "thumbnails",
        }
    }
}

/// The album-scoped address of one stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub album_id: Uuid,
    pub kind: ArtifactKind,
    pub file_name: String,
}

impl StorageLocation {
    pub fn new(album_id: Uuid, kind: ArtifactKind, file_name: impl Into<String>) -> Self {
        Self {
            album_id,
            kind,
            file_name: file_name.into(),
        }
    }

    /// Relative path under the store root: `<kind>/<album_id>/<file_name>`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(self.kind.namespace());
        path.push(self.album_id.to_string());
        path.push(&self.file_name);
        path
    }
}

impl std::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}
