//! # pk-storage-local
//!
//! Local filesystem implementation of `FileStore`. Artifacts live under
//! `<root>/<kind>/<album_id>/<file_name>` as computed by the layout in
//! `pk-core`; namespace directories are created on first write. Writes
//! land in a temporary sibling and are renamed into place so a reader
//! never observes a partial artifact, and every call runs under a
//! bounded timeout so a stuck disk surfaces as an I/O failure instead of
//! hanging the request.

use async_trait::async_trait;
use pk_core::error::{AppError, Result};
use pk_core::layout::StorageLocation;
use pk_core::traits::FileStore;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tokio::time::timeout;

const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct LocalFileStore {
    /// Root directory for all artifacts (e.g., "./data/photos")
    root: PathBuf,
    op_timeout: Duration,
}

impl LocalFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    pub fn with_timeout(root: PathBuf, op_timeout: Duration) -> Self {
        Self { root, op_timeout }
    }

    fn absolute(&self, location: &StorageLocation) -> PathBuf {
        self.root.join(location.relative_path())
    }

    async fn bounded<T>(
        &self,
        what: &str,
        location: &StorageLocation,
        fut: impl std::future::Future<Output = std::io::Result<T>>,
    ) -> Result<T> {
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
                Err(AppError::FileMissing(location.to_string()))
            }
            Ok(Err(err)) => {
                log::warn!("{what} {location} failed: {err}");
                Err(AppError::Io(format!("{what} {location}: {err}")))
            }
            Err(_) => {
                log::warn!("{what} {location} timed out after {:?}", self.op_timeout);
                Err(AppError::Io(format!(
                    "{what} {location}: timed out after {:?}",
                    self.op_timeout
                )))
            }
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(&self, location: &StorageLocation, bytes: &[u8]) -> Result<()> {
        let path = self.absolute(location);
        let parent = path
            .parent()
            .ok_or_else(|| AppError::Io(format!("no parent directory for {location}")))?
            .to_path_buf();
        // unique temp name so two concurrent writes of the same location
        // never trample each other's staging file
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect();
        let staging = parent.join(format!(".{}.{suffix}.part", location.file_name));

        self.bounded("write", location, async {
            fs::create_dir_all(&parent).await?;
            fs::write(&staging, bytes).await?;
            fs::rename(&staging, &path).await
        })
        .await
    }

    async fn read(&self, location: &StorageLocation) -> Result<Vec<u8>> {
        let path = self.absolute(location);
        self.bounded("read", location, fs::read(path)).await
    }

    async fn delete(&self, location: &StorageLocation) -> Result<()> {
        let path = self.absolute(location);
        match timeout(self.op_timeout, fs::remove_file(path)).await {
            Ok(Ok(())) => Ok(()),
            // idempotent: the artifact being gone already is fine
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => Ok(()),
            Ok(Err(err)) => {
                log::warn!("delete {location} failed: {err}");
                Err(AppError::Io(format!("delete {location}: {err}")))
            }
            Err(_) => {
                log::warn!("delete {location} timed out after {:?}", self.op_timeout);
                Err(AppError::Io(format!(
                    "delete {location}: timed out after {:?}",
                    self.op_timeout
                )))
            }
        }
    }
}
