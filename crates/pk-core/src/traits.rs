//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::error::Result;
use crate::layout::StorageLocation;
use crate::models::{Account, Album, Photo};
use async_trait::async_trait;
use uuid::Uuid;

/// Account lookup contract. Accounts are owned by an external identity
/// subsystem; `create` exists for seeding and tests.
#[async_trait]
pub trait AccountRepo: Send + Sync {
    async fn create(&self, account: Account) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
}

/// Album metadata persistence contract.
#[async_trait]
pub trait AlbumRepo: Send + Sync {
    async fn create(&self, album: Album) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>>;
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Album>>;
    async fn update(&self, album: &Album) -> Result<()>;
}

/// Photo metadata persistence contract.
#[async_trait]
pub trait PhotoRepo: Send + Sync {
    async fn create(&self, photo: Photo) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>>;
    async fn list_by_album(&self, album_id: Uuid) -> Result<Vec<Photo>>;
    async fn update(&self, photo: &Photo) -> Result<()>;
    /// Deleting an id that does not exist is a reportable `PhotoNotFound`,
    /// unlike the idempotent file-level delete in `FileStore`.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Durable byte-level storage contract; the only seam that touches the
/// filesystem or object store.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Writes must never leave a partially-written artifact visible to
    /// `read` (temp file + atomic rename, or equivalent).
    async fn write(&self, location: &StorageLocation, bytes: &[u8]) -> Result<()>;
    /// Fails with `FileMissing` if the location does not exist.
    async fn read(&self, location: &StorageLocation) -> Result<Vec<u8>>;
    /// Idempotent; deleting an already-absent location is not an error.
    async fn delete(&self, location: &StorageLocation) -> Result<()>;
}

/// Identity resolution contract. The request is already authenticated
/// upstream; implementations map its principal to an Account.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, principal: &str) -> Result<Account>;
}
