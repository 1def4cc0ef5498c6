//! In-memory implementations of the ports, shared by the unit tests of
//! the guard, pipeline, and retrieval service.

use crate::error::{AppError, Result};
use crate::layout::StorageLocation;
use crate::models::{Account, Album, Photo};
use crate::traits::{AccountRepo, AlbumRepo, FileStore, PhotoRepo};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// All three metadata repos backed by plain maps.
#[derive(Default)]
pub struct MemoryMetadata {
    accounts: Mutex<HashMap<Uuid, Account>>,
    albums: Mutex<HashMap<Uuid, Album>>,
    photos: Mutex<HashMap<Uuid, Photo>>,
}

impl MemoryMetadata {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn seed_account(self: &Arc<Self>, email: &str) -> Account {
        let account = Account {
            id: Uuid::now_v7(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        AccountRepo::create(self.as_ref(), account.clone()).await.unwrap();
        account
    }

    pub async fn seed_album(self: &Arc<Self>, account_id: Uuid, name: &str) -> Album {
        let album = Album {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: String::new(),
            account_id,
            created_at: Utc::now(),
        };
        AlbumRepo::create(self.as_ref(), album.clone()).await.unwrap();
        album
    }

    pub async fn seed_photo(self: &Arc<Self>, album_id: Uuid, file_name: &str) -> Photo {
        let photo = Photo {
            id: Uuid::now_v7(),
            name: file_name.to_string(),
            description: String::new(),
            original_file_name: file_name.to_string(),
            storage_file_name: format!("xxxxxxxxxx{file_name}"),
            album_id,
            created_at: Utc::now(),
        };
        PhotoRepo::create(self.as_ref(), photo.clone()).await.unwrap();
        photo
    }

    pub fn accounts(self: &Arc<Self>) -> Arc<dyn AccountRepo> {
        self.clone()
    }

    pub fn albums(self: &Arc<Self>) -> Arc<dyn AlbumRepo> {
        self.clone()
    }

    pub fn photos(self: &Arc<Self>) -> Arc<dyn PhotoRepo> {
        self.clone()
    }
}

#[async_trait]
impl AccountRepo for MemoryMetadata {
    async fn create(&self, account: Account) -> Result<()> {
        self.accounts.lock().unwrap().insert(account.id, account);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }
}

#[async_trait]
impl AlbumRepo for MemoryMetadata {
    async fn create(&self, album: Album) -> Result<()> {
        self.albums.lock().unwrap().insert(album.id, album);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>> {
        Ok(self.albums.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Album>> {
        Ok(self
            .albums
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn update(&self, album: &Album) -> Result<()> {
        self.albums.lock().unwrap().insert(album.id, album.clone());
        Ok(())
    }
}

#[async_trait]
impl PhotoRepo for MemoryMetadata {
    async fn create(&self, photo: Photo) -> Result<()> {
        self.photos.lock().unwrap().insert(photo.id, photo);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>> {
        Ok(self.photos.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_album(&self, album_id: Uuid) -> Result<Vec<Photo>> {
        Ok(self
            .photos
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.album_id == album_id)
            .cloned()
            .collect())
    }

    async fn update(&self, photo: &Photo) -> Result<()> {
        self.photos.lock().unwrap().insert(photo.id, photo.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.photos
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::PhotoNotFound(id))
    }
}

/// FileStore backed by a map keyed on the relative path.
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn contains(&self, location: &StorageLocation) -> bool {
        self.files
            .lock()
            .unwrap()
            .contains_key(&location.relative_path())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn write(&self, location: &StorageLocation, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(location.relative_path(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, location: &StorageLocation) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(&location.relative_path())
            .cloned()
            .ok_or_else(|| AppError::FileMissing(location.to_string()))
    }

    async fn delete(&self, location: &StorageLocation) -> Result<()> {
        self.files.lock().unwrap().remove(&location.relative_path());
        Ok(())
    }
}

/// A small in-memory PNG for upload tests.
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, RgbImage};
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, 64])
    }));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
