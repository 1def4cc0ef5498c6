//! # pk-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `pk-core` domain models.

use async_trait::async_trait;
use pk_core::error::{AppError, Result};
use pk_core::models::{Account, Album, Photo};
use pk_core::traits::{AccountRepo, AlbumRepo, PhotoRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// All three metadata repos backed by one SQLite pool.
pub struct SqliteMetadataRepo {
    pool: SqlitePool,
}

// Helpers for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Internal(format!("database error: {err}"))
}

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS accounts (
        id BLOB PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS albums (
        id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        account_id BLOB NOT NULL REFERENCES accounts(id),
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS photos (
        id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        original_file_name TEXT NOT NULL,
        storage_file_name TEXT NOT NULL,
        album_id BLOB NOT NULL REFERENCES albums(id),
        created_at TEXT NOT NULL
    )",
];

impl SqliteMetadataRepo {
    /// Connects and applies the schema. `url` is a sqlx SQLite URL,
    /// e.g. `sqlite:photokeep.db` or `sqlite::memory:`.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_err)?
            .create_if_missing(true);
        // an in-memory database lives inside its connection; a pool of
        // one keeps it visible to every query
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(db_err)?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await.map_err(db_err)?;
        }
        log::debug!("sqlite metadata store ready at {url}");
        Ok(Self { pool })
    }

    fn row_to_album(row: &sqlx::sqlite::SqliteRow) -> Album {
        Album {
            id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
            name: row.get("name"),
            description: row.get("description"),
            account_id: blob_to_uuid(row.get::<Vec<u8>, _>("account_id").as_slice()),
            created_at: row.get("created_at"),
        }
    }

    fn row_to_photo(row: &sqlx::sqlite::SqliteRow) -> Photo {
        Photo {
            id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
            name: row.get("name"),
            description: row.get("description"),
            original_file_name: row.get("original_file_name"),
            storage_file_name: row.get("storage_file_name"),
            album_id: blob_to_uuid(row.get::<Vec<u8>, _>("album_id").as_slice()),
            created_at: row.get("created_at"),
        }
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
        Account {
            id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
            email: row.get("email"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl AccountRepo for SqliteMetadataRepo {
    async fn create(&self, account: Account) -> Result<()> {
        sqlx::query("INSERT INTO accounts (id, email, created_at) VALUES (?, ?, ?)")
            .bind(uuid_to_blob(account.id))
            .bind(account.email)
            .bind(account.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id, email, created_at FROM accounts WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(Self::row_to_account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id, email, created_at FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(Self::row_to_account))
    }
}

#[async_trait]
impl AlbumRepo for SqliteMetadataRepo {
    async fn create(&self, album: Album) -> Result<()> {
        sqlx::query(
            "INSERT INTO albums (id, name, description, account_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(album.id))
        .bind(album.name)
        .bind(album.description)
        .bind(uuid_to_blob(album.account_id))
        .bind(album.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>> {
        let row = sqlx::query("SELECT * FROM albums WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(Self::row_to_album))
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Album>> {
        let rows = sqlx::query("SELECT * FROM albums WHERE account_id = ? ORDER BY created_at ASC")
            .bind(uuid_to_blob(account_id))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(Self::row_to_album).collect())
    }

    /// The owner column is immutable; only display metadata is written.
    async fn update(&self, album: &Album) -> Result<()> {
        let result = sqlx::query("UPDATE albums SET name = ?, description = ? WHERE id = ?")
            .bind(&album.name)
            .bind(&album.description)
            .bind(uuid_to_blob(album.id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::AlbumNotFound(album.id));
        }
        Ok(())
    }
}

#[async_trait]
impl PhotoRepo for SqliteMetadataRepo {
    async fn create(&self, photo: Photo) -> Result<()> {
        sqlx::query(
            "INSERT INTO photos (id, name, description, original_file_name, storage_file_name, album_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(photo.id))
        .bind(photo.name)
        .bind(photo.description)
        .bind(photo.original_file_name)
        .bind(photo.storage_file_name)
        .bind(uuid_to_blob(photo.album_id))
        .bind(photo.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>> {
        let row = sqlx::query("SELECT * FROM photos WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(Self::row_to_photo))
    }

    async fn list_by_album(&self, album_id: Uuid) -> Result<Vec<Photo>> {
        let rows = sqlx::query("SELECT * FROM photos WHERE album_id = ? ORDER BY created_at ASC")
            .bind(uuid_to_blob(album_id))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(Self::row_to_photo).collect())
    }

    async fn update(&self, photo: &Photo) -> Result<()> {
        let result = sqlx::query("UPDATE photos SET name = ?, description = ? WHERE id = ?")
            .bind(&photo.name)
            .bind(&photo.description)
            .bind(uuid_to_blob(photo.id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::PhotoNotFound(photo.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::PhotoNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn memory_repo() -> SqliteMetadataRepo {
        SqliteMetadataRepo::new("sqlite::memory:").await.unwrap()
    }

    fn account(email: &str) -> Account {
        Account {
            id: Uuid::now_v7(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    fn album(account_id: Uuid, name: &str) -> Album {
        Album {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: "some pics".to_string(),
            account_id,
            created_at: Utc::now(),
        }
    }

    fn photo(album_id: Uuid, file_name: &str) -> Photo {
        Photo {
            id: Uuid::now_v7(),
            name: file_name.to_string(),
            description: String::new(),
            original_file_name: file_name.to_string(),
            storage_file_name: format!("aB3dE5fG7h{file_name}"),
            album_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_account_roundtrip_by_email() {
        let repo = memory_repo().await;
        let acc = account("me@example.com");
        AccountRepo::create(&repo, acc.clone()).await.unwrap();

        let found = repo.find_by_email("me@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, acc.id);
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_albums_list_only_their_owner() {
        let repo = memory_repo().await;
        let a = account("a@example.com");
        let b = account("b@example.com");
        AccountRepo::create(&repo, a.clone()).await.unwrap();
        AccountRepo::create(&repo, b.clone()).await.unwrap();

        AlbumRepo::create(&repo, album(a.id, "Trip")).await.unwrap();
        AlbumRepo::create(&repo, album(a.id, "Food")).await.unwrap();
        AlbumRepo::create(&repo, album(b.id, "Work")).await.unwrap();

        assert_eq!(repo.list_by_account(a.id).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_account(b.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_album_update_touches_display_fields_only() {
        let repo = memory_repo().await;
        let acc = account("a@example.com");
        AccountRepo::create(&repo, acc.clone()).await.unwrap();
        let mut alb = album(acc.id, "Trip");
        AlbumRepo::create(&repo, alb.clone()).await.unwrap();

        alb.name = "Trip 2024".to_string();
        alb.description = "updated".to_string();
        AlbumRepo::update(&repo, &alb).await.unwrap();

        let found = AlbumRepo::find_by_id(&repo, alb.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Trip 2024");
        assert_eq!(found.account_id, acc.id);
    }

    #[tokio::test]
    async fn test_photo_crud_and_not_found_delete() {
        let repo = memory_repo().await;
        let acc = account("a@example.com");
        AccountRepo::create(&repo, acc.clone()).await.unwrap();
        let alb = album(acc.id, "Trip");
        AlbumRepo::create(&repo, alb.clone()).await.unwrap();

        let ph = photo(alb.id, "beach.jpg");
        PhotoRepo::create(&repo, ph.clone()).await.unwrap();
        assert_eq!(repo.list_by_album(alb.id).await.unwrap().len(), 1);

        let found = PhotoRepo::find_by_id(&repo, ph.id).await.unwrap().unwrap();
        assert_eq!(found.storage_file_name, ph.storage_file_name);

        PhotoRepo::delete(&repo, ph.id).await.unwrap();
        assert!(repo.list_by_album(alb.id).await.unwrap().is_empty());

        // deleting a record that is already gone is a reportable error
        let err = PhotoRepo::delete(&repo, ph.id).await.unwrap_err();
        assert!(matches!(err, AppError::PhotoNotFound(_)));
    }
}
