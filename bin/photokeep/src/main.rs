//! # photokeep Binary
//!
//! The entry point that assembles the application based on compile-time
//! features.

use actix_web::{web, App, HttpServer};
use pk_api::handlers::AppState;
use pk_api::middleware;
use pk_core::thumbnail::DEFAULT_THUMBNAIL_WIDTH;
use pk_core::traits::{AccountRepo, AlbumRepo, FileStore, IdentityProvider, PhotoRepo};
use pk_core::{OwnershipGuard, PhotoIngestionPipeline, PhotoRetrievalService};
use std::env;
use std::sync::Arc;

// Feature-gated imports: This is the "Compiled-to-Order" magic
#[cfg(feature = "db-sqlite")]
use pk_db_sqlite::SqliteMetadataRepo;

#[cfg(feature = "storage-local")]
use pk_storage_local::LocalFileStore;

#[cfg(feature = "auth-email")]
use pk_auth_email::EmailIdentityProvider;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:photokeep.db".to_string());
    let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "./data/photos".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let thumbnail_width = env::var("THUMBNAIL_WIDTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_THUMBNAIL_WIDTH);

    // 1. Initialize the metadata store
    #[cfg(feature = "db-sqlite")]
    let metadata = Arc::new(SqliteMetadataRepo::new(&database_url).await?);

    let accounts: Arc<dyn AccountRepo> = metadata.clone();
    let albums: Arc<dyn AlbumRepo> = metadata.clone();
    let photos: Arc<dyn PhotoRepo> = metadata.clone();

    // 2. Initialize the file store
    #[cfg(feature = "storage-local")]
    let store: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(storage_root.clone().into()));

    // 3. Initialize identity resolution
    #[cfg(feature = "auth-email")]
    let identity: Arc<dyn IdentityProvider> = Arc::new(EmailIdentityProvider::new(accounts));

    // 4. Assemble the core services around the shared guard
    let guard = OwnershipGuard::new(albums.clone(), photos.clone());
    let pipeline = PhotoIngestionPipeline::new(photos.clone(), store.clone(), thumbnail_width);
    let retrieval = PhotoRetrievalService::new(guard.clone(), photos.clone(), store);

    let state = web::Data::new(AppState {
        identity,
        albums,
        photos,
        guard,
        pipeline,
        retrieval,
    });

    log::info!("photokeep listening on http://{bind_addr} (artifacts under {storage_root})");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(pk_api::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await?;
    Ok(())
}
