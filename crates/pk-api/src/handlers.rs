//! # pk-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! services. Every album- or photo-scoped operation goes through the
//! `OwnershipGuard` before any metadata or storage access.

use crate::dto::{AlbumPayload, AlbumView, PhotoPayload, UploadResponse};
use crate::error::ApiError;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use futures_util::TryStreamExt;
use pk_core::error::AppError;
use pk_core::models::{Account, Album, PhotoSummary, UploadedFile};
use pk_core::traits::{AlbumRepo, IdentityProvider, PhotoRepo};
use pk_core::{ArtifactKind, OwnershipGuard, PhotoIngestionPipeline, PhotoRetrievalService};
use std::sync::Arc;
use uuid::Uuid;

/// Header the upstream authenticator forwards the principal's email in.
pub const ACCOUNT_HEADER: &str = "x-account-email";

/// State shared across all actix-web workers.
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub albums: Arc<dyn AlbumRepo>,
    pub photos: Arc<dyn PhotoRepo>,
    pub guard: OwnershipGuard,
    pub pipeline: PhotoIngestionPipeline,
    pub retrieval: PhotoRetrievalService,
}

/// Resolves the calling account from the authenticated principal.
/// Any resolution failure collapses to 401; existence information about
/// other accounts never leaks through this path.
async fn current_account(req: &HttpRequest, state: &AppState) -> Result<Account, ApiError> {
    let principal = req
        .headers()
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    state
        .identity
        .resolve(principal)
        .await
        .map_err(|_| ApiError::Unauthenticated)
}

fn validated_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()).into());
    }
    Ok(name.to_string())
}

async fn album_view(state: &AppState, album: &Album) -> Result<AlbumView, ApiError> {
    let photos = state.photos.list_by_album(album.id).await?;
    Ok(AlbumView::new(album, &photos))
}

/// Creates an album owned by the calling account.
pub async fn add_album(
    state: web::Data<AppState>,
    payload: web::Json<AlbumPayload>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = current_account(&req, &state).await?;
    let album = Album {
        id: Uuid::now_v7(),
        name: validated_name(&payload.name)?,
        description: payload.description.clone(),
        account_id: account.id,
        created_at: Utc::now(),
    };
    state.albums.create(album.clone()).await?;
    log::info!("account {} created album {}", account.id, album.id);
    Ok(HttpResponse::Created().json(AlbumView::new(&album, &[])))
}

/// Lists the calling account's albums with nested photo summaries.
pub async fn list_albums(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = current_account(&req, &state).await?;
    let albums = state.albums.list_by_account(account.id).await?;
    let mut views = Vec::with_capacity(albums.len());
    for album in &albums {
        views.push(album_view(&state, album).await?);
    }
    Ok(HttpResponse::Ok().json(views))
}

pub async fn album_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = current_account(&req, &state).await?;
    let album = state.guard.authorize_album(account.id, *path).await?;
    Ok(HttpResponse::Ok().json(album_view(&state, &album).await?))
}

/// Updates an album's display metadata; the owner column never changes.
pub async fn update_album(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<AlbumPayload>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = current_account(&req, &state).await?;
    let mut album = state.guard.authorize_album(account.id, *path).await?;
    album.name = validated_name(&payload.name)?;
    album.description = payload.description.clone();
    state.albums.update(&album).await?;
    Ok(HttpResponse::Ok().json(album_view(&state, &album).await?))
}

pub async fn update_photo(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<PhotoPayload>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let (album_id, photo_id) = path.into_inner();
    let account = current_account(&req, &state).await?;
    let (_album, mut photo) = state
        .guard
        .authorize_photo(account.id, album_id, photo_id)
        .await?;
    photo.name = validated_name(&payload.name)?;
    photo.description = payload.description.clone();
    state.photos.update(&photo).await?;
    Ok(HttpResponse::Ok().json(PhotoSummary::from(&photo)))
}

/// Removes the photo's files and record.
pub async fn delete_photo(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let (album_id, photo_id) = path.into_inner();
    let account = current_account(&req, &state).await?;
    state.retrieval.delete(account.id, album_id, photo_id).await?;
    Ok(HttpResponse::Accepted().finish())
}

/// Batch upload into an album. The guard runs once for the album; the
/// pipeline then processes every item independently and reports
/// per-item success or failure.
pub async fn upload_photos(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = current_account(&req, &state).await?;
    let album = state.guard.authorize_album(account.id, *path).await?;
    let uploads = collect_uploads(payload).await?;
    let report = state.pipeline.ingest(&album, uploads).await;
    Ok(HttpResponse::Ok().json(UploadResponse::from(report)))
}

pub async fn download_photo(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    download(state, path, req, ArtifactKind::Original).await
}

pub async fn download_thumbnail(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    download(state, path, req, ArtifactKind::Thumbnail).await
}

/// Shared download path for both artifact kinds. The attachment name is
/// always the client-supplied original filename.
async fn download(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
    kind: ArtifactKind,
) -> Result<HttpResponse, ApiError> {
    let (album_id, photo_id) = path.into_inner();
    let account = current_account(&req, &state).await?;
    let retrieved = state
        .retrieval
        .retrieve(account.id, album_id, photo_id, kind)
        .await?;
    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", retrieved.file_name),
        ))
        .body(retrieved.bytes))
}

/// Drains the multipart stream into memory. Each part becomes one
/// pipeline item carrying its declared filename and content type.
async fn collect_uploads(mut payload: Multipart) -> Result<Vec<UploadedFile>, ApiError> {
    let mut uploads = Vec::new();
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned)
            .unwrap_or_default();
        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_owned())
            .unwrap_or_default();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            bytes.extend_from_slice(&chunk);
        }
        uploads.push(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Ok(uploads)
}

fn malformed(err: actix_multipart::MultipartError) -> ApiError {
    ApiError::from(AppError::Validation(format!("malformed multipart payload: {err}")))
}
