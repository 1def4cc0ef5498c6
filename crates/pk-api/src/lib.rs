//! # pk-api
//!
//! The web routing and orchestration layer for photokeep.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the album service.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Album metadata
            .route("/albums/add", web::post().to(handlers::add_album))
            .route("/albums", web::get().to(handlers::list_albums))
            .route("/albums/{album_id}", web::get().to(handlers::album_by_id))
            .route("/albums/{album_id}/update", web::put().to(handlers::update_album))
            // Photo metadata
            .route(
                "/albums/{album_id}/photos/{photo_id}/update",
                web::put().to(handlers::update_photo),
            )
            .route(
                "/albums/{album_id}/photos/{photo_id}/delete",
                web::delete().to(handlers::delete_photo),
            )
            // Bytes in and out
            .route(
                "/albums/{album_id}/upload-photos",
                web::post().to(handlers::upload_photos),
            )
            .route(
                "/albums/{album_id}/photos/{photo_id}/download-photo",
                web::get().to(handlers::download_photo),
            )
            .route(
                "/albums/{album_id}/photos/{photo_id}/download-thumbnail",
                web::get().to(handlers::download_thumbnail),
            ),
    );
}
