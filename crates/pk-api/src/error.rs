//! HTTP mapping for `pk-core` errors. Not-found and forbidden stay
//! distinguishable here; infrastructure failures surface as a generic
//! server error with no filesystem or database detail in the body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pk_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No resolvable identity on the request
    #[error("missing or unknown account identity")]
    Unauthenticated,

    #[error(transparent)]
    App(#[from] AppError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::App(err) => match err {
                AppError::AlbumNotFound(_) | AppError::PhotoNotFound(_) => StatusCode::NOT_FOUND,
                AppError::Forbidden => StatusCode::FORBIDDEN,
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                AppError::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AppError::FileMissing(_) | AppError::Io(_) | AppError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {self}");
            "internal error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(serde_json::json!({ "error": message }))
    }
}
