use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Everything a listing operation can fail with.
///
/// `NotFound` covers both a missing listing and an inactive listing
/// requested by someone other than its owner.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Listing not found")]
    NotFound,

    #[error("Volume must equal minimum volume unless partial fills are allowed")]
    MinVolume,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ListingError {
    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            ListingError::NotFound => "listing_not_found",
            ListingError::MinVolume => "min_volume",
            ListingError::Validation(_) => "validation_failed",
            ListingError::Unauthorized(_) => "unauthorized",
            ListingError::Storage(_) | ListingError::Internal(_) => "internal_error",
        }
    }

    /// Message safe to return to the caller
    fn public_message(&self) -> String {
        match self {
            ListingError::Unauthorized(_) => "Missing or invalid bearer token".to_string(),
            ListingError::Storage(_) | ListingError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ListingError {
    fn status_code(&self) -> StatusCode {
        match self {
            ListingError::NotFound => StatusCode::NOT_FOUND,
            ListingError::MinVolume | ListingError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ListingError::Storage(_) | ListingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ListingError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
            }
            ListingError::Internal(reason) => {
                tracing::error!("Internal failure: {}", reason);
            }
            ListingError::Unauthorized(reason) => {
                tracing::warn!("Rejected request: {}", reason);
            }
            _ => {}
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.public_message(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ListingError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ListingError::MinVolume.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ListingError::Unauthorized("expired".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ListingError::Storage(StoreError::CorruptRow("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ListingError::Internal("no state".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err = ListingError::Storage(StoreError::CorruptRow("details column".into()));
        assert_eq!(err.public_message(), "Internal server error");

        let err = ListingError::Unauthorized("InvalidSignature".into());
        assert!(!err.public_message().contains("InvalidSignature"));
    }
}
