use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;
use crate::models::{ErrorResponse, LocationError};
use crate::services::StoreError;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please provide latitude/longitude of the search location, e.g. location=40.779979,-73.980274")]
    MissingLocation,

    #[error("Please provide a valid latitude/longitude for the search location, e.g. location=40.779979,-73.980274 ({0})")]
    InvalidLocation(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Failed to load food trucks: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Value of the `error.type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingLocation => "Missing location",
            ApiError::InvalidLocation(_) => "Invalid location",
            ApiError::InvalidQuery(_) => "Invalid query",
            ApiError::Storage(_) => "Database error",
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Missing => ApiError::MissingLocation,
            LocationError::Invalid(reason) => ApiError::InvalidLocation(reason),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingLocation | ApiError::InvalidLocation(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.kind(), self.to_string()))
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ApiError::InvalidQuery(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_location_errors_are_client_errors() {
        let missing = ApiError::from(LocationError::Missing);
        assert_eq!(missing.kind(), "Missing location");
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let invalid = ApiError::from(LocationError::Invalid("'x' is not a number".to_string()));
        assert_eq!(invalid.kind(), "Invalid location");
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert!(invalid.to_string().contains("'x' is not a number"));
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let err = ApiError::from(StoreError::InvalidRecord("row has no integer id".to_string()));
        assert_eq!(err.kind(), "Database error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
