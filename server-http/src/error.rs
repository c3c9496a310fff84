use crate::api::ErrorResponse;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shared::Error;
use tracing::error;

pub const MISSING_ADDRESS: &str = "Missing 'address' query parameter";

/// Lookup failure as seen at the request boundary
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn missing_address() -> Self {
        Self(Error::InvalidRequest(MISSING_ADDRESS.to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NoResultsFound(_) => StatusCode::NOT_FOUND,
            Error::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::CacheCorruption { .. } | Error::Config(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.0 {
            // Client errors go back as plain text
            Error::InvalidRequest(message) => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response(),
            other => {
                if status.is_server_error() {
                    error!("Lookup failed: {}", other);
                }
                (status, Json(ErrorResponse::new(other.to_string()))).into_response()
            }
        }
    }
}
