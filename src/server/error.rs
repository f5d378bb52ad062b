//! API error taxonomy
//!
//! Two failure classes cross the HTTP boundary: a field outside its declared
//! range (422, with field-level detail) and a storage failure (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;
use crate::types::ValidationError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                let body = Json(json!({
                    "error": err.to_string(),
                    "field": err.field,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                let body = Json(json!({
                    "error": "storage error",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::Validation(ValidationError {
            field: "room_temp",
            min: 10.0,
            max: 50.0,
            value: 5.0,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_storage_maps_to_500() {
        let err = ApiError::Storage(StoreError::Database(
            rusqlite::Error::InvalidQuery,
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
