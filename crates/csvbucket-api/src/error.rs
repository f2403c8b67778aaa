//! API Error Types
//!
//! | Variant         | Status | Body                                 |
//! |-----------------|--------|--------------------------------------|
//! | `Validation`    | 422    | `{"detail": [{loc, msg, type}, ...]}` |
//! | `InvalidBody`   | 422    | `{"detail": [{loc, msg, type}]}`      |
//! | `UpstreamRead`  | 500    | `{"detail": "Error leyendo S3: ..."}` |
//! | `UpstreamWrite` | 500    | `{"detail": "Error subiendo a S3: ..."}` |
//!
//! Client errors are produced before any storage access.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use csvbucket_core::ValidationError;
use thiserror::Error;

use crate::models::{ErrorResponse, FieldErrorBody, ValidationErrorResponse};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Error leyendo S3: {0}")]
    UpstreamRead(#[source] csvbucket_storage::Error),

    #[error("Error subiendo a S3: {0}")]
    UpstreamWrite(#[source] csvbucket_storage::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UpstreamRead(_) | ApiError::UpstreamWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(err) => {
                let detail = err
                    .errors
                    .into_iter()
                    .map(|e| FieldErrorBody {
                        loc: vec!["body".to_string(), e.field],
                        msg: e.message,
                        kind: e.code,
                    })
                    .collect();
                (status, Json(ValidationErrorResponse { detail })).into_response()
            }
            ApiError::InvalidBody(msg) => {
                let detail = vec![FieldErrorBody {
                    loc: vec!["body".to_string()],
                    msg,
                    kind: "invalid_body".to_string(),
                }];
                (status, Json(ValidationErrorResponse { detail })).into_response()
            }
            upstream => {
                let body = ErrorResponse {
                    detail: upstream.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvbucket_core::Record;

    fn storage_read_error() -> csvbucket_storage::Error {
        csvbucket_storage::Error::Read {
            key: "datos.csv".to_string(),
            source: object_store::Error::Generic {
                store: "S3",
                source: "AccessDenied".into(),
            },
        }
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err: ApiError = Record::new("", 30, 1.7).unwrap_err().into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_invalid_body_is_unprocessable() {
        let err = ApiError::InvalidBody("missing field `edad`".to_string());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_read_message() {
        let err = ApiError::UpstreamRead(storage_read_error());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let msg = err.to_string();
        assert!(msg.starts_with("Error leyendo S3: "));
        assert!(msg.contains("AccessDenied"));
    }

    #[test]
    fn test_upstream_write_message() {
        let err = ApiError::UpstreamWrite(csvbucket_storage::Error::Write {
            key: "datos.csv".to_string(),
            source: object_store::Error::Generic {
                store: "S3",
                source: "SlowDown".into(),
            },
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Error subiendo a S3: "));
    }
}
