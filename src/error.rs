//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationError;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or a path parameter did not have the expected shape.
    ///
    /// The contained [ValidationError] lists every offending field so the
    /// client can fix all of them in one go.
    #[error("{0}")]
    Validation(ValidationError),

    /// The session cookie is missing from the request.
    ///
    /// Raised by the session guard on endpoints that read transactions.
    #[error("the session cookie is missing from the request")]
    MissingSession,

    /// The request body is larger than the server is willing to read.
    #[error("the request body is too large")]
    PayloadTooLarge,

    /// The request body is not declared as JSON.
    #[error("the request body must have the content type application/json")]
    UnsupportedMediaType,

    /// The requested route does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    ///
    /// The error should only be logged on the server, clients receive a
    /// generic internal server error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::Validation(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(error) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation failed",
                    "issues": error.issues,
                })),
            )
                .into_response(),
            Error::MissingSession => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthorized" })),
            )
                .into_response(),
            Error::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "error": "payload too large" })),
            )
                .into_response(),
            Error::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({ "error": "unsupported media type" })),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not found" })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            // This is the one place server errors are logged.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        validation::{FieldIssue, ValidationError},
    };

    async fn body_json(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_lists_issues() {
        let error = Error::Validation(ValidationError {
            issues: vec![FieldIssue::new("title", "expected a string")],
        });

        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["issues"][0]["field"], "title");
        assert_eq!(body["issues"][0]["message"], "expected a string");
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let (status, body) = body_json(Error::MissingSession).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn body_errors_have_their_own_status() {
        let (status, body) = body_json(Error::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "payload too large");

        let (status, body) = body_json(Error::UnsupportedMediaType).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "unsupported media type");
    }

    #[test]
    fn sql_errors_convert_to_sql_error() {
        let error = Error::from(rusqlite::Error::InvalidQuery);

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
    }

    #[tokio::test]
    async fn sql_error_hides_details() {
        let (status, body) =
            body_json(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "internal server error" }));
    }
}
