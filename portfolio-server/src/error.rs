//! Error type for the HTTP handlers.
//!
//! Every failure maps to `{success: false, message}` (plus `errors` for
//! validation). Storage and upstream details go to the log, never into the
//! response.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use github_client::GitHubError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

use crate::validation::FieldViolation;

pub const INVALID_FORM_MESSAGE: &str = "Invalid form data";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Which upstream GitHub resource a proxy call was fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubResource {
    User,
    Repos,
}

impl GitHubResource {
    /// Generic message shown to the caller when the fetch fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            GitHubResource::User => "Failed to fetch GitHub data",
            GitHubResource::Repos => "Failed to fetch GitHub repository data",
        }
    }
}

impl fmt::Display for GitHubResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHubResource::User => f.write_str("user"),
            GitHubResource::Repos => f.write_str("repos"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid form data: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("GitHub {resource} request failed: {source}")]
    GitHub {
        resource: GitHubResource,
        #[source]
        source: GitHubError,
    },
}

impl AppError {
    pub fn github(resource: GitHubResource) -> impl FnOnce(GitHubError) -> Self {
        move |source| AppError::GitHub { resource, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) | AppError::GitHub { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldViolation]>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, errors) = match &self {
            AppError::Validation(violations) => (INVALID_FORM_MESSAGE, Some(violations.as_slice())),
            AppError::PayloadTooLarge => (TOO_LARGE_MESSAGE, None),
            AppError::Storage(_) => {
                error!(error = %self, "Contact message could not be stored");
                (INTERNAL_ERROR_MESSAGE, None)
            }
            AppError::GitHub { resource, source } => {
                error!(
                    resource = %resource,
                    upstream_status = ?source.upstream_status(),
                    error = %source,
                    "GitHub proxy request failed"
                );
                (resource.failure_message(), None)
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let err = AppError::Validation(vec![FieldViolation::new("email", "Required")]);
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], INVALID_FORM_MESSAGE);
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][0]["reason"], "Required");
    }

    #[tokio::test]
    async fn test_payload_too_large_is_413() {
        let (status, body) = body_json(AppError::PayloadTooLarge).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, serde_json::json!({"success": false, "message": TOO_LARGE_MESSAGE}));
    }

    #[tokio::test]
    async fn test_storage_error_does_not_leak_details() {
        let err = AppError::Storage(StorageError::Database("disk I/O error at /var/db".into()));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(body.get("errors").is_none());
        assert!(!body.to_string().contains("/var/db"));
    }

    #[tokio::test]
    async fn test_github_error_uses_generic_message() {
        let source = GitHubError::Status {
            status: 404,
            url: "https://api.github.com/users/ghost".into(),
            body: r#"{"message":"Not Found"}"#.into(),
        };
        let (status, body) = body_json(AppError::github(GitHubResource::Repos)(source)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch GitHub repository data");
        assert!(!body.to_string().contains("Not Found"));
    }
}
