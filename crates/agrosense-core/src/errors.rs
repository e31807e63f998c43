//! Application error type shared by every agrosense service.
//!
//! Every failure carries an [`ErrorKind`] that decides the HTTP status and the
//! machine-checkable `kind` field of the response body. Storage and internal
//! failures are logged with their cause and answered with a generic message.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, malformed, tampered or expired bearer token.
    Unauthenticated,
    /// Credentials did not match at login.
    Unauthorized,
    /// Valid token, wrong role.
    Forbidden,
    NotFound,
    Conflict,
    /// Request body could not be parsed.
    BadRequest,
    /// Request body parsed but failed field rules.
    Validation,
    StorageUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated | ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::StorageUnavailable | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Validation => "validation_error",
            ErrorKind::StorageUnavailable => "storage_unavailable",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether the underlying error text may be shown to the caller.
    fn is_public(self) -> bool {
        !matches!(self, ErrorKind::StorageUnavailable | ErrorKind::Internal)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::StorageUnavailable, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> String {
        if self.kind.is_public() {
            return self.error.to_string();
        }
        match self.kind {
            ErrorKind::StorageUnavailable => "Storage is unavailable".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.kind.is_public() {
            tracing::error!(kind = self.kind.as_str(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.public_message(),
            "kind": self.kind.as_str(),
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_kind_status_mapping() {
        assert_eq!(ErrorKind::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ErrorKind::StorageUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_public_error_body() {
        let (status, body) = body_of(AppError::not_found(anyhow::anyhow!("Parcel not found"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Parcel not found");
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let err = AppError::storage(anyhow::anyhow!("connection refused to 10.0.0.7:5432"));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "storage_unavailable");
        assert!(!body["error"].as_str().unwrap().contains("10.0.0.7"));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::forbidden("Access denied");
        assert_eq!(err.to_string(), "forbidden: Access denied");
    }
}
