//! Mapping from action errors to HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::common::DirectoryError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

/// Wrapper so handlers can return `Result<_, ApiError>` and use `?` on actions.
#[derive(Debug)]
pub struct ApiError(pub DirectoryError);

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        Self(err)
    }
}

// Malformed bodies and query strings are caller mistakes like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DirectoryError::invalid(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DirectoryError::invalid(rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DirectoryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::Conflict(_) => StatusCode::CONFLICT,
            DirectoryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DirectoryError::Store(_) | DirectoryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();

        // Store and internal faults are logged in full but never echoed.
        let message = if status.is_server_error() {
            error!(error = %self.0, kind, "Request failed");
            "Something went wrong, please try again".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: message, kind })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AuthError;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (DirectoryError::invalid("bad"), StatusCode::BAD_REQUEST),
            (DirectoryError::NotFound("Resource"), StatusCode::NOT_FOUND),
            (DirectoryError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                DirectoryError::Unauthorized(AuthError::AuthenticationRequired),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DirectoryError::Store(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    async fn body_of(err: DirectoryError) -> (StatusCode, String) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_store_fault_body_is_generic() {
        let (status, body) = body_of(DirectoryError::Store(sqlx::Error::Protocol(
            "no such column: healthcare_resources.secret_notes".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret_notes"));
        assert!(!body.contains("healthcare_resources"));

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Something went wrong, please try again");
        assert_eq!(json["kind"], "store_fault");
    }

    #[tokio::test]
    async fn test_internal_fault_body_is_generic() {
        let (status, body) =
            body_of(DirectoryError::Internal(anyhow::anyhow!("argon2 params rejected"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("argon2"));
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let (status, body) = body_of(DirectoryError::Conflict(
            "you have already reviewed this resource".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("already reviewed"));
    }
}
