use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use portal_core::error::PortalError;
use portal_core::validation::FieldError;

/// Wraps the service error taxonomy so handlers can use `?` and the wire
/// shape stays uniform: `{ success: false, message }`, plus a per-field
/// `errors` array for validation failures.
#[derive(Debug)]
pub struct ApiError(pub PortalError);

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        ApiError(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self.0 {
            PortalError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Some(errors.clone()))
            }
            PortalError::DuplicateIdentity
            | PortalError::InvalidOrExpiredOtp
            | PortalError::AdminNotAllowed
            | PortalError::InvalidTransition { .. } => (StatusCode::BAD_REQUEST, None),
            PortalError::InvalidCredentials => (StatusCode::UNAUTHORIZED, None),
            PortalError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            PortalError::UploadFailed(_)
            | PortalError::Notification(_)
            | PortalError::Database(_)
            | PortalError::Internal(_) => {
                tracing::error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let message = match &self.0 {
            // Do not leak database or internal detail to the client.
            PortalError::Database(_) | PortalError::Internal(_) => {
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            success: false,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}
