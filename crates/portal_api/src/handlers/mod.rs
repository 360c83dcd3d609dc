pub mod admin;
pub mod auth;
pub mod documents;
pub mod payment;
pub mod profile;
pub mod progress;

use axum::Json;

use portal_core::error::PortalError;

use crate::error::ApiError;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Presence check for required string fields, mirroring the original
/// per-route validation middleware.
pub(crate) fn require(field: &str, value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError(PortalError::invalid_field(field, message)));
    }
    Ok(())
}
