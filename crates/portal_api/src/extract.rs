use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use portal_core::error::PortalError;
use portal_service::auth::{Claims, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// Admits only a bearer token carrying the admin role. Applicant tokens
/// and anonymous requests are rejected before the handler runs.
pub struct AdminClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError(PortalError::InvalidCredentials))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError(PortalError::InvalidCredentials))?;

        let claims = state.service.verify_token(token).map_err(ApiError)?;
        if claims.role != Role::Admin {
            return Err(ApiError(PortalError::InvalidCredentials));
        }

        Ok(AdminClaims(claims))
    }
}
