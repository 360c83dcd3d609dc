use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use portal_core::models::{PaidApplicant, PaymentDetails, PaymentStatus};

use crate::error::ApiError;
use crate::extract::AdminClaims;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDecisionRequest {
    pub status: String,
    #[serde(default)]
    pub admin_remarks: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDecisionResponse {
    pub message: String,
    pub payment_details: PaymentDetails,
}

pub async fn put_payment_status(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<PaymentDecisionRequest>,
) -> Result<Json<PaymentDecisionResponse>, ApiError> {
    let status: PaymentStatus = request.status.parse()?;

    let details = state
        .service
        .set_payment_status(&user_id, status, request.admin_remarks)
        .await?;

    Ok(Json(PaymentDecisionResponse {
        message: format!("Payment status updated to {}", status),
        payment_details: details,
    }))
}

#[derive(Serialize)]
pub struct UsersPaymentsResponse {
    pub users: Vec<PaidApplicant>,
}

pub async fn get_users_payments(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> Result<Json<UsersPaymentsResponse>, ApiError> {
    let users = state.service.list_paid_applicants().await?;
    Ok(Json(UsersPaymentsResponse { users }))
}
