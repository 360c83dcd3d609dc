use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use portal_core::models::PaymentDetails;

use super::require;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusFlags {
    pub payment_completed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentGetResponse {
    pub payment_details: PaymentDetails,
    pub payment_details_status: PaymentStatusFlags,
}

pub async fn get_payment_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PaymentGetResponse>, ApiError> {
    let (details, completed) = state.service.get_payment_details(&user_id).await?;
    Ok(Json(PaymentGetResponse {
        payment_details: details,
        payment_details_status: PaymentStatusFlags {
            payment_completed: completed,
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    pub utr_number: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPutResponse {
    pub message: String,
    pub payment_details: PaymentDetails,
}

pub async fn put_payment_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SubmitPaymentRequest>,
) -> Result<Json<PaymentPutResponse>, ApiError> {
    require("utrNumber", &request.utr_number, "UTR number is required")?;

    let details = state
        .service
        .submit_payment(&user_id, &request.utr_number)
        .await?;
    Ok(Json(PaymentPutResponse {
        message: "Payment details saved successfully".to_string(),
        payment_details: details,
    }))
}
