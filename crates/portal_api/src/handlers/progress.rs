use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use portal_core::models::PaymentStatus;
use portal_core::progress::Step;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressFlags {
    pub candidate_completed: bool,
    pub qualification_completed: bool,
    pub document_completed: bool,
    pub payment_completed: bool,
    pub payment_status: PaymentStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub success: bool,
    pub progress: ProgressFlags,
    pub current_step: Option<Step>,
    pub current_route: String,
}

/// Where the wizard stands, derived server-side from the stored data.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let (report, payment_status) = state.service.get_progress(&user_id).await?;

    Ok(Json(ProgressResponse {
        success: true,
        progress: ProgressFlags {
            candidate_completed: report.is_completed(Step::CandidateDetails),
            qualification_completed: report.is_completed(Step::QualificationDetails),
            document_completed: report.is_completed(Step::DocumentDetails),
            payment_completed: report.is_completed(Step::Payment),
            payment_status,
        },
        current_step: report.current_step,
        current_route: report.current_route.to_string(),
    }))
}
