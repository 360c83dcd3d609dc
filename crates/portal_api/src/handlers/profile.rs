use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use portal_core::models::{CandidateDetails, QualificationDetails};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Candidate details
// ---------------------------------------------------------------------------

/// The stored blocks plus the post applied for, as the wizard re-hydrates
/// them on load.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSection {
    pub post_code: String,
    #[serde(flatten)]
    pub details: CandidateDetails,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateGetResponse {
    pub candidate_details: CandidateSection,
}

pub async fn get_candidate_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CandidateGetResponse>, ApiError> {
    let applicant = state.service.get_candidate_details(&user_id).await?;
    Ok(Json(CandidateGetResponse {
        candidate_details: CandidateSection {
            post_code: applicant.post_code,
            details: applicant.candidate_details,
        },
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePutResponse {
    pub message: String,
    pub candidate_details: CandidateDetails,
}

pub async fn put_candidate_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(details): Json<CandidateDetails>,
) -> Result<Json<CandidatePutResponse>, ApiError> {
    let stored = state.service.save_candidate_details(&user_id, details).await?;
    Ok(Json(CandidatePutResponse {
        message: "Candidate details saved successfully".to_string(),
        candidate_details: stored,
    }))
}

// ---------------------------------------------------------------------------
// Qualification details
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationGetResponse {
    pub success: bool,
    pub qualification_details: QualificationDetails,
}

pub async fn get_qualification_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<QualificationGetResponse>, ApiError> {
    let details = state.service.get_qualification_details(&user_id).await?;
    Ok(Json(QualificationGetResponse {
        success: true,
        qualification_details: details,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationPutResponse {
    pub message: String,
    pub qualification_details: QualificationDetails,
}

pub async fn put_qualification_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(details): Json<QualificationDetails>,
) -> Result<Json<QualificationPutResponse>, ApiError> {
    let stored = state
        .service
        .save_qualification_details(&user_id, details)
        .await?;
    Ok(Json(QualificationPutResponse {
        message: "Qualification details saved successfully".to_string(),
        qualification_details: stored,
    }))
}
