use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use portal_core::models::{DocumentDetails, DocumentUpload};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatus {
    pub documents_uploaded: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGetResponse {
    pub document_details: DocumentDetails,
    pub document_details_status: DocumentStatus,
}

pub async fn get_document_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DocumentGetResponse>, ApiError> {
    let (details, uploaded) = state.service.get_document_details(&user_id).await?;
    Ok(Json(DocumentGetResponse {
        document_details: details,
        document_details_status: DocumentStatus {
            documents_uploaded: uploaded,
        },
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPutResponse {
    pub message: String,
    pub document_details: DocumentDetails,
}

/// The body maps slot keys to `{data, name?, type?}`; each present entry is
/// relayed to the blob store and its URL stored.
pub async fn put_document_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(uploads): Json<HashMap<String, DocumentUpload>>,
) -> Result<Json<DocumentPutResponse>, ApiError> {
    let details = state.service.save_documents(&user_id, uploads).await?;
    Ok(Json(DocumentPutResponse {
        message: "Documents uploaded successfully".to_string(),
        document_details: details,
    }))
}

#[derive(Serialize)]
pub struct DocumentDeleteResponse {
    pub message: String,
}

pub async fn delete_document_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DocumentDeleteResponse>, ApiError> {
    state.service.delete_all_documents(&user_id).await?;
    Ok(Json(DocumentDeleteResponse {
        message: "All documents deleted successfully".to_string(),
    }))
}
