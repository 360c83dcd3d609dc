use std::collections::HashMap;

use aws_sdk_s3::primitives::ByteStream;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use sha2::{Digest, Sha256};

use portal_core::error::{PortalError, Result};
use portal_core::models::{DocumentDetails, DocumentKind, DocumentUpload};

use crate::PortalService;

impl PortalService {
    /// Creates the document bucket if this deployment has never seen one.
    /// Called once at startup.
    pub async fn ensure_bucket(&self) -> Result<()> {
        match self.s3.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_bucket_already_owned_by_you()
                    || service_err.is_bucket_already_exists()
                {
                    Ok(())
                } else {
                    Err(PortalError::Internal(format!(
                        "bucket initialization failed: {}",
                        service_err
                    )))
                }
            }
        }
    }

    pub async fn get_document_details(
        &self,
        applicant_id: &str,
    ) -> Result<(DocumentDetails, bool)> {
        let applicant = self.load_applicant(applicant_id).await?;
        Ok((applicant.document_details, applicant.documents_uploaded))
    }

    /// Uploads every submitted slot to the blob store and merges the
    /// returned URLs into the sub-profile. Uploads run one at a time (bounds
    /// memory on multi-document submissions); the first failure aborts the
    /// whole request and nothing is persisted — blobs already uploaded in
    /// this request stay behind as orphans, accepted.
    pub async fn save_documents(
        &self,
        applicant_id: &str,
        uploads: HashMap<String, DocumentUpload>,
    ) -> Result<DocumentDetails> {
        let applicant = self.load_applicant(applicant_id).await?;
        let mut details = applicant.document_details;

        // Reject unknown slot keys before touching the blob store.
        for key in uploads.keys() {
            if DocumentKind::from_key(key).is_none() {
                return Err(PortalError::invalid_field(
                    key,
                    "Unknown document type",
                ));
            }
        }

        // Fixed slot order keeps upload sequence (and so the stored key
        // timestamps) deterministic.
        for kind in DocumentKind::ALL {
            let Some(upload) = uploads.get(kind.key()) else {
                continue;
            };
            let url = self.upload_document(applicant_id, kind, upload).await?;
            details.set_url(kind, url);
        }

        self.applicants()
            .save_document_details(applicant_id, &details, true)
            .await
            .map_err(PortalError::from)?;
        Ok(details)
    }

    async fn upload_document(
        &self,
        applicant_id: &str,
        kind: DocumentKind,
        upload: &DocumentUpload,
    ) -> Result<String> {
        let bytes = BASE64.decode(upload.data.as_bytes()).map_err(|_| {
            PortalError::invalid_field(kind.key(), "Payload is not valid base64")
        })?;

        kind.validate_upload(upload.media_type.as_deref(), bytes.len())
            .map_err(|e| PortalError::Validation(vec![e]))?;

        let checksum = hex::encode(Sha256::digest(&bytes));
        let object_key = format!(
            "{}/{}_{}_{}",
            applicant_id,
            applicant_id,
            kind.key(),
            Utc::now().timestamp()
        );

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(
                upload
                    .media_type
                    .as_deref()
                    .unwrap_or("application/octet-stream"),
            )
            .metadata("sha256", checksum)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(kind = kind.key(), error = %e, "document upload failed");
                PortalError::UploadFailed(format!("Failed to upload {}", kind.key()))
            })?;

        Ok(format!(
            "{}/{}/{}",
            self.settings.s3_public_url.trim_end_matches('/'),
            self.bucket,
            object_key
        ))
    }

    /// Clears every slot. Blob deletion is best-effort: a storage error is
    /// logged and the metadata reset still goes through, matching the
    /// original behavior.
    pub async fn delete_all_documents(&self, applicant_id: &str) -> Result<()> {
        // Confirm the applicant exists before we start deleting blobs.
        self.load_applicant(applicant_id).await?;

        let prefix = format!("{}/", applicant_id);
        match self
            .s3
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&prefix)
            .send()
            .await
        {
            Ok(listing) => {
                for object in listing.contents() {
                    let Some(key) = object.key() else { continue };
                    if let Err(e) = self
                        .s3
                        .delete_object()
                        .bucket(&self.bucket)
                        .key(key)
                        .send()
                        .await
                    {
                        tracing::warn!(key, error = %e, "blob deletion failed");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(prefix, error = %e, "blob listing failed, skipping remote deletion");
            }
        }

        self.applicants()
            .save_document_details(applicant_id, &DocumentDetails::default(), false)
            .await
            .map_err(PortalError::from)
    }
}
