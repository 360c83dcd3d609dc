use chrono::Utc;

use portal_core::error::{PortalError, Result};
use portal_core::models::{
    Applicant, CandidateDetails, PaymentDetails, PaymentStatus, QualificationDetails,
};
use portal_core::progress::{admin_progress, derive_progress, ProgressReport};

use crate::PortalService;

impl PortalService {
    // -----------------------------------------------------------------
    // Candidate details
    // -----------------------------------------------------------------

    pub async fn get_candidate_details(&self, applicant_id: &str) -> Result<Applicant> {
        self.load_applicant(applicant_id).await
    }

    /// Replaces the whole candidate sub-profile and marks the section
    /// complete. Whatever the wizard omitted arrives defaulted by serde.
    pub async fn save_candidate_details(
        &self,
        applicant_id: &str,
        details: CandidateDetails,
    ) -> Result<CandidateDetails> {
        self.applicants()
            .save_candidate_details(applicant_id, &details)
            .await
            .map_err(PortalError::from)?;
        Ok(details)
    }

    // -----------------------------------------------------------------
    // Qualification details
    // -----------------------------------------------------------------

    pub async fn get_qualification_details(
        &self,
        applicant_id: &str,
    ) -> Result<QualificationDetails> {
        Ok(self.load_applicant(applicant_id).await?.qualification_details)
    }

    pub async fn save_qualification_details(
        &self,
        applicant_id: &str,
        details: QualificationDetails,
    ) -> Result<QualificationDetails> {
        self.applicants()
            .save_qualification_details(applicant_id, &details)
            .await
            .map_err(PortalError::from)?;
        Ok(details)
    }

    // -----------------------------------------------------------------
    // Payment details (applicant side)
    // -----------------------------------------------------------------

    pub async fn get_payment_details(
        &self,
        applicant_id: &str,
    ) -> Result<(PaymentDetails, bool)> {
        self.ensure_not_admin(applicant_id)?;
        let applicant = self.load_applicant(applicant_id).await?;
        Ok((applicant.payment_details, applicant.payment_completed))
    }

    /// UTR submission. The status moves through the state machine —
    /// pending or cancelled may become processing, a payment already under
    /// review or verified cannot be overwritten.
    pub async fn submit_payment(
        &self,
        applicant_id: &str,
        utr_number: &str,
    ) -> Result<PaymentDetails> {
        self.ensure_not_admin(applicant_id)?;

        let utr_number = utr_number.trim();
        if utr_number.is_empty() {
            return Err(PortalError::invalid_field(
                "utrNumber",
                "UTR number is required",
            ));
        }

        let applicant = self.load_applicant(applicant_id).await?;
        applicant
            .payment_details
            .payment_status
            .transition(PaymentStatus::Processing)?;

        let details = PaymentDetails::submitted(utr_number.to_string(), Utc::now());
        self.applicants()
            .save_payment_details(applicant_id, &details, true)
            .await
            .map_err(PortalError::from)?;
        Ok(details)
    }

    // -----------------------------------------------------------------
    // Step progression
    // -----------------------------------------------------------------

    /// Derives the wizard position from what is actually stored. The
    /// administrator short-circuits to a neutral report.
    pub async fn get_progress(
        &self,
        identifier: &str,
    ) -> Result<(ProgressReport, PaymentStatus)> {
        if self.is_admin(identifier) {
            return Ok((admin_progress(), PaymentStatus::Pending));
        }

        let applicant = self.load_applicant(identifier).await?;
        let report = derive_progress(
            &applicant.candidate_details,
            &applicant.qualification_details,
            &applicant.document_details,
            &applicant.payment_details,
        );
        Ok((report, applicant.payment_details.payment_status))
    }
}
