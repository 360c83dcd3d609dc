use chrono::Utc;

use portal_core::error::{PortalError, Result};
use portal_core::models::{PaidApplicant, PaymentDetails, PaymentStatus};

use crate::notify;
use crate::PortalService;

impl PortalService {
    /// Every applicant with a submitted payment, newest first, projected to
    /// what the review dashboard needs.
    pub async fn list_paid_applicants(&self) -> Result<Vec<PaidApplicant>> {
        self.applicants()
            .list_paid()
            .await
            .map_err(PortalError::from)
    }

    /// The admin decision. The requested status must be reachable from the
    /// current one through the transition table; a verified payment is
    /// final. The decision and its notification commit together.
    pub async fn set_payment_status(
        &self,
        applicant_id: &str,
        status: PaymentStatus,
        remarks: Option<String>,
    ) -> Result<PaymentDetails> {
        let applicant = self.load_applicant(applicant_id).await?;

        let next = applicant
            .payment_details
            .payment_status
            .transition(status)?;

        let details = PaymentDetails {
            payment_status: next,
            admin_remarks: remarks,
            admin_verified_at: Some(Utc::now()),
            ..applicant.payment_details
        };

        let email = match next {
            PaymentStatus::Verified => Some(notify::payment_verified_email(
                &self.settings,
                &applicant.full_name,
                details.utr_number.as_deref().unwrap_or("-"),
                &applicant.email_address,
            )),
            PaymentStatus::Cancelled => Some(notify::payment_cancelled_email(
                &self.settings,
                &applicant.full_name,
                details.utr_number.as_deref().unwrap_or("-"),
                details.admin_remarks.as_deref(),
                &applicant.email_address,
            )),
            // cancelled -> processing reset: no notification.
            _ => None,
        };

        self.applicants()
            .update_payment_status(applicant_id, &details, email.as_ref())
            .await
            .map_err(PortalError::from)?;

        Ok(details)
    }
}
