use serde::Serialize;

use crate::models::candidate::CandidateDetails;
use crate::models::document::DocumentDetails;
use crate::models::payment::PaymentDetails;
use crate::models::qualification::QualificationDetails;

// ---------------------------------------------------------------------------
// Step-progression engine.
//
// A pure function of the four sub-profiles. Completeness is derived from
// what the applicant actually filled in, never from the stored completion
// flags: a flag says a save happened, the data says whether the step is
// done. The wizard unlocks every completed step plus the current one.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    CandidateDetails,
    QualificationDetails,
    DocumentDetails,
    Payment,
}

impl Step {
    pub fn route(self) -> &'static str {
        match self {
            Step::CandidateDetails => "/dashboard/candidate-details",
            Step::QualificationDetails => "/dashboard/qualification-details",
            Step::DocumentDetails => "/dashboard/document-details",
            Step::Payment => "/dashboard/payment-details",
        }
    }
}

/// Route shown once every step, payment included, is behind the applicant.
pub const TRACKING_ROUTE: &str = "/dashboard/tracking";

/// Route the administrator lands on; the wizard never applies.
pub const ADMIN_ROUTE: &str = "/admin/dashboard";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub completed: Vec<Step>,
    /// `None` only for the administrator, who has no wizard position.
    pub current_step: Option<Step>,
    pub current_route: &'static str,
}

impl ProgressReport {
    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }
}

/// Walks the wizard in order and stops at the first step whose data is
/// missing. Emptiness rules:
///
/// - candidate: no personal-details field populated;
/// - qualification: none of its four sections populated;
/// - documents: any of the three mandatory slots (photo, signature,
///   class-10 marksheet) unset — the optional slots do not gate progress;
/// - payment: no UTR submitted.
pub fn derive_progress(
    candidate: &CandidateDetails,
    qualification: &QualificationDetails,
    documents: &DocumentDetails,
    payment: &PaymentDetails,
) -> ProgressReport {
    let mut completed = Vec::new();

    if candidate.personal_details.is_empty() {
        return ProgressReport {
            completed,
            current_step: Some(Step::CandidateDetails),
            current_route: Step::CandidateDetails.route(),
        };
    }
    completed.push(Step::CandidateDetails);

    if qualification.is_empty() {
        return ProgressReport {
            completed,
            current_step: Some(Step::QualificationDetails),
            current_route: Step::QualificationDetails.route(),
        };
    }
    completed.push(Step::QualificationDetails);

    if !documents.mandatory_present() {
        return ProgressReport {
            completed,
            current_step: Some(Step::DocumentDetails),
            current_route: Step::DocumentDetails.route(),
        };
    }
    completed.push(Step::DocumentDetails);

    if payment.utr_number.is_none() {
        return ProgressReport {
            completed,
            current_step: Some(Step::Payment),
            current_route: Step::Payment.route(),
        };
    }
    completed.push(Step::Payment);

    // Everything done: the applicant stays on the payment step but the
    // dashboard routes to tracking.
    ProgressReport {
        completed,
        current_step: Some(Step::Payment),
        current_route: TRACKING_ROUTE,
    }
}

/// The administrator short-circuits the engine: nothing unlocked, no
/// wizard step, straight to the console.
pub fn admin_progress() -> ProgressReport {
    ProgressReport {
        completed: Vec::new(),
        current_step: None,
        current_route: ADMIN_ROUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentKind;
    use chrono::Utc;

    fn filled_candidate() -> CandidateDetails {
        let mut details = CandidateDetails::default();
        details.personal_details.father_name = Some("M. Kumar".to_string());
        details
    }

    fn filled_qualification() -> QualificationDetails {
        let mut details = QualificationDetails::default();
        details.matriculation.board_name = Some("CBSE".to_string());
        details
    }

    fn filled_documents() -> DocumentDetails {
        let mut details = DocumentDetails::default();
        for kind in DocumentKind::MANDATORY {
            details.set_url(kind, format!("https://blob/{}", kind.key()));
        }
        details
    }

    fn submitted_payment() -> PaymentDetails {
        PaymentDetails::submitted("UTR987654".to_string(), Utc::now())
    }

    #[test]
    fn new_applicant_starts_at_candidate() {
        let report = derive_progress(
            &CandidateDetails::default(),
            &QualificationDetails::default(),
            &DocumentDetails::default(),
            &PaymentDetails::default(),
        );
        assert!(report.completed.is_empty());
        assert_eq!(report.current_step, Some(Step::CandidateDetails));
        assert_eq!(report.current_route, "/dashboard/candidate-details");
    }

    #[test]
    fn candidate_done_unlocks_qualification() {
        let report = derive_progress(
            &filled_candidate(),
            &QualificationDetails::default(),
            &DocumentDetails::default(),
            &PaymentDetails::default(),
        );
        assert_eq!(report.completed, vec![Step::CandidateDetails]);
        assert_eq!(report.current_step, Some(Step::QualificationDetails));
    }

    #[test]
    fn signature_alone_does_not_complete_documents() {
        // The stored documentsUploaded flag would be true after this save;
        // the engine still holds the applicant on the documents step.
        let mut documents = DocumentDetails::default();
        documents.set_url(DocumentKind::Signature, "https://blob/sig".to_string());

        let report = derive_progress(
            &filled_candidate(),
            &filled_qualification(),
            &documents,
            &PaymentDetails::default(),
        );
        assert_eq!(
            report.completed,
            vec![Step::CandidateDetails, Step::QualificationDetails]
        );
        assert_eq!(report.current_step, Some(Step::DocumentDetails));
    }

    #[test]
    fn all_populated_lands_on_payment_with_tracking_route() {
        let report = derive_progress(
            &filled_candidate(),
            &filled_qualification(),
            &filled_documents(),
            &submitted_payment(),
        );
        assert_eq!(
            report.completed,
            vec![
                Step::CandidateDetails,
                Step::QualificationDetails,
                Step::DocumentDetails,
                Step::Payment,
            ]
        );
        assert_eq!(report.current_step, Some(Step::Payment));
        assert_eq!(report.current_route, TRACKING_ROUTE);
    }

    #[test]
    fn documents_done_payment_missing() {
        let report = derive_progress(
            &filled_candidate(),
            &filled_qualification(),
            &filled_documents(),
            &PaymentDetails::default(),
        );
        assert_eq!(report.current_step, Some(Step::Payment));
        assert_eq!(report.current_route, "/dashboard/payment-details");
        assert!(report.is_completed(Step::DocumentDetails));
        assert!(!report.is_completed(Step::Payment));
    }

    #[test]
    fn admin_gets_neutral_report() {
        let report = admin_progress();
        assert!(report.completed.is_empty());
        assert_eq!(report.current_step, None);
        assert_eq!(report.current_route, ADMIN_ROUTE);
    }
}
