pub mod applicant;
pub mod candidate;
pub mod document;
pub mod payment;
pub mod qualification;

// Re-export the types almost every caller needs.
pub use applicant::{Applicant, NewApplicant, PaidApplicant};
pub use candidate::CandidateDetails;
pub use document::{DocumentDetails, DocumentKind, DocumentUpload};
pub use payment::{PaymentDetails, PaymentStatus};
pub use qualification::QualificationDetails;
