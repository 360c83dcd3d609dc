use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::CandidateDetails;
use crate::models::document::DocumentDetails;
use crate::models::payment::PaymentDetails;
use crate::models::qualification::QualificationDetails;

/// One registrant's full record: identity, credentials and the four
/// sub-profiles with their stored completion flags.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub id: Uuid,
    pub applicant_id: String,
    pub post_code: String,
    pub full_name: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub email_address: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub candidate_details: CandidateDetails,
    pub candidate_completed: bool,
    pub qualification_details: QualificationDetails,
    pub qualification_completed: bool,
    pub document_details: DocumentDetails,
    pub documents_uploaded: bool,
    pub payment_details: PaymentDetails,
    pub payment_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields a registration request carries, before any server-side
/// processing. Validated by the registration rule engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    pub post_code: String,
    pub full_name: String,
    pub mobile_number: String,
    #[serde(default)]
    pub alternate_mobile_number: Option<String>,
    pub email_address: String,
    pub password: String,
}

/// What the repository needs to create the row. The id has already been
/// allocated and the password already hashed.
#[derive(Debug, Clone)]
pub struct NewApplicant {
    pub applicant_id: String,
    pub post_code: String,
    pub full_name: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub email_address: String,
    pub password_hash: String,
}

/// Projection served to the admin dashboard: identity plus payment fields
/// for every applicant who has submitted a payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidApplicant {
    pub applicant_id: String,
    pub full_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub payment_details: PaymentDetails,
    pub created_at: DateTime<Utc>,
}
