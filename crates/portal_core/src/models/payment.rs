use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

// ---------------------------------------------------------------------------
// Payment status state machine.
//
// The full transition table:
//
//   pending    -> processing   (applicant submits a UTR)
//   processing -> verified     (admin decision)
//   processing -> cancelled    (admin decision)
//   cancelled  -> processing   (applicant resubmits a corrected UTR)
//
// `verified` is terminal. Anything outside the table is rejected.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Verified,
    Cancelled,
}

impl PaymentStatus {
    pub fn can_transition(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Verified)
                | (Processing, Cancelled)
                | (Cancelled, Processing)
        )
    }

    pub fn transition(self, next: PaymentStatus) -> Result<PaymentStatus, PortalError> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(PortalError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for PaymentStatus {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "processing" => Ok(PaymentStatus::Processing),
            "verified" => Ok(PaymentStatus::Verified),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(PortalError::invalid_field(
                "status",
                &format!("Unknown payment status '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub utr_number: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub admin_verified_at: Option<DateTime<Utc>>,
    pub admin_remarks: Option<String>,
}

impl PaymentDetails {
    /// The sub-profile an accepted UTR submission replaces the stored one
    /// with. A resubmission after cancellation clears the earlier decision.
    pub fn submitted(utr_number: String, now: DateTime<Utc>) -> Self {
        PaymentDetails {
            utr_number: Some(utr_number),
            payment_status: PaymentStatus::Processing,
            payment_date: Some(now),
            admin_verified_at: None,
            admin_remarks: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_edges() {
        use PaymentStatus::*;
        assert!(Pending.can_transition(Processing));
        assert!(Processing.can_transition(Verified));
        assert!(Processing.can_transition(Cancelled));
        assert!(Cancelled.can_transition(Processing));
    }

    #[test]
    fn forbidden_edges_rejected() {
        use PaymentStatus::*;
        // A payment under review cannot be silently resubmitted.
        assert!(!Processing.can_transition(Processing));
        // Verified is terminal.
        assert!(!Verified.can_transition(Processing));
        assert!(!Verified.can_transition(Cancelled));
        // The admin cannot decide a payment nobody submitted.
        assert!(!Pending.can_transition(Verified));
        assert!(!Pending.can_transition(Cancelled));

        match Verified.transition(Cancelled) {
            Err(PortalError::InvalidTransition { from, to }) => {
                assert_eq!(from, Verified);
                assert_eq!(to, Cancelled);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn status_parses_lowercase_only() {
        assert_eq!(
            "processing".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Processing
        );
        assert!("Verified".parse::<PaymentStatus>().is_err());
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn submitted_resets_admin_decision() {
        let now = Utc::now();
        let details = PaymentDetails::submitted("UTR123456".to_string(), now);
        assert_eq!(details.payment_status, PaymentStatus::Processing);
        assert_eq!(details.payment_date, Some(now));
        assert!(details.admin_verified_at.is_none());
        assert!(details.admin_remarks.is_none());
    }
}
