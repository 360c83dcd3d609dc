use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use portal_core::error::{PortalError, Result};

use crate::notify;
use crate::PortalService;

pub const OTP_VALIDITY_MINUTES: i64 = 10;

impl PortalService {
    /// Pre-registration OTP. Nothing exists to store a code on yet, so this
    /// only guards against duplicate identities and emails a code; the
    /// matching verify step is a format check. A deliberate stub carried
    /// over from the original flow.
    pub async fn request_registration_otp(
        &self,
        mobile_number: &str,
        email_address: &str,
    ) -> Result<()> {
        let email_address = email_address.trim().to_lowercase();
        if self
            .applicants()
            .identity_taken(mobile_number.trim(), &email_address)
            .await
            .map_err(PortalError::from)?
        {
            return Err(PortalError::DuplicateIdentity);
        }

        let code = generate_otp();
        let email = notify::registration_otp_email(&self.settings, &code, &email_address);
        portal_db::OutboxRepository::new(self.pool.clone())
            .enqueue_one(&email)
            .await
            .map_err(PortalError::from)
    }

    /// Accepts any six-character code. See `request_registration_otp`.
    pub fn verify_registration_otp(&self, code: &str) -> Result<()> {
        if code.chars().count() != 6 {
            return Err(PortalError::invalid_field("otp", "Invalid OTP format"));
        }
        Ok(())
    }

    /// Post-registration OTP: stores the code with a ten-minute expiry and
    /// queues the email, both in one transaction.
    pub async fn request_otp(&self, mobile_number: &str) -> Result<()> {
        let applicant = self
            .applicants()
            .find_by_mobile(mobile_number)
            .await
            .map_err(PortalError::from)?
            .ok_or_else(|| PortalError::NotFound("Applicant".to_string()))?;

        let code = generate_otp();
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);

        let email = notify::account_otp_email(
            &self.settings,
            &applicant.full_name,
            &code,
            &applicant.email_address,
        );

        self.applicants()
            .store_otp(mobile_number, &code, expires_at, &email)
            .await
            .map_err(PortalError::from)
    }

    /// Exact-match, single-use, expiring verification. Success clears the
    /// stored code and marks the account verified.
    pub async fn verify_otp(&self, mobile_number: &str, code: &str) -> Result<()> {
        let applicant = self
            .applicants()
            .find_by_mobile(mobile_number)
            .await
            .map_err(PortalError::from)?
            .ok_or_else(|| PortalError::NotFound("Applicant".to_string()))?;

        if !otp_matches(
            applicant.otp_code.as_deref(),
            applicant.otp_expires_at,
            code,
            Utc::now(),
        ) {
            return Err(PortalError::InvalidOrExpiredOtp);
        }

        self.applicants()
            .consume_otp(mobile_number)
            .await
            .map_err(PortalError::from)
    }
}

/// Six digits, never with a leading zero, matching what the notification
/// templates promise.
pub(crate) fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// The whole accept/reject decision, kept pure so it can be tested without
/// a database.
pub fn otp_matches(
    stored_code: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    supplied: &str,
    now: DateTime<Utc>,
) -> bool {
    match (stored_code, expires_at) {
        (Some(code), Some(expiry)) => code == supplied && now < expiry,
        // No stored code (never requested, or already consumed): reject.
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn correct_code_before_expiry_matches() {
        let now = Utc::now();
        let expiry = now + Duration::minutes(5);
        assert!(otp_matches(Some("123456"), Some(expiry), "123456", now));
    }

    #[test]
    fn wrong_code_rejected() {
        let now = Utc::now();
        let expiry = now + Duration::minutes(5);
        assert!(!otp_matches(Some("123456"), Some(expiry), "654321", now));
    }

    #[test]
    fn expired_code_rejected_even_if_correct() {
        let now = Utc::now();
        let expiry = now - Duration::seconds(1);
        assert!(!otp_matches(Some("123456"), Some(expiry), "123456", now));
    }

    #[test]
    fn consumed_code_rejected() {
        // After a successful verify the stored state is cleared; a second
        // attempt with the same code must fail.
        let now = Utc::now();
        assert!(!otp_matches(None, None, "123456", now));
        assert!(!otp_matches(Some("123456"), None, "123456", now));
    }
}
