use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use portal_db::{NewOutboxEmail, OutboxRepository};

use crate::ServiceSettings;

// ---------------------------------------------------------------------------
// Templates. Bodies are rendered at enqueue time, inside the transaction of
// the state change they announce; the worker below only moves bytes.
// ---------------------------------------------------------------------------

pub fn registration_email(
    settings: &ServiceSettings,
    applicant_id: &str,
    full_name: &str,
    password: &str,
    recipient: &str,
) -> NewOutboxEmail {
    let body_html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{portal} - Registration Successful</h2>
  <p>Dear {name},</p>
  <p>Your registration has been completed successfully.</p>
  <div style="background: #f5f5f5; padding: 20px; margin: 20px 0;">
    <h3 style="margin-top: 0;">Your Login Credentials</h3>
    <p><strong>User ID:</strong> {id}</p>
    <p><strong>Password:</strong> {password}</p>
  </div>
  <p>Please keep these credentials safe and change your password after first login.</p>
  <p>Login: <a href="{url}/login">{url}/login</a></p>
  <p>Best regards,<br>{portal}</p>
</div>"#,
        portal = settings.portal_name,
        name = full_name,
        id = applicant_id,
        password = password,
        url = settings.client_url,
    );

    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!("Registration Successful - {}", settings.portal_name),
        body_html,
    }
}

pub fn registration_otp_email(
    settings: &ServiceSettings,
    code: &str,
    recipient: &str,
) -> NewOutboxEmail {
    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!("Registration OTP - {}", settings.portal_name),
        body_html: otp_body(settings, "Dear User", code),
    }
}

pub fn account_otp_email(
    settings: &ServiceSettings,
    full_name: &str,
    code: &str,
    recipient: &str,
) -> NewOutboxEmail {
    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!("OTP Verification - {}", settings.portal_name),
        body_html: otp_body(settings, &format!("Dear {}", full_name), code),
    }
}

fn otp_body(settings: &ServiceSettings, salutation: &str, code: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{portal} - OTP Verification</h2>
  <p>{salutation},</p>
  <p>Your OTP for verification is:</p>
  <div style="background: #f5f5f5; padding: 20px; text-align: center; margin: 20px 0;">
    <h1 style="font-size: 32px; margin: 0;">{code}</h1>
  </div>
  <p>This OTP is valid for 10 minutes only. Please do not share it with anyone.</p>
  <p>Best regards,<br>{portal}</p>
</div>"#,
        portal = settings.portal_name,
        salutation = salutation,
        code = code,
    )
}

pub fn temp_password_email(
    settings: &ServiceSettings,
    applicant_id: &str,
    full_name: &str,
    temp_password: &str,
    recipient: &str,
) -> NewOutboxEmail {
    let body_html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{portal} - Password Reset</h2>
  <p>Dear {name},</p>
  <p>Your new temporary password is:</p>
  <div style="background: #f5f5f5; padding: 20px; text-align: center; margin: 20px 0;">
    <h2 style="margin: 0;">{password}</h2>
  </div>
  <p>User ID: <strong>{id}</strong></p>
  <p>Please login with this password and change it immediately.</p>
  <p>Best regards,<br>{portal}</p>
</div>"#,
        portal = settings.portal_name,
        name = full_name,
        password = temp_password,
        id = applicant_id,
    );

    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!("Password Reset - {}", settings.portal_name),
        body_html,
    }
}

pub fn payment_verified_email(
    settings: &ServiceSettings,
    full_name: &str,
    utr_number: &str,
    recipient: &str,
) -> NewOutboxEmail {
    let body_html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{portal} - Payment Verified</h2>
  <p>Dear {name},</p>
  <p><strong>Congratulations!</strong> Your registration payment has been verified and your registration is now complete.</p>
  <div style="background: #e8f5e8; padding: 20px; margin: 20px 0;">
    <p><strong>UTR Number:</strong> {utr}</p>
    <p><strong>Status:</strong> VERIFIED</p>
  </div>
  <p>Login to your dashboard to download the registration summary: <a href="{url}/login">{url}/login</a></p>
  <p>Best regards,<br>{portal}</p>
</div>"#,
        portal = settings.portal_name,
        name = full_name,
        utr = utr_number,
        url = settings.client_url,
    );

    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!(
            "Payment Verified - Registration Complete - {}",
            settings.portal_name
        ),
        body_html,
    }
}

pub fn payment_cancelled_email(
    settings: &ServiceSettings,
    full_name: &str,
    utr_number: &str,
    remarks: Option<&str>,
    recipient: &str,
) -> NewOutboxEmail {
    let body_html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{portal} - Payment Verification Failed</h2>
  <p>Dear {name},</p>
  <p>We regret to inform you that your payment verification was unsuccessful.</p>
  <div style="background: #ffebee; padding: 20px; margin: 20px 0;">
    <p><strong>UTR Number:</strong> {utr}</p>
    <p><strong>Status:</strong> VERIFICATION FAILED</p>
    <p><strong>Reason:</strong> {reason}</p>
  </div>
  <p>Please check your UTR number and retry the payment from your dashboard: <a href="{url}/login">{url}/login</a></p>
  <p>Best regards,<br>{portal}</p>
</div>"#,
        portal = settings.portal_name,
        name = full_name,
        utr = utr_number,
        reason = remarks.unwrap_or("Payment could not be verified"),
        url = settings.client_url,
    );

    NewOutboxEmail {
        recipient: recipient.to_string(),
        subject: format!(
            "Payment Verification Failed - Action Required - {}",
            settings.portal_name
        ),
        body_html,
    }
}

// ---------------------------------------------------------------------------
// Delivery.
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body_html: &str) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        username: &str,
        password: &str,
        from: &str,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        Ok(Self {
            transport,
            from: from.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, body_html: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())?;
        self.transport.send(message).await?;
        Ok(())
    }
}

pub const MAX_DELIVERY_ATTEMPTS: i32 = 5;

/// Exponential backoff: 30s, 60s, 120s, ... per failed attempt.
pub fn retry_backoff_secs(attempts: i32) -> f64 {
    30.0 * f64::powi(2.0, (attempts - 1).max(0))
}

/// Spawns the background task that drains the outbox. Each tick claims a
/// small batch of due messages and walks it sequentially; a send failure
/// reschedules the row until its attempt budget runs out.
pub fn spawn_outbox_worker(
    pool: PgPool,
    mailer: Arc<dyn Mailer>,
    poll_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outbox = OutboxRepository::new(pool);
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;

            let batch = match outbox.claim_due(10).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(error = %e, "outbox poll failed");
                    continue;
                }
            };

            for email in batch {
                match mailer
                    .send(&email.recipient, &email.subject, &email.body_html)
                    .await
                {
                    Ok(()) => {
                        info!(id = email.id, recipient = %email.recipient, "email delivered");
                        if let Err(e) = outbox.mark_sent(email.id).await {
                            warn!(id = email.id, error = %e, "failed to mark email sent");
                        }
                    }
                    Err(e) => {
                        let exhausted = email.attempts >= MAX_DELIVERY_ATTEMPTS;
                        warn!(
                            id = email.id,
                            attempts = email.attempts,
                            exhausted,
                            error = %e,
                            "email delivery failed"
                        );
                        if let Err(mark_err) = outbox
                            .mark_failed(
                                email.id,
                                &e.to_string(),
                                retry_backoff_secs(email.attempts),
                                exhausted,
                            )
                            .await
                        {
                            warn!(id = email.id, error = %mark_err, "failed to reschedule email");
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdminAccount;

    fn settings() -> ServiceSettings {
        ServiceSettings {
            jwt_secret: "test-secret".to_string(),
            client_url: "https://careers.example.gov.in".to_string(),
            portal_name: "Example Recruitment Portal".to_string(),
            applicant_id_prefix: "NRP".to_string(),
            s3_public_url: "http://localhost:9000".to_string(),
            admin: AdminAccount {
                login_id: "portal-admin".to_string(),
                password_hash: "x".to_string(),
                full_name: "System Administrator".to_string(),
                email_address: "admin@example.gov.in".to_string(),
            },
        }
    }

    #[test]
    fn registration_email_carries_credentials_and_login_link() {
        let email =
            registration_email(&settings(), "NRP100001", "Asha Verma", "secret123", "a@x.com");
        assert_eq!(email.recipient, "a@x.com");
        assert!(email.subject.contains("Registration Successful"));
        assert!(email.body_html.contains("NRP100001"));
        assert!(email.body_html.contains("secret123"));
        assert!(email.body_html.contains("https://careers.example.gov.in/login"));
    }

    #[test]
    fn otp_email_carries_code() {
        let email = account_otp_email(&settings(), "Asha Verma", "493817", "a@x.com");
        assert!(email.body_html.contains("493817"));
        assert!(email.body_html.contains("10 minutes"));
    }

    #[test]
    fn cancelled_email_carries_remarks_verbatim() {
        let email = payment_cancelled_email(
            &settings(),
            "Asha Verma",
            "UTR9911",
            Some("UTR not traceable at bank"),
            "a@x.com",
        );
        assert!(email.body_html.contains("UTR not traceable at bank"));
        assert!(email.body_html.contains("UTR9911"));

        let fallback =
            payment_cancelled_email(&settings(), "Asha Verma", "UTR9911", None, "a@x.com");
        assert!(fallback.body_html.contains("Payment could not be verified"));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(retry_backoff_secs(1), 30.0);
        assert_eq!(retry_backoff_secs(2), 60.0);
        assert_eq!(retry_backoff_secs(3), 120.0);
        // Attempt counter never goes below one in practice, but the
        // schedule must stay sane if it does.
        assert_eq!(retry_backoff_secs(0), 30.0);
    }
}
