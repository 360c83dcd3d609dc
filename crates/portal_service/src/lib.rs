pub mod admin;
pub mod auth;
pub mod documents;
pub mod notify;
pub mod otp;
pub mod profile;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use portal_core::error::{PortalError, Result};
use portal_core::models::Applicant;
use portal_db::ApplicantRepository;

/// The administrator credential record, loaded from configuration at
/// startup. There is exactly one; it has no applicants row and is checked
/// through the same bcrypt path as any stored identity.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub login_id: String,
    pub password_hash: String,
    pub full_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub jwt_secret: String,
    /// Public base URL of the front end, used inside emailed links.
    pub client_url: String,
    /// Display name used in email subjects and bodies.
    pub portal_name: String,
    /// Uppercase prefix of public applicant ids.
    pub applicant_id_prefix: String,
    /// Base URL documents are served from (endpoint, path-style).
    pub s3_public_url: String,
    pub admin: AdminAccount,
}

#[derive(Clone)]
pub struct PortalService {
    pub pool: PgPool,
    pub s3: S3Client,
    pub bucket: String,
    pub settings: ServiceSettings,
}

impl PortalService {
    pub fn new(pool: PgPool, s3: S3Client, bucket: String, settings: ServiceSettings) -> Self {
        Self {
            pool,
            s3,
            bucket,
            settings,
        }
    }

    pub(crate) fn applicants(&self) -> ApplicantRepository {
        ApplicantRepository::new(self.pool.clone())
    }

    pub fn is_admin(&self, identifier: &str) -> bool {
        identifier == self.settings.admin.login_id
    }

    /// The admin identity has no applicant record and no sub-profiles.
    pub(crate) fn ensure_not_admin(&self, identifier: &str) -> Result<()> {
        if self.is_admin(identifier) {
            return Err(PortalError::AdminNotAllowed);
        }
        Ok(())
    }

    pub(crate) async fn load_applicant(&self, applicant_id: &str) -> Result<Applicant> {
        self.applicants()
            .find_by_applicant_id(applicant_id)
            .await
            .map_err(PortalError::from)?
            .ok_or_else(|| PortalError::NotFound("Applicant".to_string()))
    }
}
