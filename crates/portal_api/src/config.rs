use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use portal_service::{AdminAccount, ServiceSettings};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from: String,
    pub jwt_secret: String,
    pub admin_login_id: String,
    pub admin_password_hash: String,
    pub admin_full_name: String,
    pub admin_email: String,
    pub client_url: String,
    pub portal_name: String,
    pub applicant_id_prefix: String,
    pub max_body_mb: usize,
    pub outbox_poll_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,

            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),

            s3_endpoint: env::var("S3_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),

            s3_bucket: env::var("S3_BUCKET")
                .unwrap_or_else(|_| "portal-documents".to_string()),

            s3_region: env::var("AWS_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),

            smtp_host: env::var("SMTP_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),

            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),

            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),

            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@localhost".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,

            admin_login_id: env::var("ADMIN_LOGIN_ID")
                .unwrap_or_else(|_| "portal-admin".to_string()),

            // A bcrypt hash, never the cleartext. `portal_cli hash-password`
            // produces one.
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")
                .context("ADMIN_PASSWORD_HASH must be set")?,

            admin_full_name: env::var("ADMIN_FULL_NAME")
                .unwrap_or_else(|_| "System Administrator".to_string()),

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@localhost".to_string()),

            client_url: env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            portal_name: env::var("PORTAL_NAME")
                .unwrap_or_else(|_| "National Recruitment Portal".to_string()),

            applicant_id_prefix: env::var("APPLICANT_ID_PREFIX")
                .unwrap_or_else(|_| "NRP".to_string()),

            // Inline base64 uploads need headroom well past the axum default.
            max_body_mb: env::var("MAX_BODY_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),

            outbox_poll_secs: env::var("OUTBOX_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        })
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            jwt_secret: self.jwt_secret.clone(),
            client_url: self.client_url.clone(),
            portal_name: self.portal_name.clone(),
            applicant_id_prefix: self.applicant_id_prefix.clone(),
            s3_public_url: self.s3_endpoint.clone(),
            admin: AdminAccount {
                login_id: self.admin_login_id.clone(),
                password_hash: self.admin_password_hash.clone(),
                full_name: self.admin_full_name.clone(),
                email_address: self.admin_email.clone(),
            },
        }
    }
}
