use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use portal_service::{AdminAccount, ServiceSettings};

/// Environment the CLI shares with the API server. Only the pieces a
/// command actually touches need to be present; `DATABASE_URL` always is.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub jwt_secret: String,
    pub admin_login_id: String,
    pub admin_password_hash: String,
    pub admin_full_name: String,
    pub admin_email: String,
    pub client_url: String,
    pub portal_name: String,
    pub applicant_id_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,

            s3_endpoint: env::var("S3_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),

            s3_bucket: env::var("S3_BUCKET")
                .unwrap_or_else(|_| "portal-documents".to_string()),

            s3_region: env::var("AWS_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "cli-local".to_string()),

            admin_login_id: env::var("ADMIN_LOGIN_ID")
                .unwrap_or_else(|_| "portal-admin".to_string()),

            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").unwrap_or_default(),

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
