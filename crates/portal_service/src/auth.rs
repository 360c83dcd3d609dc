use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use portal_core::error::{PortalError, Result};
use portal_core::models::applicant::{NewApplicant, RegistrationFields};
use portal_core::models::Applicant;
use portal_core::registration_validator;

use crate::notify;
use crate::PortalService;

// Matches the original deployment's bcrypt work factor.
const BCRYPT_COST: u32 = 12;

const TOKEN_VALIDITY_DAYS: i64 = 30;

const TEMP_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Applicant,
    Admin,
}

/// Bearer-token claims: who, what they may touch, until when.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug)]
pub struct RegistrationOutcome {
    pub applicant: Applicant,
    pub token: String,
}

/// What a successful login hands back to the client.
#[derive(Debug)]
pub struct LoginSession {
    pub applicant_id: String,
    pub full_name: String,
    pub email_address: String,
    pub mobile_number: Option<String>,
    pub post_code: Option<String>,
    pub role: Role,
    pub token: String,
}

impl PortalService {
    /// Creates the applicant and queues the credentials email in one
    /// transaction, then issues a bearer token.
    pub async fn register(&self, fields: RegistrationFields) -> Result<RegistrationOutcome> {
        let errors = registration_validator().run(&fields);
        if !errors.is_empty() {
            return Err(PortalError::Validation(errors));
        }

        let email_address = fields.email_address.trim().to_lowercase();
        let mobile_number = fields.mobile_number.trim().to_string();

        let repo = self.applicants();
        if repo
            .identity_taken(&mobile_number, &email_address)
            .await
            .map_err(PortalError::from)?
        {
            return Err(PortalError::DuplicateIdentity);
        }

        let applicant_id = repo
            .allocate_applicant_id(&self.settings.applicant_id_prefix)
            .await
            .map_err(PortalError::from)?;

        let password_hash = hash_password(&fields.password)?;

        let welcome = notify::registration_email(
            &self.settings,
            &applicant_id,
            &fields.full_name,
            &fields.password,
            &email_address,
        );

        let new = NewApplicant {
            applicant_id,
            post_code: fields.post_code.trim().to_string(),
            full_name: fields.full_name.trim().to_string(),
            mobile_number,
            alternate_mobile_number: fields
                .alternate_mobile_number
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            email_address,
            password_hash,
        };

        let applicant = repo.create(&new, &welcome).await.map_err(PortalError::from)?;
        let token = self.issue_token(&applicant.applicant_id, Role::Applicant)?;

        Ok(RegistrationOutcome { applicant, token })
    }

    /// Admin-or-applicant login. Every mismatch — unknown identifier, wrong
    /// password, unparseable hash — collapses into the same
    /// `InvalidCredentials`, so the response never reveals which half was
    /// wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginSession> {
        let admin = &self.settings.admin;
        if identifier == admin.login_id {
            if !verify_password(password, &admin.password_hash) {
                return Err(PortalError::InvalidCredentials);
            }
            let token = self.issue_token(&admin.login_id, Role::Admin)?;
            return Ok(LoginSession {
                applicant_id: admin.login_id.clone(),
                full_name: admin.full_name.clone(),
                email_address: admin.email_address.clone(),
                mobile_number: None,
                post_code: None,
                role: Role::Admin,
                token,
            });
        }

        let applicant = self
            .applicants()
            .find_by_applicant_id(identifier)
            .await
            .map_err(PortalError::from)?
            .ok_or(PortalError::InvalidCredentials)?;

        if !verify_password(password, &applicant.password_hash) {
            return Err(PortalError::InvalidCredentials);
        }

        let token = self.issue_token(&applicant.applicant_id, Role::Applicant)?;
        Ok(LoginSession {
            applicant_id: applicant.applicant_id,
            full_name: applicant.full_name,
            email_address: applicant.email_address,
            mobile_number: Some(applicant.mobile_number),
            post_code: Some(applicant.post_code),
            role: Role::Applicant,
            token,
        })
    }

    pub async fn change_password(
        &self,
        applicant_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if new_password.chars().count() < 6 {
            return Err(PortalError::invalid_field(
                "newPassword",
                "New password must be at least 6 characters",
            ));
        }

        let applicant = self.load_applicant(applicant_id).await?;
        if !verify_password(old_password, &applicant.password_hash) {
            return Err(PortalError::InvalidCredentials);
        }

        let password_hash = hash_password(new_password)?;
        self.applicants()
            .update_password(applicant_id, &password_hash)
            .await
            .map_err(PortalError::from)
    }

    /// Stores a hashed temporary password and queues the cleartext email in
    /// the same transaction: the account can never end up holding a
    /// password nobody was told about.
    pub async fn forgot_password(&self, applicant_id: &str) -> Result<()> {
        let applicant = self.load_applicant(applicant_id).await?;

        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password)?;

        let email = notify::temp_password_email(
            &self.settings,
            &applicant.applicant_id,
            &applicant.full_name,
            &temp_password,
            &applicant.email_address,
        );

        self.applicants()
            .reset_password(applicant_id, &password_hash, &email)
            .await
            .map_err(PortalError::from)
    }

    pub fn issue_token(&self, subject: &str, role: Role) -> Result<String> {
        let exp = (Utc::now() + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp() as usize;
        let claims = Claims {
            sub: subject.to_string(),
            role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
        )
        .map_err(|e| PortalError::Internal(format!("token signing failed: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| PortalError::InvalidCredentials)
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| PortalError::Internal(format!("password hashing failed: {}", e)))
}

/// A hash that fails to parse counts as a mismatch, not an error.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

pub(crate) fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_password_is_eight_alphanumeric_chars() {
        for _ in 0..20 {
            let pw = generate_temp_password();
            assert_eq!(pw.chars().count(), 8);
            assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn password_verification_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
        // Garbage hash is a mismatch, never a panic.
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn role_claim_serializes_lowercase() {
        let claims = Claims {
            sub: "NRP100001".to_string(),
            role: Role::Admin,
            exp: 2_000_000_000,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
    }
}
