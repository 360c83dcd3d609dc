use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use portal_core::format_applicant_id;
use portal_core::models::{
    Applicant, CandidateDetails, DocumentDetails, NewApplicant, PaidApplicant, PaymentDetails,
    QualificationDetails,
};

use crate::error::{is_unique_violation, Error, Result};
use crate::outbox::{self, NewOutboxEmail};

const APPLICANT_COLUMNS: &str = "id, applicant_id, post_code, full_name, mobile_number, \
     alternate_mobile_number, email_address, password_hash, is_verified, otp_code, \
     otp_expires_at, candidate_details, candidate_completed, qualification_details, \
     qualification_completed, document_details, documents_uploaded, payment_details, \
     payment_completed, created_at, updated_at";

/// Row shape as Postgres hands it back; sub-profiles travel as JSONB.
#[derive(sqlx::FromRow)]
struct ApplicantRow {
    id: Uuid,
    applicant_id: String,
    post_code: String,
    full_name: String,
    mobile_number: String,
    alternate_mobile_number: Option<String>,
    email_address: String,
    password_hash: String,
    is_verified: bool,
    otp_code: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    candidate_details: Json<CandidateDetails>,
    candidate_completed: bool,
    qualification_details: Json<QualificationDetails>,
    qualification_completed: bool,
    document_details: Json<DocumentDetails>,
    documents_uploaded: bool,
    payment_details: Json<PaymentDetails>,
    payment_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ApplicantRow> for Applicant {
    fn from(row: ApplicantRow) -> Self {
        Applicant {
            id: row.id,
            applicant_id: row.applicant_id,
            post_code: row.post_code,
            full_name: row.full_name,
            mobile_number: row.mobile_number,
            alternate_mobile_number: row.alternate_mobile_number,
            email_address: row.email_address,
            password_hash: row.password_hash,
            is_verified: row.is_verified,
            otp_code: row.otp_code,
            otp_expires_at: row.otp_expires_at,
            candidate_details: row.candidate_details.0,
            candidate_completed: row.candidate_completed,
            qualification_details: row.qualification_details.0,
            qualification_completed: row.qualification_completed,
            document_details: row.document_details.0,
            documents_uploaded: row.documents_uploaded,
            payment_details: row.payment_details.0,
            payment_completed: row.payment_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct ApplicantRepository {
    pool: PgPool,
}

impl ApplicantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Draws the next value from the bounded id sequence and formats the
    /// public applicant id. The sequence is exclusive per call, so two
    /// concurrent registrations can never collide.
    pub async fn allocate_applicant_id(&self, prefix: &str) -> Result<String> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('applicant_id_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(format_applicant_id(prefix, seq))
    }

    /// Fast-path duplicate probe used before registration; the unique
    /// constraints remain the final arbiter.
    pub async fn identity_taken(&self, mobile_number: &str, email_address: &str) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applicants WHERE mobile_number = $1 OR email_address = $2)",
        )
        .bind(mobile_number)
        .bind(email_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    /// Creates the applicant row and queues the credentials email in one
    /// transaction: either both land or neither does.
    pub async fn create(&self, new: &NewApplicant, welcome: &NewOutboxEmail) -> Result<Applicant> {
        let mut tx = self.pool.begin().await?;

        let row: ApplicantRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO applicants
                (id, applicant_id, post_code, full_name, mobile_number,
                 alternate_mobile_number, email_address, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {APPLICANT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.applicant_id)
        .bind(&new.post_code)
        .bind(&new.full_name)
        .bind(&new.mobile_number)
        .bind(&new.alternate_mobile_number)
        .bind(&new.email_address)
        .bind(&new.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Duplicate("mobile number or email address".to_string())
            } else {
                Error::from(e)
            }
        })?;

        outbox::enqueue(&mut *tx, welcome).await?;

        tx.commit().await?;
        Ok(row.into())
    }

    pub async fn find_by_applicant_id(&self, applicant_id: &str) -> Result<Option<Applicant>> {
        self.find_by("applicant_id", applicant_id).await
    }

    pub async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Applicant>> {
        self.find_by("mobile_number", mobile_number).await
    }

    pub async fn find_by_email(&self, email_address: &str) -> Result<Option<Applicant>> {
        self.find_by("email_address", email_address).await
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Option<Applicant>> {
        // `column` is one of three fixed names above, never caller input.
        let row: Option<ApplicantRow> = sqlx::query_as(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Applicant::from))
    }

    pub async fn update_password(&self, applicant_id: &str, password_hash: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET password_hash = $2, updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    /// Password reset: the new hash and the cleartext email leave in the
    /// same transaction, so a stored reset always has a queued delivery.
    pub async fn reset_password(
        &self,
        applicant_id: &str,
        password_hash: &str,
        email: &NewOutboxEmail,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE applicants SET password_hash = $2, updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;
        Self::expect_hit(result.rows_affected())?;

        outbox::enqueue(&mut *tx, email).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn store_otp(
        &self,
        mobile_number: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        email: &NewOutboxEmail,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE applicants SET otp_code = $2, otp_expires_at = $3, updated_at = now() \
             WHERE mobile_number = $1",
        )
        .bind(mobile_number)
        .bind(code)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;
        Self::expect_hit(result.rows_affected())?;

        outbox::enqueue(&mut *tx, email).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Clears the stored code and marks the account verified. Single use:
    /// the code is gone after this.
    pub async fn consume_otp(&self, mobile_number: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET otp_code = NULL, otp_expires_at = NULL, is_verified = TRUE, \
             updated_at = now() WHERE mobile_number = $1",
        )
        .bind(mobile_number)
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    pub async fn save_candidate_details(
        &self,
        applicant_id: &str,
        details: &CandidateDetails,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET candidate_details = $2, candidate_completed = TRUE, \
             updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(Json(details))
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    pub async fn save_qualification_details(
        &self,
        applicant_id: &str,
        details: &QualificationDetails,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET qualification_details = $2, qualification_completed = TRUE, \
             updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(Json(details))
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    pub async fn save_document_details(
        &self,
        applicant_id: &str,
        details: &DocumentDetails,
        uploaded: bool,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET document_details = $2, documents_uploaded = $3, \
             updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(Json(details))
        .bind(uploaded)
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    pub async fn save_payment_details(
        &self,
        applicant_id: &str,
        details: &PaymentDetails,
        completed: bool,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE applicants SET payment_details = $2, payment_completed = $3, \
             updated_at = now() WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(Json(details))
        .bind(completed)
        .execute(&self.pool)
        .await?;
        Self::expect_hit(result.rows_affected())
    }

    /// Admin decision: the status write and the applicant notification are
    /// committed together.
    pub async fn update_payment_status(
        &self,
        applicant_id: &str,
        details: &PaymentDetails,
        email: Option<&NewOutboxEmail>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE applicants SET payment_details = $2, updated_at = now() \
             WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .bind(Json(details))
        .execute(&mut *tx)
        .await?;
        Self::expect_hit(result.rows_affected())?;

        if let Some(email) = email {
            outbox::enqueue(&mut *tx, email).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Everyone who has submitted a payment, newest registration first,
    /// projected down to what the review dashboard shows.
    pub async fn list_paid(&self) -> Result<Vec<PaidApplicant>> {
        #[derive(sqlx::FromRow)]
        struct PaidRow {
            applicant_id: String,
            full_name: String,
            email_address: String,
            mobile_number: String,
            payment_details: Json<PaymentDetails>,
            created_at: DateTime<Utc>,
        }

        let rows: Vec<PaidRow> = sqlx::query_as(
            "SELECT applicant_id, full_name, email_address, mobile_number, payment_details, \
             created_at FROM applicants WHERE payment_completed = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PaidApplicant {
                applicant_id: row.applicant_id,
                full_name: row.full_name,
                email_address: row.email_address,
                mobile_number: row.mobile_number,
                payment_details: row.payment_details.0,
                created_at: row.created_at,
            })
            .collect())
    }

    fn expect_hit(rows_affected: u64) -> Result<()> {
        if rows_affected == 0 {
            Err(Error::NotFound("Applicant".to_string()))
        } else {
            Ok(())
        }
    }
}
