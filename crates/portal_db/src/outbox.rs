use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Transactional email outbox.
//
// Request handlers never talk to SMTP. They enqueue a pre-rendered message
// inside the same transaction as the state change it announces; the
// delivery worker drains the queue afterwards. A failed send retries with
// backoff until the attempt budget runs out, then the row is parked as
// `failed` for an operator to inspect.
// ---------------------------------------------------------------------------

/// A message to queue. The body is fully rendered at enqueue time.
#[derive(Debug, Clone)]
pub struct NewOutboxEmail {
    pub recipient: String,
    pub subject: String,
    pub body_html: String,
}

/// A claimed queue row, ready to hand to the mailer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutboxEmail {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub body_html: String,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

/// Inserts a message as part of the caller's transaction.
pub async fn enqueue(conn: &mut PgConnection, email: &NewOutboxEmail) -> Result<()> {
    sqlx::query(
        "INSERT INTO email_outbox (recipient, subject, body_html) VALUES ($1, $2, $3)",
    )
    .bind(&email.recipient)
    .bind(&email.subject)
    .bind(&email.body_html)
    .execute(conn)
    .await?;
    Ok(())
}

pub struct OutboxRepository {
    pool: PgPool,
}

impl OutboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queues a standalone message outside any caller transaction (used by
    /// the pre-registration flow, which has no applicant row to change).
    pub async fn enqueue_one(&self, email: &NewOutboxEmail) -> Result<()> {
        sqlx::query(
            "INSERT INTO email_outbox (recipient, subject, body_html) VALUES ($1, $2, $3)",
        )
        .bind(&email.recipient)
        .bind(&email.subject)
        .bind(&email.body_html)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Atomically claims up to `limit` due messages: bumps their attempt
    /// counter and returns them. `FOR UPDATE SKIP LOCKED` keeps concurrent
    /// workers off each other's rows.
    pub async fn claim_due(&self, limit: i64) -> Result<Vec<OutboxEmail>> {
        let rows: Vec<OutboxEmail> = sqlx::query_as(
            r#"
            UPDATE email_outbox SET attempts = attempts + 1
            WHERE id IN (
                SELECT id FROM email_outbox
                WHERE status = 'pending' AND next_attempt_at <= now()
                ORDER BY id
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, recipient, subject, body_html, attempts, created_at
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn mark_sent(&self, id: i64) -> Result<()> {
        sqlx::query(
            "UPDATE email_outbox SET status = 'sent', sent_at = now(), last_error = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Records a failed attempt. With attempts left, the message is
    /// rescheduled `retry_in_secs` from now; otherwise it is parked.
    pub async fn mark_failed(
        &self,
        id: i64,
        error: &str,
        retry_in_secs: f64,
        exhausted: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE email_outbox
            SET status = CASE WHEN $4 THEN 'failed' ELSE 'pending' END,
                last_error = $2,
                next_attempt_at = now() + make_interval(secs => $3)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(retry_in_secs)
        .bind(exhausted)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
