use clap::Args;
use sqlx::PgPool;

use portal_db::ApplicantRepository;

#[derive(Debug, Args)]
pub struct ListPaymentsArgs {}

pub async fn execute(
    pool: PgPool,
    _args: ListPaymentsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = ApplicantRepository::new(pool);
    let users = repo.list_paid().await?;

    if users.is_empty() {
        println!("No payment submissions yet.");
        return Ok(());
    }

    println!(
        "{:<12} {:<24} {:<18} {:<12} UTR",
        "ID", "Name", "Status", "Registered"
    );
    for user in users {
        println!(
            "{:<12} {:<24} {:<18} {:<12} {}",
            user.applicant_id,
            user.full_name,
            user.payment_details.payment_status.to_string(),
            user.created_at.format("%Y-%m-%d"),
            user.payment_details.utr_number.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
