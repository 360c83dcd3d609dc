use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client};
use clap::Args;
use sqlx::PgPool;

use portal_core::models::PaymentStatus;
use portal_service::PortalService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct SetPaymentStatusArgs {
    /// The public applicant id (e.g. NRP100123)
    #[arg(short, long)]
    pub id: String,

    /// The decision: verified or cancelled (or processing to reopen)
    #[arg(short, long)]
    pub status: String,

    /// Remarks delivered to the applicant on cancellation
    #[arg(short, long)]
    pub remarks: Option<String>,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: SetPaymentStatusArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: PaymentStatus = args.status.parse()?;

    // The decision goes through the same service path the dashboard uses,
    // notification included.
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(config.s3_region.clone()));
    let aws_config = aws_config::from_env().region(region_provider).load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .endpoint_url(&config.s3_endpoint)
        .build();
    let s3 = Client::from_conf(s3_config);

    let service = PortalService::new(
        pool,
        s3,
        config.s3_bucket.clone(),
        config.service_settings(),
    );

    let details = service
        .set_payment_status(&args.id, status, args.remarks)
        .await?;

    println!(
        "✅ {} payment is now '{}' (UTR: {})",
        args.id,
        details.payment_status,
        details.utr_number.as_deref().unwrap_or("-"),
    );
    Ok(())
}
