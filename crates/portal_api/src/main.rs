use std::sync::Arc;
use std::time::Duration;

use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client as S3Client};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use portal_api::config::Config;
use portal_api::routes::app_router;
use portal_api::state::AppState;
use portal_service::notify::{spawn_outbox_worker, SmtpMailer};
use portal_service::PortalService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // 1. Load config (fails fast if invalid)
    let config = Config::from_env()?;

    // 2. Connect to Postgres and make sure the schema exists
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    portal_db::schema::ensure_schema(&pool).await?;

    // 3. Connect to the blob store
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(config.s3_region.clone()));
    let aws_config = aws_config::from_env().region(region_provider).load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .endpoint_url(&config.s3_endpoint)
        .build();
    let s3 = S3Client::from_conf(s3_config);

    let service = PortalService::new(
        pool.clone(),
        s3,
        config.s3_bucket.clone(),
        config.service_settings(),
    );
    service.ensure_bucket().await?;

    // 4. Start the outbox delivery worker
    let mailer = Arc::new(SmtpMailer::new(
        &config.smtp_host,
        &config.smtp_username,
        &config.smtp_password,
        &config.email_from,
    )?);
    let _outbox_worker = spawn_outbox_worker(
        pool.clone(),
        mailer,
        Duration::from_secs(config.outbox_poll_secs),
    );

    // 5. Serve
    let app = app_router(
        AppState { service },
        config.max_body_mb * 1024 * 1024,
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
