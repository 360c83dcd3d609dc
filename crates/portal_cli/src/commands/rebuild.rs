use clap::Args;
use sqlx::PgPool;

#[derive(Debug, Args)]
pub struct RebuildArgs {}

pub async fn execute(pool: PgPool, _args: RebuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔄 Applying schema from embedded assets...");
    portal_db::schema::ensure_schema(&pool).await?;
    println!("✅ Schema is up to date.");
    Ok(())
}
