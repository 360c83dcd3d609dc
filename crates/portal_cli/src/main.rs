// portal_cli/src/main.rs
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use portal_cli::commands;
use portal_cli::config::Config;

#[derive(Parser)]
#[command(name = "portal_cli")]
#[command(about = "Recruitment portal operations toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// Produce a bcrypt hash for ADMIN_PASSWORD_HASH
    HashPassword(commands::hash_password::HashPasswordArgs),

    /// List every applicant with a submitted payment
    ListPayments(commands::list_payments::ListPaymentsArgs),

    /// Record an admin payment decision from the terminal
    SetPaymentStatus(commands::set_payment_status::SetPaymentStatusArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword(args) => {
            // No database needed for this one.
            commands::hash_password::execute(args)?;
        }
        Commands::Rebuild(args) => {
            let config = Config::from_env()?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::ListPayments(args) => {
            let config = Config::from_env()?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::list_payments::execute(pool, args).await?;
        }
        Commands::SetPaymentStatus(args) => {
            let config = Config::from_env()?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::set_payment_status::execute(pool, config, args).await?;
        }
    }

    Ok(())
}
