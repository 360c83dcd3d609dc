use clap::Args;

#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// The admin password to hash
    #[arg(short, long)]
    pub password: String,
}

/// Same work factor the server uses for applicant passwords.
const BCRYPT_COST: u32 = 12;

pub fn execute(args: HashPasswordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let hash = bcrypt::hash(&args.password, BCRYPT_COST)?;
    println!("ADMIN_PASSWORD_HASH={}", hash);
    Ok(())
}
