use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tarkib_cli::superadmin;
use tarkib_db::{DbConfig, PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "tarkib-cli")]
#[command(about = "Tarkib CLI - super admin management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a super admin account
    CreateSuperadmin {
        /// Phone number used to log in
        #[arg(short = 'n', long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Clear the blocked flag on a super admin account
    UnblockSuperadmin {
        /// Phone number of the account
        #[arg(short = 'n', long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };

    match cli.command {
        Commands::CreateSuperadmin { phone, password } => {
            handle_create_superadmin(&pool, phone, password).await
        }
        Commands::UnblockSuperadmin { phone } => handle_unblock_superadmin(&pool, phone).await,
    }
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let mut config = DbConfig::from_env()?;
    config.max_connections = 2;
    Ok(init_db_pool(&config).await?)
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, error);
    std::process::exit(1);
}

fn prompt_phone(phone: Option<String>) -> String {
    match phone {
        Some(phone) => phone,
        None => Input::new()
            .with_prompt("Phone number")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read phone number", e)),
    }
}

async fn handle_create_superadmin(pool: &PgPool, phone: Option<String>, password: Option<String>) {
    let phone = prompt_phone(phone);

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e)),
    };

    match superadmin::create(pool, &phone, &password).await {
        Ok(id) => {
            println!("\n✅ Super admin created successfully!");
            println!("   Phone: {}", phone);
            println!("   ID: {}", id);
        }
        Err(e) => fail("Error creating super admin", e),
    }
}

async fn handle_unblock_superadmin(pool: &PgPool, phone: Option<String>) {
    let phone = prompt_phone(phone);

    match superadmin::unblock(pool, &phone).await {
        Ok(()) => println!("\n✅ Super admin {} unblocked", phone),
        Err(e) => fail("Error unblocking super admin", e),
    }
}
