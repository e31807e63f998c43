use agrosense::cli::{create_user, run_migrations};
use agrosense_auth::Role;
use agrosense_config::DatabaseConfig;
use agrosense_db::{PgUserStore, init_db_pool};
use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "agrosense-cli")]
#[command(about = "agrosense CLI - Administrative tools for agrosense", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account
    CreateUser {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Role tag, e.g. admin or user
        #[arg(short = 'r', long, default_value = "user")]
        role: Role,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateUser {
            username,
            role,
            password,
        } => {
            let username = match username {
                Some(username) => username,
                None => Input::new().with_prompt("Username").interact_text()?,
            };

            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let store = PgUserStore::new(pool);
            let user = create_user(&store, &username, &password, &role)
                .await
                .map_err(|e| anyhow::anyhow!("Error creating user: {}", e))?;

            println!("\n✅ User created successfully!");
            println!("   Username: {}", user.username);
            println!("   Role: {}", user.role);
        }
    }

    Ok(())
}
