use anyhow::Context;
use bookflow_cli::accounts::create_user;
use bookflow_cli::seeder::{self, SeedConfig};
use bookflow_config::DatabaseConfig;
use bookflow_db::init_db_pool;
use bookflow_models::accounts::SignupRequest;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "bookflow-cli")]
#[command(about = "BookFlow CLI - Administrative tools for BookFlow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Username (3-12 characters)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake authors, genres, and books
    Seed {
        /// Number of authors to create
        #[arg(short = 'a', long, default_value = "20")]
        authors: usize,

        /// Number of genres to create
        #[arg(short = 'g', long, default_value = "8")]
        genres: usize,

        /// Number of books to create
        #[arg(short = 'b', long, default_value = "200")]
        books: usize,
    },
    /// Seed only books, using existing authors and genres
    SeedBooks {
        /// Number of books to create
        #[arg(short = 'b', long, default_value = "200")]
        books: usize,
    },
    /// Clear all books, authors, and genres (keeps accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env().context("Failed to load database configuration")?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            password,
        } => handle_create_user(&pool, username, email, password).await,
        Commands::Seed {
            authors,
            genres,
            books,
        } => {
            seeder::seed_all(
                &pool,
                SeedConfig {
                    authors,
                    genres,
                    books,
                },
            )
            .await
        }
        Commands::SeedBooks { books } => seeder::seed_books(&pool, books).await.map(|_| ()),
        Commands::ClearSeed => seeder::clear_catalog(&pool).await,
    }
}

async fn handle_create_user(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let account = create_user(
        pool,
        SignupRequest {
            username,
            email,
            password,
        },
    )
    .await
    .context("Error creating user")?;

    println!("\n✅ User created successfully!");
    println!("   Username: {}", account.username);
    println!("   Email: {}", account.email);
    println!("   ID: {}", account.id);
    Ok(())
}
