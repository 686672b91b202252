//! CLI administration tool for marketplace-api.
//!
//! Provides commands for managing accounts, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new account (password is prompted)
//! cargo run --bin admin -- user create --login alice
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same variables as the server, `DATABASE_URL` and
//! `JWT_SECRET_KEY` being required.

use marketplace_api::application::services::AccountError;
use marketplace_api::config;
use marketplace_api::server::{connect_pool, pg_state};
use marketplace_api::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;

/// CLI tool for managing marketplace-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new account
    Create {
        /// Account login (prompted when omitted)
        #[arg(short, long)]
        login: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List accounts in registration order
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,

        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect_pool(&config).await?;
    let state = pg_state(pool.clone(), &config);

    match cli.command {
        Commands::User { action } => handle_user_action(action, &state).await?,
        Commands::Stats => handle_stats(&state).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, state: &AppState) -> Result<()> {
    match action {
        UserAction::Create { login, yes } => create_user(state, login, yes).await,
        UserAction::List { limit, offset } => list_users(state, limit, offset).await,
    }
}

/// Registers an account through the same rules the HTTP API applies.
///
/// The password is read without echo and confirmed once.
async fn create_user(state: &AppState, login: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let login = match login {
        Some(l) => l,
        None => Input::new().with_prompt("Login").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create account '{login}'?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let session = match state.account_service.register(&login, &password).await {
        Ok(session) => session,
        Err(e @ (AccountError::InvalidLogin
        | AccountError::WeakPassword
        | AccountError::AlreadyExists)) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create account: {e}")),
    };

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!();
    println!("  ID:    {}", session.account.id.to_string().bright_black());
    println!("  Login: {}", session.account.login.cyan());
    println!("  Token: {}", session.token.bright_yellow());
    println!();

    Ok(())
}

/// Lists accounts in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID    Login                          Created
///   ──────────────────────────────────────────────────────────
///   1     alice                          2024-01-15 10:30
///   2     bob                            2024-01-16 14:20
/// ```
async fn list_users(state: &AppState, limit: i64, offset: i64) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = state
        .account_service
        .list(limit, offset)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {e}"))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Login".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(58).bright_black());

    for account in &accounts {
        println!(
            "  {:<5} {:<30} {}",
            account.id.to_string().bright_black(),
            account.login.cyan(),
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Shown: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays account and listing counts.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let accounts = state
        .account_service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count accounts: {e}"))?;

    let listings = state
        .listing_service
        .count_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count listings: {e}"))?;

    println!(
        "  Accounts: {}",
        accounts.to_string().bright_green().bold()
    );
    println!(
        "  Listings: {}",
        listings.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to migrate")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
