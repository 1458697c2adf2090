//! CLI administration tool for url-short.
//!
//! Provides commands for managing accounts, inspecting short URLs,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Register an account (password prompted, or generated with --generate)
//! cargo run --bin admin -- user create --email alice@example.com
//!
//! # Revoke an account's refresh token
//! cargo run --bin admin -- user revoke alice@example.com
//!
//! # Inspect a short key
//! cargo run --bin admin -- url show 3174bab
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use url_short::domain::entities::NewUser;
use url_short::domain::errors::UrlError;
use url_short::domain::repositories::{UrlStore, UserRepository};
use url_short::infrastructure::persistence::{PgUrlStore, PgUserRepository};
use url_short::infrastructure::security::hash_password;
use url_short::utils::key_generator::is_valid_key;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing url-short.
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
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new account
    Create {
        /// Account email
        #[arg(short, long)]
        email: Option<String>,

        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Invalidate the account's refresh token
    Revoke {
        /// Account email
        email: String,
    },
}

#[derive(Subcommand)]
enum UrlAction {
    /// Show the record behind a short key
    Show {
        /// 7-character short key
        key: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Url { action } => handle_url_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create {
            email,
            generate,
            yes,
        } => create_user(&repo, email, generate, yes).await,
        UserAction::Revoke { email } => revoke_user(&repo, &email).await,
    }
}

/// Registers an account with interactive prompts.
///
/// A generated password is printed once and never stored in clear.
async fn create_user(
    repo: &PgUserRepository,
    email: Option<String>,
    generate: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = email.trim().to_string();

    if !email.validate_email() {
        anyhow::bail!("'{}' is not a valid email address", email);
    }

    let password = if generate {
        let generated = generate_password();
        println!("{}", "✨ Generated new password".green());
        println!("  Password: {}", generated.bright_yellow().bold());
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
        generated
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?
    };

    println!();
    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password)?;

    let user = repo
        .create(NewUser {
            email,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Account created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Clears the stored refresh token. Access tokens already issued stay
/// valid until they expire.
async fn revoke_user(repo: &PgUserRepository, email: &str) -> Result<()> {
    println!("{}", "🔒 Revoke Refresh Token".bright_blue().bold());
    println!();

    let user = repo
        .find_by_email(email.trim())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    if user.refresh_token_hash.is_none() {
        println!("{}", "⚠️  This account has no active refresh token".yellow());
        return Ok(());
    }

    println!("  Account: {}", user.email.cyan());
    println!("  ID:      {}", user.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this account's refresh token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.clear_refresh_token(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Refresh token revoked".green().bold());
    println!();

    Ok(())
}

async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let store = PgUrlStore::new(Arc::new(pool.clone()));

    match action {
        UrlAction::Show { key } => {
            if !is_valid_key(&key) {
                anyhow::bail!("'{}' is not a valid short key", key);
            }

            match store.get_by_key(&key).await {
                Ok(record) => {
                    println!("{}", "🔗 Short URL".bright_blue().bold());
                    println!();
                    println!("  Key:      {}", record.short_key.cyan());
                    println!("  Long URL: {}", record.long_url.bright_white());
                    println!("  Owner:    {}", record.owner_id.to_string().bright_black());
                    println!(
                        "  Created:  {}",
                        record.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
                    );
                    println!(
                        "  Updated:  {}",
                        record.updated_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
                    );
                    println!();
                }
                Err(UrlError::NotFound) => {
                    println!("{}", "⚠️  No URL stored under this key".yellow());
                }
                Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
            }
        }
    }

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

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            let urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Accounts:   {}", users.to_string().bright_green().bold());
            println!("  URLs:       {}", urls.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

/// Generates a random 24-character alphanumeric password.
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 24;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
