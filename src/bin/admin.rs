//! CLI administration tool for user-registry.
//!
//! Inspects and removes user records and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Show one user
//! cargo run --bin admin -- user show 6f1c0a52-3f0e-4a5e-9a43-0d6f2b1b8c11
//!
//! # Delete a user (asks for confirmation unless -y is given)
//! cargo run --bin admin -- user delete 6f1c0a52-3f0e-4a5e-9a43-0d6f2b1b8c11
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` components, see `config`): PostgreSQL connection

use user_registry::config;
use user_registry::domain::age::age_on;
use user_registry::domain::entities::User;
use user_registry::domain::repositories::UserRepository;
use user_registry::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use mockable::{Clock, DefaultClock};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing user-registry.
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
    /// Inspect or remove users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Show a single user
    Show {
        /// User id (UUID)
        id: Uuid,
    },

    /// Permanently delete a user
    Delete {
        /// User id (UUID)
        id: Uuid,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await,
        UserAction::Show { id } => show_user(&repo, id).await,
        UserAction::Delete { id, yes } => delete_user(&repo, id, yes).await,
    }
}

/// Lists all users as a table.
///
/// ```text
/// 👥 Users
///
///   ID                                    Name                      Email                          Age
///   ─────────────────────────────────────────────────────────────────────────────────────────────────
///   6f1c0a52-3f0e-4a5e-9a43-0d6f2b1b8c11  Ada Lovelace              ada@example.com                34
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e.describe()))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    let today = DefaultClock.utc().date_naive();

    println!(
        "  {:<37} {:<25} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Age".bright_white().bold()
    );
    println!("  {}", "─".repeat(97).bright_black());

    for user in &users {
        println!(
            "  {:<37} {:<25} {:<30} {}",
            user.id.to_string().bright_black(),
            full_name(user).cyan(),
            user.email,
            age_on(user.date_of_birth, today)
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every field of one user.
async fn show_user(repo: &PgUserRepository, id: Uuid) -> Result<()> {
    let user = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e.describe()))?
        .context("User not found")?;

    print_user(&user);
    Ok(())
}

/// Deletes a user after confirmation (default: No).
async fn delete_user(repo: &PgUserRepository, id: Uuid, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e.describe()))?
        .context("User not found")?;

    print_user(&user);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Permanently delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e.describe()))?;

    if deleted {
        println!("{}", "✅ User deleted".green().bold());
    } else {
        println!("{}", "⚠️  User was already gone".yellow());
    }
    println!();

    Ok(())
}

fn print_user(user: &User) {
    let age = age_on(user.date_of_birth, DefaultClock.utc().date_naive());

    println!("  ID:            {}", user.id.to_string().bright_black());
    println!("  Name:          {}", full_name(user).cyan());
    println!("  Email:         {}", user.email);
    println!("  Date of birth: {} (age {})", user.date_of_birth, age);
    println!("  Phone:         {}", user.phone_number);
    println!(
        "  Created:       {}",
        user.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!(
        "  Updated:       {}",
        user.updated_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();
}

fn full_name(user: &User) -> String {
    match &user.last_name {
        Some(last) => format!("{} {}", user.first_name, last),
        None => user.first_name.clone(),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e.describe()))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e.describe()))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
