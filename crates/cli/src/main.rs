//! Driftwood CLI - user and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! dw-cli user add -u alice -p "s3cret-pass"
//!
//! # Reset a password
//! dw-cli user reset -u alice -p "n3w-pass"
//!
//! # Delete a user
//! dw-cli user delete -u alice
//!
//! # List usernames
//! dw-cli user list
//!
//! # Validate the catalog file and show which price column resolved
//! dw-cli catalog check
//! ```
//!
//! # Environment Variables
//!
//! - `DRIFTWOOD_USERS_FILE` - Path to the users JSON file
//! - `DRIFTWOOD_CATALOG` - Path to the catalog CSV file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwood Estimates CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Add {
        /// Username (letters, digits, dot, dash, underscore)
        #[arg(short, long)]
        username: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Delete a user
    Delete {
        /// Username to delete
        #[arg(short, long)]
        username: String,
    },
    /// Reset a user's password
    Reset {
        /// Username to reset
        #[arg(short, long)]
        username: String,

        /// New password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// List all usernames
    List,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load the catalog and report rows and the resolved price column
    Check {
        /// Catalog CSV path (defaults to `DRIFTWOOD_CATALOG`)
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::User { action } => match action {
            UserAction::Add { username, password } => {
                commands::user::add(&username, &password)?;
            }
            UserAction::Delete { username } => commands::user::delete(&username)?,
            UserAction::Reset { username, password } => {
                commands::user::reset(&username, &password)?;
            }
            UserAction::List => commands::user::list()?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(path.as_deref())?,
        },
    }
    Ok(())
}
