//! Bookstall CLI
//!
//! Command-line admin console for a Bookstall server. Plays the role of
//! the view layer: it renders store state, invokes store operations and
//! consumes the notification each operation leaves behind.
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - session management
//! - `list` - fetch one page of a resource, with keyword and filters
//! - `create` / `update` - submit a JSON draft for a resource
//! - `delete` - delete an item by id

mod commands;

use clap::{Parser, Subcommand};
use commands::{CliContext, ResourceKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bookstall command-line admin console.
#[derive(Parser)]
#[command(name = "bookstall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Admin API base URL
    #[arg(global = true, long, default_value = "http://localhost:8080")]
    server: String,

    /// Credential file path
    #[arg(global = true, long, default_value = "bookstall-credentials.json")]
    credentials: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the admin console
    Login {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out and revoke the session
    Logout,

    /// Show the current session state
    Whoami,

    /// List one page of a resource
    List {
        /// Which resource to list
        #[arg(value_enum)]
        resource: ResourceKind,

        /// 1-based page index
        #[arg(short, long, default_value = "1")]
        index: u32,

        /// Page size; defaults to the configured page size
        #[arg(short, long)]
        size: Option<u32>,

        /// Search keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Extra filter pairs as key=value
        #[arg(short, long)]
        filter: Vec<String>,
    },

    /// Create an item from a JSON draft
    Create {
        /// Which resource to create in
        #[arg(value_enum)]
        resource: ResourceKind,

        /// The draft as a JSON document
        #[arg(long)]
        data: String,
    },

    /// Update an item from a JSON draft
    Update {
        /// Which resource the item belongs to
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Item id
        id: u64,

        /// The draft as a JSON document
        #[arg(long)]
        data: String,
    },

    /// Delete an item
    Delete {
        /// Which resource the item belongs to
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Item id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let context = CliContext::connect(&cli.server, &cli.credentials)?;

    let outcome = match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&context, &email, &password).await
        }
        Commands::Logout => commands::session::logout(&context).await,
        Commands::Whoami => commands::session::whoami(&context),
        Commands::List {
            resource,
            index,
            size,
            keyword,
            filter,
        } => commands::crud::list(&context, resource, index, size, keyword.as_deref(), &filter).await,
        Commands::Create { resource, data } => {
            commands::crud::create(&context, resource, &data).await
        }
        Commands::Update { resource, id, data } => {
            commands::crud::update(&context, resource, id, &data).await
        }
        Commands::Delete { resource, id } => commands::crud::delete(&context, resource, id).await,
    };

    // Surface the operation's notification the way a screen banner would.
    context.print_notification();

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
