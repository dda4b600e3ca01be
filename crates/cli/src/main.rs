//! Heen CLI - browse the storefront and run the admin panel from a terminal.
//!
//! Each invocation loads the stored catalog and session, performs one
//! action and writes any change back.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! heen catalog list --gender Feminino --query baunilha
//! heen catalog show khamrah
//! heen collection show colecao_arabe
//!
//! # Sign in as administrator, then manage the catalog
//! heen auth login -e admin@heein.com -p adminlucas
//! heen admin prices 199,90
//! heen admin product delete 1712345678901 --yes
//!
//! # Buy (the cart only lives for this one command)
//! heen checkout -p 1 -p 1 -p 7 --name Maria --email maria@exemplo.com
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, show and facet products
//! - `collection` - Show a collection page
//! - `auth` - Sign in, sign up, sign out
//! - `checkout` - Build a cart and check out
//! - `admin` - Catalog and site settings management (administrators only)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use heen_storefront::config::{LogFormat, StorefrontConfig};
use heen_storefront::{AppError, AppState};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::admin::AdminCommand;
use commands::auth::AuthCommand;
use commands::catalog::{CatalogCommand, CollectionCommand};
use commands::checkout::CheckoutArgs;

const DEFAULT_LOG_FILTER: &str = "heen=info,heen_storefront=info";

#[derive(Parser)]
#[command(name = "heen")]
#[command(author, version, about = "Heen Fragrâncias storefront CLI")]
struct Cli {
    /// Data directory (overrides `HEEN_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Browse collections
    Collection {
        #[command(subcommand)]
        command: CollectionCommand,
    },
    /// Sign in and out
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Put products in a cart and check out
    Checkout(CheckoutArgs),
    /// Manage the catalog (administrators only)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config) {
        match e.downcast_ref::<AppError>() {
            Some(app) => tracing::error!(error = %app, "{}", app.user_message()),
            None => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output can be piped.
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let mut state = AppState::open(config)?;

    match cli.command {
        Commands::Catalog { command } => commands::catalog::run(&state, command)?,
        Commands::Collection { command } => commands::catalog::run_collection(&state, command)?,
        Commands::Auth { command } => commands::auth::run(&mut state, command)?,
        Commands::Checkout(args) => commands::checkout::run(&mut state, &args)?,
        Commands::Admin { command } => commands::admin::run(&mut state, command, cli.yes)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_yes_after_subcommand() {
        let cli = Cli::try_parse_from(["heen", "admin", "prices", "199,90", "--yes"]);
        assert!(cli.is_ok_and(|cli| cli.yes));
    }
}
