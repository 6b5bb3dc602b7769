//! # Catalog CLI Library
//!
//! Command-line presentation layer for the product catalog. Everything here
//! is orchestration: the sync policy, cache and search live in catalog-sync.
//!
//! ## Module Organization
//! ```text
//! catalog_cli/
//! ├── lib.rs          ◄─── You are here (argument model, startup, dispatch)
//! ├── state.rs        ◄─── AppState: config + database + sync service
//! ├── render.rs       ◄─── Pure text rendering of catalog states
//! └── commands/
//!     ├── list.rs     ◄─── Live catalog with optional search query
//!     ├── add.rs      ◄─── Add-product form submission
//!     └── cache.rs    ◄─── Local cache inspection
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  catalog-cli list --query mug                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  run() ──► init_tracing() ──► load config ──► AppState::connect()       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::list::run(&state, ...)                                       │
//! │         │                                                               │
//! │         │  CatalogFeed ──► SearchProjector ──► render::catalog()        │
//! │         ▼                                                               │
//! │  stdout: Loading products... / product table / error + cached table     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod render;
pub mod state;

use std::path::PathBuf;

use catalog_sync::CatalogConfig;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use state::AppState;

/// Product catalog with offline fallback.
#[derive(Debug, Parser)]
#[command(name = "catalog-cli", version, about)]
pub struct Cli {
    /// Path to catalog.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the catalog, falling back to the local cache when offline
    #[command(alias = "ls")]
    List {
        /// Only show products whose name or type contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Print the final state as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Submit a new product
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short = 't', long = "type")]
        product_type: String,

        /// Price as typed; empty means 0
        #[arg(short, long, default_value = "")]
        price: String,

        /// Tax rate as typed; empty means 0
        #[arg(long, default_value = "")]
        tax: String,

        /// Image file to upload with the product
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Show what the local cache currently holds
    Cache,
}

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// 1. Initialize tracing (stderr, `RUST_LOG` aware)
/// 2. Load configuration (explicit file must load; default path may fall back)
/// 3. Open the cache database and build the sync service
/// 4. Dispatch the subcommand
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    let config = match cli.config {
        Some(path) => CatalogConfig::load(Some(path))?,
        None => CatalogConfig::load_or_default(None),
    };

    info!(api = %config.api.base_url, "Starting catalog client");

    let state = AppState::connect(config).await?;

    let outcome = match cli.command {
        Command::List { query, json } => commands::list::run(&state, query, json).await,
        Command::Add {
            name,
            product_type,
            price,
            tax,
            image,
        } => {
            let input = commands::add::AddInput {
                name,
                product_type,
                price,
                tax,
                image,
            };
            commands::add::run(&state, input).await
        }
        Command::Cache => commands::cache::run(&state).await,
    };

    state.close().await;
    outcome
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=catalog=trace` - Show trace for catalog crates only
/// - Default: INFO, DEBUG for catalog crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    // A second init (e.g. from tests) is ignored
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_query() {
        let cli = Cli::try_parse_from(["catalog-cli", "list", "--query", "mug", "--json"]).unwrap();

        match cli.command {
            Command::List { query, json } => {
                assert_eq!(query.as_deref(), Some("mug"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_defaults_amounts_to_empty_text() {
        let cli = Cli::try_parse_from([
            "catalog-cli", "add", "--name", "Red Shirt", "-t", "Apparel",
        ])
        .unwrap();

        match cli.command {
            Command::Add {
                name,
                product_type,
                price,
                tax,
                image,
            } => {
                assert_eq!(name, "Red Shirt");
                assert_eq!(product_type, "Apparel");
                assert_eq!(price, "");
                assert_eq!(tax, "");
                assert!(image.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["catalog-cli", "cache", "--config", "/tmp/catalog.toml"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/catalog.toml")));
        assert!(matches!(cli.command, Command::Cache));
    }

    #[test]
    fn test_add_requires_name() {
        assert!(Cli::try_parse_from(["catalog-cli", "add", "--type", "Apparel"]).is_err());
    }
}
