//! # catalog-cli Binary Entry Point
//!
//! Parses arguments and hands off to [`catalog_cli::run`]. All setup lives in
//! the library so it can be exercised from tests.

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_cli::run(catalog_cli::Cli::parse()).await
}
