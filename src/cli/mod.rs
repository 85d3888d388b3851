//! CLI module for Checkout Storage
//!
//! Operator commands that act on the stored delivery configurations
//! through the checkout storage:
//! - `zones`: list, show and delete zone configurations
//! - `methods`: list and delete method configurations
//! - `import`: create configurations from a JSON file
//! - `prune`: drop configurations whose host zone or method is gone
//!
//! With the default `memory` backend the data only lives for the duration
//! of one command, so operators point `APP__STORAGE__BACKEND` at PostgreSQL.

pub mod import;
pub mod methods;
pub mod prune;
pub mod zones;

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::delivery::InMemoryShippingCatalog;
use crate::infrastructure::logging;

/// Checkout Storage - manage delivery zone and method configurations
#[derive(Parser, Debug)]
#[command(name = "checkout-storage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or delete delivery zone configurations
    #[command(subcommand)]
    Zones(zones::ZonesCommand),

    /// Inspect or delete delivery method configurations
    #[command(subcommand)]
    Methods(methods::MethodsCommand),

    /// Create zone and method configurations from a JSON file
    Import(import::ImportArgs),

    /// Delete configurations whose host entity no longer exists
    Prune(prune::PruneArgs),
}

/// Loads configuration, sets up logging and runs the command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    let catalog = Arc::new(InMemoryShippingCatalog::new());
    let storage = crate::create_checkout_storage(&config.storage, catalog.clone()).await?;

    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Zones(command) => zones::run(&storage, command, &mut out).await,
        Command::Methods(command) => methods::run(&storage, command, &mut out).await,
        Command::Import(args) => import::run(&storage, args, &mut out).await,
        Command::Prune(args) => prune::run(&storage, &catalog, args, &mut out).await,
    }
}

/// Writes `value` as pretty JSON followed by a newline
pub(crate) fn print_json<T: Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zones_list_with_country() {
        let cli = Cli::try_parse_from(["checkout-storage", "zones", "list", "--country", "DE"])
            .unwrap();

        match cli.command {
            Command::Zones(zones::ZonesCommand::List { country }) => {
                assert_eq!(country.as_deref(), Some("DE"));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_prune_with_live_ids() {
        let cli = Cli::try_parse_from([
            "checkout-storage",
            "prune",
            "--live-zone",
            "1",
            "--live-zone",
            "2",
            "--live-method",
            "flat_rate:4",
        ])
        .unwrap();

        match cli.command {
            Command::Prune(args) => {
                assert_eq!(args.live_zones, vec!["1", "2"]);
                assert_eq!(args.live_methods, vec!["flat_rate:4"]);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_all_conflicts_with_ids() {
        let result =
            Cli::try_parse_from(["checkout-storage", "zones", "delete", "1", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_print_json_appends_newline() {
        let mut out = Vec::new();
        print_json(&mut out, &vec!["1"]).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[\n  \"1\"\n]\n");
    }
}
