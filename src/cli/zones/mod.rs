//! Zones command - inspect and delete delivery zone configurations

use std::io::Write;

use anyhow::bail;
use clap::Subcommand;

use crate::domain::{CheckoutStorage, DeliveryZoneId, Query};

use super::print_json;

#[derive(Subcommand, Debug)]
pub enum ZonesCommand {
    /// List stored zones, optionally only those for one country
    List {
        /// ISO 2 country code
        #[arg(long)]
        country: Option<String>,
    },

    /// Show the zones with the given IDs
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete the zones with the given IDs, or every zone with --all
    Delete {
        ids: Vec<String>,

        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
}

/// Run a zones subcommand
pub async fn run(
    storage: &dyn CheckoutStorage,
    command: ZonesCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        ZonesCommand::List { country } => {
            let mut query = Query::new();
            query.set_country(country);

            let zones: Vec<_> = storage
                .find_all_zone_configs()
                .await?
                .into_iter()
                .filter(|zone| query.matches_zone(zone))
                .collect();

            print_json(out, &zones)
        }
        ZonesCommand::Show { ids } => {
            let ids: Vec<DeliveryZoneId> = ids.into_iter().map(DeliveryZoneId::from).collect();
            let zones = storage.find_zone_configs(&ids).await?;

            print_json(out, &zones)
        }
        ZonesCommand::Delete { ids, all } => {
            if all {
                storage.delete_all_zone_configs().await?;
            } else if ids.is_empty() {
                bail!("Pass at least one zone ID or --all");
            } else {
                let ids: Vec<DeliveryZoneId> =
                    ids.into_iter().map(DeliveryZoneId::from).collect();
                storage.delete_specific_zone_configs(&ids).await?;
            }

            print_json(out, &storage.find_all_zone_configs().await?)
        }
    }
}
