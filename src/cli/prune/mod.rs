//! Prune command - reconcile stored configurations with the live catalog

use std::io::Write;

use clap::Args;
use serde_json::json;

use crate::domain::CheckoutStorage;
use crate::infrastructure::delivery::InMemoryShippingCatalog;

use super::print_json;

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Host zone ID that still exists, repeatable. Bound zones not listed are deleted.
    #[arg(long = "live-zone")]
    pub live_zones: Vec<String>,

    /// Host method ID that still exists, repeatable. Bound methods not listed are deleted.
    #[arg(long = "live-method")]
    pub live_methods: Vec<String>,
}

/// Run the prune command
pub async fn run(
    storage: &dyn CheckoutStorage,
    catalog: &InMemoryShippingCatalog,
    args: PruneArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    catalog.set_zones(args.live_zones)?;
    catalog.set_methods(args.live_methods)?;

    storage.delete_obsolete_method_configs().await?;
    storage.delete_obsolete_zone_configs().await?;

    let zones = storage.find_all_zone_configs().await?.len();
    let methods = storage.find_all_method_configs().await?.len();

    print_json(out, &json!({ "zones": zones, "methods": methods }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::checkout_storage_from_stores;
    use crate::domain::{Country, DeliveryMethod, DeliveryZone};
    use crate::infrastructure::storage::{DeliveryStores, InMemoryStorage};

    #[tokio::test]
    async fn test_prune_removes_unlisted_bound_configs() {
        let catalog = Arc::new(InMemoryShippingCatalog::new());
        let stores = DeliveryStores {
            zones: Arc::new(InMemoryStorage::with_entities(vec![
                DeliveryZone::new("1", Country::new("DE", "Germany")).with_system_id("4"),
                DeliveryZone::new("2", Country::new("NL", "Netherlands")).with_system_id("5"),
            ])),
            methods: Arc::new(InMemoryStorage::with_entities(vec![
                DeliveryMethod::new("10", "standard_delivery")
                    .with_zone("1")
                    .with_system_id("flat_rate:7"),
                DeliveryMethod::new("11", "standard_delivery").with_zone("2"),
            ])),
        };
        let storage = checkout_storage_from_stores(stores, catalog.clone());

        let args = PruneArgs {
            live_zones: vec!["4".to_string()],
            live_methods: vec![],
        };
        let mut out = Vec::new();
        run(&storage, &catalog, args, &mut out).await.unwrap();

        let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(summary, json!({ "zones": 1, "methods": 1 }));

        let remaining = storage.find_all_method_configs().await.unwrap();
        assert_eq!(remaining[0].id.as_str(), "11");
    }
}
