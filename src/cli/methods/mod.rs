//! Methods command - inspect and delete delivery method configurations

use std::io::Write;

use anyhow::bail;
use clap::Subcommand;

use crate::domain::{CheckoutStorage, DeliveryMethodId, DeliveryZoneId};

use super::print_json;

#[derive(Subcommand, Debug)]
pub enum MethodsCommand {
    /// List stored methods, optionally only those offered in some zones
    List {
        /// Zone ID to filter by, repeatable
        #[arg(long = "zone")]
        zones: Vec<String>,
    },

    /// Delete the methods with the given IDs, or every method with --all
    Delete {
        ids: Vec<String>,

        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
}

/// Run a methods subcommand
pub async fn run(
    storage: &dyn CheckoutStorage,
    command: MethodsCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        MethodsCommand::List { zones } => {
            let methods = if zones.is_empty() {
                storage.find_all_method_configs().await?
            } else {
                let zone_ids: Vec<DeliveryZoneId> =
                    zones.into_iter().map(DeliveryZoneId::from).collect();
                storage.find_method_in_zones(&zone_ids).await?
            };

            print_json(out, &methods)
        }
        MethodsCommand::Delete { ids, all } => {
            if all {
                storage.delete_all_method_configs().await?;
                storage.delete_all_method_data().await?;
            } else if ids.is_empty() {
                bail!("Pass at least one method ID or --all");
            } else {
                let ids: Vec<DeliveryMethodId> =
                    ids.into_iter().map(DeliveryMethodId::from).collect();
                storage.delete_specific_method_configs(&ids).await?;
            }

            print_json(out, &storage.find_all_method_configs().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::MockCheckoutStorage;
    use crate::domain::DeliveryMethod;

    #[tokio::test]
    async fn test_list_without_zones_lists_everything() {
        let mut storage = MockCheckoutStorage::new();
        storage
            .expect_find_all_method_configs()
            .times(1)
            .returning(|| Ok(vec![DeliveryMethod::new("10", "standard_delivery")]));

        let mut out = Vec::new();
        run(&storage, MethodsCommand::List { zones: vec![] }, &mut out)
            .await
            .unwrap();

        let listed: Vec<DeliveryMethod> = serde_json::from_slice(&out).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_with_zones_queries_by_zone() {
        let mut storage = MockCheckoutStorage::new();
        storage
            .expect_find_method_in_zones()
            .withf(|zone_ids| zone_ids == [DeliveryZoneId::new("1"), DeliveryZoneId::new("2")])
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut out = Vec::new();
        run(
            &storage,
            MethodsCommand::List {
                zones: vec!["1".to_string(), "2".to_string()],
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_delete_all_also_clears_method_data() {
        let mut storage = MockCheckoutStorage::new();
        storage
            .expect_delete_all_method_configs()
            .times(1)
            .returning(|| Ok(()));
        storage
            .expect_delete_all_method_data()
            .times(1)
            .returning(|| Ok(()));
        storage
            .expect_find_all_method_configs()
            .returning(|| Ok(vec![]));

        let mut out = Vec::new();
        run(
            &storage,
            MethodsCommand::Delete {
                ids: vec![],
                all: true,
            },
            &mut out,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_delete_specific_methods() {
        let mut storage = MockCheckoutStorage::new();
        storage
            .expect_delete_specific_method_configs()
            .withf(|ids| ids == [DeliveryMethodId::new("10")])
            .times(1)
            .returning(|_| Ok(()));
        storage
            .expect_find_all_method_configs()
            .returning(|| Ok(vec![]));

        let mut out = Vec::new();
        run(
            &storage,
            MethodsCommand::Delete {
                ids: vec!["10".to_string()],
                all: false,
            },
            &mut out,
        )
        .await
        .unwrap();
    }
}
