//! End-to-end behaviour of the checkout storage over the in-memory backend

use std::io::Write as _;
use std::sync::Arc;

use checkout_storage::cli::import::{self, ImportArgs};
use checkout_storage::domain::{
    CheckoutStorage, Country, DeliveryMethod, DeliveryMethodId, DeliveryZone, DeliveryZoneId,
    DomainError, Query,
};
use checkout_storage::infrastructure::delivery::InMemoryShippingCatalog;
use checkout_storage::infrastructure::storage::{DeliveryStores, InMemoryStorage};
use checkout_storage::{checkout_storage_from_stores, DefaultCheckoutStorage};

fn zone(id: &str) -> DeliveryZone {
    DeliveryZone::new(id, Country::new("DE", "Germany"))
}

fn method(id: &str, zone_id: &str) -> DeliveryMethod {
    DeliveryMethod::new(id, "standard_delivery").with_zone(zone_id)
}

fn storage_with(
    zones: Vec<DeliveryZone>,
    methods: Vec<DeliveryMethod>,
    catalog: Arc<InMemoryShippingCatalog>,
) -> DefaultCheckoutStorage {
    let stores = DeliveryStores {
        zones: Arc::new(InMemoryStorage::with_entities(zones)),
        methods: Arc::new(InMemoryStorage::with_entities(methods)),
    };

    checkout_storage_from_stores(stores, catalog)
}

fn empty_storage() -> DefaultCheckoutStorage {
    storage_with(vec![], vec![], Arc::new(InMemoryShippingCatalog::new()))
}

fn zone_ids(raw: &[&str]) -> Vec<DeliveryZoneId> {
    raw.iter().map(|id| DeliveryZoneId::new(*id)).collect()
}

#[tokio::test]
async fn find_zone_configs_returns_exactly_the_requested_zones() {
    let storage = storage_with(
        vec![zone("1"), zone("2"), zone("3")],
        vec![],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    let mut found = storage
        .find_zone_configs(&zone_ids(&["3", "1", "1", "42"]))
        .await
        .unwrap();
    found.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(found, vec![zone("1"), zone("3")]);
}

#[tokio::test]
async fn created_zones_are_listed() {
    let storage = storage_with(vec![zone("1")], vec![], Arc::new(InMemoryShippingCatalog::new()));
    let batch = vec![zone("2"), zone("3")];

    storage.create_zone_configs(batch.clone()).await.unwrap();

    let all = storage.find_all_zone_configs().await.unwrap();
    assert!(batch.iter().all(|zone| all.contains(zone)));
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn delete_all_zone_configs_empties_the_store() {
    let storage = storage_with(
        vec![zone("1"), zone("2")],
        vec![],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    storage.delete_all_zone_configs().await.unwrap();

    assert!(storage.find_all_zone_configs().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_specific_zone_configs_keeps_the_rest() {
    let storage = storage_with(
        vec![zone("1"), zone("2")],
        vec![],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    storage
        .delete_specific_zone_configs(&zone_ids(&["1"]))
        .await
        .unwrap();

    assert_eq!(storage.find_all_zone_configs().await.unwrap(), vec![zone("2")]);
}

#[tokio::test]
async fn update_zone_configs_replaces_records() {
    let storage = storage_with(vec![zone("1")], vec![], Arc::new(InMemoryShippingCatalog::new()));
    let moved = DeliveryZone::new("1", Country::new("AT", "Austria"));

    storage.update_zone_configs(vec![moved.clone()]).await.unwrap();

    assert_eq!(storage.find_all_zone_configs().await.unwrap(), vec![moved]);
}

#[tokio::test]
async fn find_method_in_zones_matches_any_zone() {
    let storage = storage_with(
        vec![zone("1"), zone("2")],
        vec![method("10", "1"), method("11", "2")],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    let found = storage.find_method_in_zones(&zone_ids(&["1"])).await.unwrap();
    assert_eq!(found, vec![method("10", "1")]);

    let none = storage.find_method_in_zones(&[]).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn method_lifecycle() {
    let storage = empty_storage();

    storage
        .create_method_configs(vec![method("10", "1"), method("11", "1")])
        .await
        .unwrap();
    storage
        .update_method_configs(vec![method("11", "1").with_carrier("dhl")])
        .await
        .unwrap();
    storage
        .delete_specific_method_configs(&[DeliveryMethodId::new("10")])
        .await
        .unwrap();

    let remaining = storage.find_all_method_configs().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].carrier_code.as_deref(), Some("dhl"));

    storage.delete_all_method_configs().await.unwrap();
    assert!(storage.find_all_method_configs().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_all_method_data_leaves_configurations_alone() {
    let storage = storage_with(
        vec![zone("1")],
        vec![method("10", "1")],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    storage.delete_all_method_data().await.unwrap();

    assert_eq!(storage.find_all_zone_configs().await.unwrap().len(), 1);
    assert_eq!(storage.find_all_method_configs().await.unwrap().len(), 1);
}

#[tokio::test]
async fn repository_errors_reach_the_caller() {
    let storage = storage_with(vec![zone("1")], vec![], Arc::new(InMemoryShippingCatalog::new()));

    let conflict = storage.create_zone_configs(vec![zone("1")]).await;
    assert!(matches!(conflict, Err(DomainError::Conflict { .. })));

    let missing = storage.update_method_configs(vec![method("99", "1")]).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn obsolete_configs_follow_the_live_catalog() {
    let catalog = Arc::new(
        InMemoryShippingCatalog::new()
            .with_zones(["4"])
            .with_methods(["flat_rate:1"]),
    );
    let storage = storage_with(
        vec![
            zone("1").with_system_id("4"),
            zone("2").with_system_id("5"),
            zone("3"),
        ],
        vec![
            method("10", "1").with_system_id("flat_rate:1"),
            method("11", "2").with_system_id("flat_rate:2"),
        ],
        catalog.clone(),
    );

    storage.delete_obsolete_zone_configs().await.unwrap();
    storage.delete_obsolete_method_configs().await.unwrap();

    let zones: Vec<String> = storage
        .find_all_zone_configs()
        .await
        .unwrap()
        .into_iter()
        .map(|zone| zone.id.to_string())
        .collect();
    assert_eq!(zones, vec!["1", "3"]);

    let methods = storage.find_all_method_configs().await.unwrap();
    assert_eq!(methods, vec![method("10", "1").with_system_id("flat_rate:1")]);

    catalog.set_zones(Vec::<String>::new()).unwrap();
    storage.delete_obsolete_zone_configs().await.unwrap();
    assert_eq!(storage.find_all_zone_configs().await.unwrap(), vec![zone("3")]);
}

#[test]
fn query_filters_zones_by_country() {
    let storage = storage_with(
        vec![
            zone("1"),
            DeliveryZone::new("2", Country::new("BE", "Belgium")),
        ],
        vec![],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    let zones = tokio_test::block_on(storage.find_all_zone_configs()).unwrap();

    let mut query = Query::new();
    query.set_country(Some("BE".to_string()));
    let belgian: Vec<_> = zones.iter().filter(|z| query.matches_zone(z)).collect();
    assert_eq!(belgian.len(), 1);

    query.set_country(None);
    assert_eq!(query.country(), None);
    assert_eq!(zones.iter().filter(|z| query.matches_zone(z)).count(), 2);
}

#[tokio::test]
async fn import_file_populates_storage() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"zones": [{{"id": "1", "country": {{"iso_2": "DE", "name": "Germany"}}}}],
            "methods": [{{"id": "10", "zone_ids": ["1"], "method_type": "standard_delivery"}}]}}"#
    )
    .unwrap();

    let storage = empty_storage();
    let mut out = Vec::new();
    import::run(
        &storage,
        ImportArgs {
            file: file.path().to_path_buf(),
        },
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(storage.find_all_zone_configs().await.unwrap(), vec![zone("1")]);
    assert_eq!(
        storage.find_method_in_zones(&zone_ids(&["1"])).await.unwrap(),
        vec![method("10", "1")]
    );
}

#[tokio::test]
async fn failed_import_can_be_retried() {
    let document = r#"{"zones": [{"id": "1", "country": {"iso_2": "DE", "name": "Germany"}}],
        "methods": [{"id": "10", "zone_ids": ["1"], "method_type": "standard_delivery"}]}"#;
    let storage = storage_with(
        vec![],
        vec![method("10", "9")],
        Arc::new(InMemoryShippingCatalog::new()),
    );

    let mut out = Vec::new();
    let first = import::import_document(&storage, serde_json::from_str(document).unwrap(), &mut out)
        .await;
    assert!(first.is_err());
    assert!(storage.find_all_zone_configs().await.unwrap().is_empty());

    storage
        .delete_specific_method_configs(&[DeliveryMethodId::new("10")])
        .await
        .unwrap();
    import::import_document(&storage, serde_json::from_str(document).unwrap(), &mut out)
        .await
        .unwrap();

    assert_eq!(storage.find_all_zone_configs().await.unwrap(), vec![zone("1")]);
    assert_eq!(storage.find_all_method_configs().await.unwrap(), vec![method("10", "1")]);
}

#[tokio::test]
async fn import_reports_unreadable_file() {
    let storage = empty_storage();
    let mut out = Vec::new();

    let result = import::run(
        &storage,
        ImportArgs {
            file: "/nonexistent/checkout-import.json".into(),
        },
        &mut out,
    )
    .await;

    assert!(result.is_err());
    assert!(storage.find_all_zone_configs().await.unwrap().is_empty());
}
