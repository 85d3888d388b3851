//! Checkout Storage
//!
//! Persistence facade for the delivery zone and delivery method
//! configurations used by a shop's checkout integration:
//! - A `CheckoutStorage` contract forwarding to zone/method repositories
//! - In-memory and PostgreSQL backends behind a common `Storage` port
//! - Reconciliation of stored configurations against the live shipping catalog
//! - A search `Query` value for caller-side filtering

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::delivery::ShippingCatalog;
use domain::DomainError;
use infrastructure::checkout::RepositoryCheckoutStorage;
use infrastructure::delivery::{StorageDeliveryMethodRepository, StorageDeliveryZoneRepository};
use infrastructure::storage::{DeliveryStores, StorageFactory};

/// Checkout storage wired to the storage-backed repositories
pub type DefaultCheckoutStorage =
    RepositoryCheckoutStorage<StorageDeliveryZoneRepository, StorageDeliveryMethodRepository>;

/// Builds the checkout storage for the configured backend
pub async fn create_checkout_storage(
    settings: &config::StorageSettings,
    catalog: Arc<dyn ShippingCatalog>,
) -> Result<DefaultCheckoutStorage, DomainError> {
    let stores =
        StorageFactory::create_delivery_stores(&settings.storage_config()?, &settings.tables())
            .await?;

    Ok(checkout_storage_from_stores(stores, catalog))
}

/// Builds the checkout storage on top of already opened stores
pub fn checkout_storage_from_stores(
    stores: DeliveryStores,
    catalog: Arc<dyn ShippingCatalog>,
) -> DefaultCheckoutStorage {
    let zones = StorageDeliveryZoneRepository::new(stores.zones, catalog.clone());
    let methods = StorageDeliveryMethodRepository::new(stores.methods, catalog);

    RepositoryCheckoutStorage::new(Arc::new(zones), Arc::new(methods))
}
