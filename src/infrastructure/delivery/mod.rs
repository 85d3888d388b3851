//! Delivery infrastructure - repository and catalog implementations

mod catalog;
mod storage_repository;

pub use catalog::InMemoryShippingCatalog;
pub use storage_repository::{StorageDeliveryMethodRepository, StorageDeliveryZoneRepository};
