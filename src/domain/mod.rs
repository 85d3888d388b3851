//! Domain layer - checkout delivery configuration model and ports

pub mod checkout;
pub mod delivery;
pub mod error;
pub mod search;
pub mod storage;

pub use checkout::CheckoutStorage;
pub use delivery::{
    Country, DeliveryMethod, DeliveryMethodId, DeliveryMethodRepository, DeliveryZone,
    DeliveryZoneId, DeliveryZoneRepository, ShippingCatalog,
};
pub use error::DomainError;
pub use search::Query;
pub use storage::{Storage, StorageEntity, StorageKey};
