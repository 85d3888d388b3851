//! Delivery configuration repository traits

use async_trait::async_trait;

use super::{DeliveryMethod, DeliveryMethodId, DeliveryZone, DeliveryZoneId};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for delivery zone configurations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeliveryZoneRepository: Send + Sync {
    /// Lists every stored zone
    async fn find_all(&self) -> Result<Vec<DeliveryZone>, DomainError>;

    /// Finds the zones with the given IDs; unknown IDs are skipped
    async fn find(&self, ids: &[DeliveryZoneId]) -> Result<Vec<DeliveryZone>, DomainError>;

    /// Stores new zones
    async fn create(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError>;

    /// Replaces existing zones
    async fn update(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError>;

    /// Deletes the zones with the given IDs
    async fn delete(&self, ids: &[DeliveryZoneId]) -> Result<(), DomainError>;

    /// Deletes every stored zone
    async fn delete_all(&self) -> Result<(), DomainError>;

    /// Deletes zones whose host shipping zone no longer exists
    async fn delete_obsolete_zone_configs(&self) -> Result<(), DomainError>;
}

/// Repository for delivery method configurations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeliveryMethodRepository: Send + Sync {
    /// Lists every stored method
    async fn find_all(&self) -> Result<Vec<DeliveryMethod>, DomainError>;

    /// Finds the methods with the given IDs; unknown IDs are skipped
    async fn find(&self, ids: &[DeliveryMethodId]) -> Result<Vec<DeliveryMethod>, DomainError>;

    /// Finds methods offered in at least one of the given zones
    async fn find_in_zones(
        &self,
        zone_ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryMethod>, DomainError>;

    /// Stores new methods
    async fn create(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError>;

    /// Replaces existing methods
    async fn update(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError>;

    /// Deletes the methods with the given IDs
    async fn delete(&self, ids: &[DeliveryMethodId]) -> Result<(), DomainError>;

    /// Deletes every stored method
    async fn delete_all(&self) -> Result<(), DomainError>;

    /// Deletes methods whose host shipping method no longer exists
    async fn delete_obsolete_method_configs(&self) -> Result<(), DomainError>;
}
