//! Checkout storage capability contract

use async_trait::async_trait;

use crate::domain::delivery::{DeliveryMethod, DeliveryMethodId, DeliveryZone, DeliveryZoneId};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence operations the checkout integration needs for delivery
/// zone and delivery method configurations.
///
/// Implementations add no recovery of their own: any error raised by the
/// underlying store is returned to the caller unchanged.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CheckoutStorage: Send + Sync {
    /// Provides all delivery zone configurations
    async fn find_all_zone_configs(&self) -> Result<Vec<DeliveryZone>, DomainError>;

    /// Provides delivery zones with the specified IDs
    async fn find_zone_configs(
        &self,
        ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryZone>, DomainError>;

    /// Deletes the specified zone configurations
    async fn delete_specific_zone_configs(&self, ids: &[DeliveryZoneId]) -> Result<(), DomainError>;

    /// Deletes all saved zone configurations
    async fn delete_all_zone_configs(&self) -> Result<(), DomainError>;

    /// Creates delivery zones
    async fn create_zone_configs(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError>;

    /// Updates saved zone configurations
    async fn update_zone_configs(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError>;

    /// Provides all delivery method configurations
    async fn find_all_method_configs(&self) -> Result<Vec<DeliveryMethod>, DomainError>;

    /// Deletes methods identified by the provided IDs
    async fn delete_specific_method_configs(
        &self,
        ids: &[DeliveryMethodId],
    ) -> Result<(), DomainError>;

    /// Deletes all delivery method configurations
    async fn delete_all_method_configs(&self) -> Result<(), DomainError>;

    /// Updates saved delivery methods
    async fn update_method_configs(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError>;

    /// Creates delivery method configurations
    async fn create_method_configs(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError>;

    /// Deletes delivery method data generated by the integration itself,
    /// as opposed to the stored configurations
    async fn delete_all_method_data(&self) -> Result<(), DomainError>;

    /// Finds delivery methods offered in any of the given zones
    async fn find_method_in_zones(
        &self,
        zone_ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryMethod>, DomainError>;

    /// Deletes method configurations whose host method no longer exists
    async fn delete_obsolete_method_configs(&self) -> Result<(), DomainError>;

    /// Deletes zone configurations whose host zone no longer exists
    async fn delete_obsolete_zone_configs(&self) -> Result<(), DomainError>;
}
