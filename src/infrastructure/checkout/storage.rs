//! Repository-backed checkout storage

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::checkout::CheckoutStorage;
use crate::domain::delivery::{
    DeliveryMethod, DeliveryMethodId, DeliveryMethodRepository, DeliveryZone, DeliveryZoneId,
    DeliveryZoneRepository,
};
use crate::domain::DomainError;

/// Checkout storage that forwards every call to the zone and method
/// repositories and records the call payload in the log.
#[derive(Debug)]
pub struct RepositoryCheckoutStorage<Z, M>
where
    Z: DeliveryZoneRepository,
    M: DeliveryMethodRepository,
{
    zones: Arc<Z>,
    methods: Arc<M>,
}

impl<Z, M> RepositoryCheckoutStorage<Z, M>
where
    Z: DeliveryZoneRepository,
    M: DeliveryMethodRepository,
{
    pub fn new(zones: Arc<Z>, methods: Arc<M>) -> Self {
        Self { zones, methods }
    }
}

/// JSON snapshot of a log payload
fn snapshot<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| {
        DomainError::serialization(format!("Failed to serialize log payload: {}", e))
    })
}

#[async_trait]
impl<Z, M> CheckoutStorage for RepositoryCheckoutStorage<Z, M>
where
    Z: DeliveryZoneRepository,
    M: DeliveryMethodRepository,
{
    async fn find_all_zone_configs(&self) -> Result<Vec<DeliveryZone>, DomainError> {
        let zones = self.zones.find_all().await?;
        let zones_json = snapshot(&zones)?;
        info!(
            operation = "find_all_zone_configs",
            zones = %zones_json,
            "Loaded delivery zones"
        );

        Ok(zones)
    }

    async fn find_zone_configs(
        &self,
        ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryZone>, DomainError> {
        let zones = self.zones.find(ids).await?;
        let ids_json = snapshot(ids)?;
        let zones_json = snapshot(&zones)?;
        info!(
            operation = "find_zone_configs",
            ids = %ids_json,
            zones = %zones_json,
            "Loaded delivery zones"
        );

        Ok(zones)
    }

    async fn delete_specific_zone_configs(
        &self,
        ids: &[DeliveryZoneId],
    ) -> Result<(), DomainError> {
        let ids_json = snapshot(ids)?;
        info!(
            operation = "delete_specific_zone_configs",
            ids = %ids_json,
            "Deleting delivery zones"
        );
        self.zones.delete(ids).await
    }

    async fn delete_all_zone_configs(&self) -> Result<(), DomainError> {
        info!(operation = "delete_all_zone_configs", "Deleting all delivery zones");
        self.zones.delete_all().await
    }

    async fn create_zone_configs(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError> {
        let zones_json = snapshot(&zones)?;
        info!(
            operation = "create_zone_configs",
            zones = %zones_json,
            "Creating delivery zones"
        );
        self.zones.create(zones).await
    }

    async fn update_zone_configs(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError> {
        let zones_json = snapshot(&zones)?;
        info!(
            operation = "update_zone_configs",
            zones = %zones_json,
            "Updating delivery zones"
        );
        self.zones.update(zones).await
    }

    async fn find_all_method_configs(&self) -> Result<Vec<DeliveryMethod>, DomainError> {
        let methods = self.methods.find_all().await?;
        let methods_json = snapshot(&methods)?;
        info!(
            operation = "find_all_method_configs",
            methods = %methods_json,
            "Loaded delivery methods"
        );

        Ok(methods)
    }

    async fn delete_specific_method_configs(
        &self,
        ids: &[DeliveryMethodId],
    ) -> Result<(), DomainError> {
        let ids_json = snapshot(ids)?;
        info!(
            operation = "delete_specific_method_configs",
            ids = %ids_json,
            "Deleting delivery methods"
        );
        self.methods.delete(ids).await
    }

    async fn delete_all_method_configs(&self) -> Result<(), DomainError> {
        info!(operation = "delete_all_method_configs", "Deleting all delivery methods");
        self.methods.delete_all().await
    }

    async fn update_method_configs(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError> {
        let methods_json = snapshot(&methods)?;
        info!(
            operation = "update_method_configs",
            methods = %methods_json,
            "Updating delivery methods"
        );
        self.methods.update(methods).await
    }

    async fn create_method_configs(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError> {
        let methods_json = snapshot(&methods)?;
        info!(
            operation = "create_method_configs",
            methods = %methods_json,
            "Creating delivery methods"
        );
        self.methods.create(methods).await
    }

    async fn delete_all_method_data(&self) -> Result<(), DomainError> {
        // The integration keeps no method data outside the configurations.
        debug!(operation = "delete_all_method_data", "Nothing to delete");
        Ok(())
    }

    async fn find_method_in_zones(
        &self,
        zone_ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryMethod>, DomainError> {
        let methods = self.methods.find_in_zones(zone_ids).await?;
        let zone_ids_json = snapshot(zone_ids)?;
        let methods_json = snapshot(&methods)?;
        info!(
            operation = "find_method_in_zones",
            zone_ids = %zone_ids_json,
            methods = %methods_json,
            "Loaded delivery methods for zones"
        );

        Ok(methods)
    }

    async fn delete_obsolete_method_configs(&self) -> Result<(), DomainError> {
        info!(
            operation = "delete_obsolete_method_configs",
            "Deleting obsolete delivery methods"
        );
        self.methods.delete_obsolete_method_configs().await
    }

    async fn delete_obsolete_zone_configs(&self) -> Result<(), DomainError> {
        info!(
            operation = "delete_obsolete_zone_configs",
            "Deleting obsolete delivery zones"
        );
        self.zones.delete_obsolete_zone_configs().await
    }
}
