//! Storage-backed delivery configuration repositories

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::delivery::{
    is_obsolete, DeliveryMethod, DeliveryMethodId, DeliveryMethodRepository, DeliveryZone,
    DeliveryZoneId, DeliveryZoneRepository, ShippingCatalog,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of DeliveryZoneRepository
pub struct StorageDeliveryZoneRepository {
    storage: Arc<dyn Storage<DeliveryZone>>,
    catalog: Arc<dyn ShippingCatalog>,
}

impl StorageDeliveryZoneRepository {
    pub fn new(
        storage: Arc<dyn Storage<DeliveryZone>>,
        catalog: Arc<dyn ShippingCatalog>,
    ) -> Self {
        Self { storage, catalog }
    }
}

#[async_trait]
impl DeliveryZoneRepository for StorageDeliveryZoneRepository {
    async fn find_all(&self) -> Result<Vec<DeliveryZone>, DomainError> {
        let mut zones = self.storage.list().await?;
        zones.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(zones)
    }

    async fn find(&self, ids: &[DeliveryZoneId]) -> Result<Vec<DeliveryZone>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.storage.get_many(ids).await
    }

    async fn create(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError> {
        if zones.is_empty() {
            return Ok(());
        }

        self.storage.create_many(zones).await
    }

    async fn update(&self, zones: Vec<DeliveryZone>) -> Result<(), DomainError> {
        if zones.is_empty() {
            return Ok(());
        }

        self.storage.update_many(zones).await
    }

    async fn delete(&self, ids: &[DeliveryZoneId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }

        let removed = self.storage.delete_many(ids).await?;
        debug!(requested = ids.len(), removed, "Deleted delivery zones");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        self.storage.clear().await
    }

    async fn delete_obsolete_zone_configs(&self) -> Result<(), DomainError> {
        let live = self.catalog.live_zone_ids().await?;

        let obsolete: Vec<DeliveryZoneId> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|zone| is_obsolete(zone.system_id.as_deref(), &live))
            .map(|zone| zone.id)
            .collect();

        if obsolete.is_empty() {
            return Ok(());
        }

        let removed = self.storage.delete_many(&obsolete).await?;
        debug!(removed, "Deleted obsolete delivery zones");
        Ok(())
    }
}

/// Storage-backed implementation of DeliveryMethodRepository
pub struct StorageDeliveryMethodRepository {
    storage: Arc<dyn Storage<DeliveryMethod>>,
    catalog: Arc<dyn ShippingCatalog>,
}

impl StorageDeliveryMethodRepository {
    pub fn new(
        storage: Arc<dyn Storage<DeliveryMethod>>,
        catalog: Arc<dyn ShippingCatalog>,
    ) -> Self {
        Self { storage, catalog }
    }
}

#[async_trait]
impl DeliveryMethodRepository for StorageDeliveryMethodRepository {
    async fn find_all(&self) -> Result<Vec<DeliveryMethod>, DomainError> {
        let mut methods = self.storage.list().await?;
        methods.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(methods)
    }

    async fn find(&self, ids: &[DeliveryMethodId]) -> Result<Vec<DeliveryMethod>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.storage.get_many(ids).await
    }

    async fn find_in_zones(
        &self,
        zone_ids: &[DeliveryZoneId],
    ) -> Result<Vec<DeliveryMethod>, DomainError> {
        if zone_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut methods: Vec<DeliveryMethod> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|method| method.belongs_to_any(zone_ids))
            .collect();

        methods.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(methods)
    }

    async fn create(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError> {
        if methods.is_empty() {
            return Ok(());
        }

        self.storage.create_many(methods).await
    }

    async fn update(&self, methods: Vec<DeliveryMethod>) -> Result<(), DomainError> {
        if methods.is_empty() {
            return Ok(());
        }

        self.storage.update_many(methods).await
    }

    async fn delete(&self, ids: &[DeliveryMethodId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }

        let removed = self.storage.delete_many(ids).await?;
        debug!(requested = ids.len(), removed, "Deleted delivery methods");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        self.storage.clear().await
    }

    async fn delete_obsolete_method_configs(&self) -> Result<(), DomainError> {
        let live = self.catalog.live_method_ids().await?;

        let obsolete: Vec<DeliveryMethodId> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|method| is_obsolete(method.system_id.as_deref(), &live))
            .map(|method| method.id)
            .collect();

        if obsolete.is_empty() {
            return Ok(());
        }

        let removed = self.storage.delete_many(&obsolete).await?;
        debug!(removed, "Deleted obsolete delivery methods");
        Ok(())
    }
}
