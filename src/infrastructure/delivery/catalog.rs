//! In-memory shipping catalog

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::delivery::ShippingCatalog;
use crate::domain::DomainError;

/// Shipping catalog backed by sets of host identifiers.
///
/// Embedding hosts push their current zone and method identifiers into it
/// before asking the storage to drop obsolete configurations.
#[derive(Debug, Default)]
pub struct InMemoryShippingCatalog {
    zones: RwLock<HashSet<String>>,
    methods: RwLock<HashSet<String>>,
}

impl InMemoryShippingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut zones = into_set(self.zones);
        zones.extend(ids.into_iter().map(Into::into));

        Self {
            zones: RwLock::new(zones),
            methods: self.methods,
        }
    }

    pub fn with_methods<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut methods = into_set(self.methods);
        methods.extend(ids.into_iter().map(Into::into));

        Self {
            zones: self.zones,
            methods: RwLock::new(methods),
        }
    }

    /// Replaces the live zone identifiers
    pub fn set_zones<I, S>(&self, ids: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut zones = self
            .zones
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        *zones = ids.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Replaces the live method identifiers
    pub fn set_methods<I, S>(&self, ids: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut methods = self
            .methods
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        *methods = ids.into_iter().map(Into::into).collect();
        Ok(())
    }
}

/// Takes the set out of an owned lock. No other handle exists at that
/// point, so a poisoned lock still holds a complete set.
fn into_set(lock: RwLock<HashSet<String>>) -> HashSet<String> {
    lock.into_inner().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ShippingCatalog for InMemoryShippingCatalog {
    async fn live_zone_ids(&self) -> Result<HashSet<String>, DomainError> {
        self.zones
            .read()
            .map(|zones| zones.clone())
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    async fn live_method_ids(&self) -> Result<HashSet<String>, DomainError> {
        self.methods
            .read()
            .map(|methods| methods.clone())
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }
}
