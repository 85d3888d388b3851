//! Storage factory for runtime backend selection

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::domain::delivery::{DeliveryMethod, DeliveryZone};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{connect_pool, PostgresConfig, PostgresStorage};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }
}

/// Table names for the delivery configuration stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTables {
    pub zones: String,
    pub methods: String,
}

impl Default for DeliveryTables {
    fn default() -> Self {
        Self {
            zones: "checkout_delivery_zones".to_string(),
            methods: "checkout_delivery_methods".to_string(),
        }
    }
}

impl DeliveryTables {
    /// Zones and methods need separate tables, rows of one cannot decode as the other
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.zones == self.methods {
            return Err(DomainError::configuration(format!(
                "Zones and methods cannot share the table '{}'",
                self.zones
            )));
        }
        Ok(())
    }
}

/// Backing stores for zone and method configurations
#[derive(Debug, Clone)]
pub struct DeliveryStores {
    pub zones: Arc<dyn Storage<DeliveryZone>>,
    pub methods: Arc<dyn Storage<DeliveryMethod>>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the zone and method stores for the configured backend.
    /// PostgreSQL stores share one connection pool.
    pub async fn create_delivery_stores(
        config: &StorageConfig,
        tables: &DeliveryTables,
    ) -> Result<DeliveryStores, DomainError> {
        tables.validate()?;

        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory checkout storage");

                Ok(DeliveryStores {
                    zones: Self::create_in_memory::<DeliveryZone>(),
                    methods: Self::create_in_memory::<DeliveryMethod>(),
                })
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    zones_table = %tables.zones,
                    methods_table = %tables.methods,
                    "Using PostgreSQL checkout storage"
                );

                let pool = connect_pool(pg_config).await?;

                let zones = PostgresStorage::<DeliveryZone>::new(pool.clone(), &tables.zones)?;
                zones.ensure_table().await?;

                let methods = PostgresStorage::<DeliveryMethod>::new(pool, &tables.methods)?;
                methods.ensure_table().await?;

                Ok(DeliveryStores {
                    zones: Arc::new(zones),
                    methods: Arc::new(methods),
                })
            }
        }
    }

    /// Creates an in-memory storage
    pub fn create_in_memory<E>() -> Arc<InMemoryStorage<E>>
    where
        E: crate::domain::storage::StorageEntity,
    {
        Arc::new(InMemoryStorage::new())
    }
}
