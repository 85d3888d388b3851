//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Useful for testing and for hosts that rebuild their configuration on
/// start. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self.read()?.get(key.as_str()).cloned())
    }

    async fn get_many(&self, keys: &[E::Key]) -> Result<Vec<E>, DomainError> {
        let entities = self.read()?;
        let mut seen = std::collections::HashSet::with_capacity(keys.len());

        Ok(keys
            .iter()
            .map(|key| key.as_str())
            .filter(|key| seen.insert(*key))
            .filter_map(|key| entities.get(key).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create_many(&self, batch: Vec<E>) -> Result<(), DomainError> {
        if let Some(key) = crate::domain::storage::first_repeated_key(&batch) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' appears more than once in the batch",
                key
            )));
        }

        let mut entities = self.write()?;

        if let Some(existing) = batch
            .iter()
            .find(|entity| entities.contains_key(entity.key().as_str()))
        {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                existing.key().as_str()
            )));
        }

        for entity in batch {
            entities.insert(entity.key().as_str().to_string(), entity);
        }
        Ok(())
    }

    async fn update_many(&self, batch: Vec<E>) -> Result<(), DomainError> {
        let mut entities = self.write()?;

        if let Some(missing) = batch
            .iter()
            .find(|entity| !entities.contains_key(entity.key().as_str()))
        {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                missing.key().as_str()
            )));
        }

        for entity in batch {
            entities.insert(entity.key().as_str().to_string(), entity);
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[E::Key]) -> Result<usize, DomainError> {
        let mut entities = self.write()?;

        Ok(keys
            .iter()
            .filter(|key| entities.remove(key.as_str()).is_some())
            .count())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.write()?.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(key.as_str()))
    }
}
