//! Storage trait definition

use std::collections::HashSet;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Generic keyed storage with batch primitives
///
/// Batch writes are all-or-nothing: when `create_many` or `update_many`
/// fails, no entity of the batch has been written.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves the entities matching `keys`, skipping unknown keys.
    /// Repeated keys yield the entity once.
    async fn get_many(&self, keys: &[E::Key]) -> Result<Vec<E>, DomainError> {
        let mut seen = HashSet::with_capacity(keys.len());
        let mut found = Vec::with_capacity(keys.len());

        for key in keys {
            if !seen.insert(key) {
                continue;
            }

            if let Some(entity) = self.get(key).await? {
                found.push(entity);
            }
        }

        Ok(found)
    }

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a batch; conflict if any key already exists or repeats in the batch
    async fn create_many(&self, entities: Vec<E>) -> Result<(), DomainError>;

    /// Replaces a batch; not found if any key is missing
    async fn update_many(&self, entities: Vec<E>) -> Result<(), DomainError>;

    /// Deletes the entities matching `keys`, returns how many were removed
    async fn delete_many(&self, keys: &[E::Key]) -> Result<usize, DomainError>;

    /// Removes every entity
    async fn clear(&self) -> Result<(), DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

/// Returns the first key that appears more than once in `entities`
pub(crate) fn first_repeated_key<E: StorageEntity>(entities: &[E]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(entities.len());

    entities
        .iter()
        .map(|entity| entity.key().as_str())
        .find(|key| !seen.insert(*key))
}
