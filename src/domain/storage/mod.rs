//! Storage domain - keyed persistence abstraction shared by the delivery repositories

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;
pub(crate) use repository::first_repeated_key;

#[cfg(test)]
pub use repository::mock;
