//! Live shipping catalog port
//!
//! The host shop system owns the shipping zones and methods that checkout
//! configurations mirror. Repositories consult the catalog to find
//! configurations whose host entity has been removed.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of truth for the host entities that currently exist
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ShippingCatalog: Send + Sync {
    /// Host identifiers of the shipping zones that still exist
    async fn live_zone_ids(&self) -> Result<HashSet<String>, DomainError>;

    /// Host identifiers of the shipping methods that still exist
    async fn live_method_ids(&self) -> Result<HashSet<String>, DomainError>;
}

/// Whether a configuration bound to `system_id` lost its host entity.
/// Unbound configurations are never obsolete.
pub fn is_obsolete(system_id: Option<&str>, live: &HashSet<String>) -> bool {
    system_id.is_some_and(|id| !live.contains(id))
}
