//! Delivery zone and delivery method entities

use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Unique identifier for a delivery zone configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryZoneId(String);

impl DeliveryZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeliveryZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeliveryZoneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeliveryZoneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl StorageKey for DeliveryZoneId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a delivery method configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryMethodId(String);

impl DeliveryMethodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeliveryMethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeliveryMethodId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeliveryMethodId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl StorageKey for DeliveryMethodId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Destination country of a delivery zone
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code
    pub iso_2: String,
    pub name: String,
}

impl Country {
    pub fn new(iso_2: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iso_2: iso_2.into(),
            name: name.into(),
        }
    }
}

/// Checkout configuration of a delivery zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: DeliveryZoneId,
    /// Identifier of the host shipping zone this configuration mirrors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default)]
    pub country: Country,
}

impl DeliveryZone {
    pub fn new(id: impl Into<DeliveryZoneId>, country: Country) -> Self {
        Self {
            id: id.into(),
            system_id: None,
            country,
        }
    }

    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }
}

impl StorageEntity for DeliveryZone {
    type Key = DeliveryZoneId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Checkout configuration of a delivery method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryMethod {
    pub id: DeliveryMethodId,
    /// Zones the method is offered in
    #[serde(default)]
    pub zone_ids: Vec<DeliveryZoneId>,
    /// Identifier of the host shipping method this configuration mirrors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default)]
    pub method_type: String,
    #[serde(default)]
    pub external_title: String,
    #[serde(default)]
    pub internal_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
}

impl DeliveryMethod {
    pub fn new(id: impl Into<DeliveryMethodId>, method_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            zone_ids: Vec::new(),
            system_id: None,
            method_type: method_type.into(),
            external_title: String::new(),
            internal_title: String::new(),
            description: None,
            carrier_code: None,
        }
    }

    pub fn with_zone(mut self, zone_id: impl Into<DeliveryZoneId>) -> Self {
        self.zone_ids.push(zone_id.into());
        self
    }

    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }

    pub fn with_titles(
        mut self,
        external_title: impl Into<String>,
        internal_title: impl Into<String>,
    ) -> Self {
        self.external_title = external_title.into();
        self.internal_title = internal_title.into();
        self
    }

    pub fn with_carrier(mut self, carrier_code: impl Into<String>) -> Self {
        self.carrier_code = Some(carrier_code.into());
        self
    }

    /// Whether the method is offered in at least one of `zone_ids`
    pub fn belongs_to_any(&self, zone_ids: &[DeliveryZoneId]) -> bool {
        self.zone_ids.iter().any(|zone_id| zone_ids.contains(zone_id))
    }
}

impl StorageEntity for DeliveryMethod {
    type Key = DeliveryMethodId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
