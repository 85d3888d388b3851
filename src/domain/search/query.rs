//! Delivery search query

use serde::{Deserialize, Serialize};

use crate::domain::delivery::DeliveryZone;

/// Filter criteria for searching delivery configurations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// ISO 2 country code, `None` when unconstrained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Replaces the country; `None` clears it. The value is not validated.
    pub fn set_country(&mut self, country: Option<String>) {
        self.country = country;
    }

    /// Whether `zone` satisfies the query. An unset country matches every zone.
    pub fn matches_zone(&self, zone: &DeliveryZone) -> bool {
        match &self.country {
            Some(country) => zone.country.iso_2.eq_ignore_ascii_case(country),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delivery::Country;

    #[test]
    fn test_country_defaults_to_unset() {
        let query = Query::new();
        assert_eq!(query.country(), None);
    }

    #[test]
    fn test_set_and_clear_country() {
        let mut query = Query::new();

        query.set_country(Some("DE".to_string()));
        assert_eq!(query.country(), Some("DE"));

        query.set_country(None);
        assert_eq!(query.country(), None);
    }

    #[test]
    fn test_country_is_not_validated() {
        let mut query = Query::new();
        query.set_country(Some("not-a-code".to_string()));
        assert_eq!(query.country(), Some("not-a-code"));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Query::new().with_country("NL"), Query::new().with_country("NL"));
        assert_ne!(Query::new().with_country("NL"), Query::new());
    }

    #[test]
    fn test_matches_zone() {
        let zone = DeliveryZone::new("1", Country::new("DE", "Germany"));

        assert!(Query::new().matches_zone(&zone));
        assert!(Query::new().with_country("de").matches_zone(&zone));
        assert!(!Query::new().with_country("FR").matches_zone(&zone));
    }

    #[test]
    fn test_serde_omits_unset_country() {
        assert_eq!(serde_json::to_string(&Query::new()).unwrap(), "{}");

        let query: Query = serde_json::from_str(r#"{"country":"BE"}"#).unwrap();
        assert_eq!(query.country(), Some("BE"));
    }
}
