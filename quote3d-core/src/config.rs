/// Quote configuration loaded from JSON
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quote::PriceTable;
use crate::units::LengthUnit;

/// Settings that vary between deployments of the quoting widget.
///
/// ```
/// use quote3d_core::{LengthUnit, QuoteConfig};
///
/// let config = QuoteConfig::from_json_str(r#"{ "display_unit": "cm", "prices": { "PLA": 0.08 } }"#).unwrap();
/// assert_eq!(config.display_unit, LengthUnit::Centimeter);
/// assert_eq!(config.prices.price_for("pla").unwrap(), 0.08);
/// assert!(config.center_on_load);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Unit the loaded mesh coordinates are expressed in.
    ///
    /// Mesh files carry no unit; millimeters is an assumption the caller
    /// must confirm.
    pub source_unit: LengthUnit,

    /// Unit for the bounding-box extents in a quote summary
    pub display_unit: LengthUnit,

    /// Move the model's bounding-box center to the origin after loading
    pub center_on_load: bool,

    /// ISO currency code the price table is expressed in
    pub currency: String,

    /// Price per cm³ by material name
    pub prices: PriceTable,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            source_unit: LengthUnit::Millimeter,
            display_unit: LengthUnit::Millimeter,
            center_on_load: true,
            currency: "EUR".to_string(),
            prices: PriceTable::default(),
        }
    }
}

impl QuoteConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prices.is_empty() {
            return Err(Error::invalid_input("price table has no materials"));
        }
        self.prices.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.source_unit, LengthUnit::Millimeter);
        assert_eq!(config.currency, "EUR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = QuoteConfig::from_json_str("{}").unwrap();
        assert_eq!(config, QuoteConfig::default());
    }

    #[test]
    fn test_rejects_bad_json_and_prices() {
        assert!(matches!(QuoteConfig::from_json_str("{"), Err(Error::Config(_))));
        assert!(matches!(
            QuoteConfig::from_json_str(r#"{ "prices": { "PLA": -1.0 } }"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            QuoteConfig::from_json_str(r#"{ "prices": {} }"#),
            Err(Error::InvalidInput(_))
        ));
    }
}
