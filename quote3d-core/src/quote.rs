/// Price estimation from material volume
use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transform::ScaleFactor;
use crate::units::MM3_PER_CM3;

/// Notice attached to every rendered quote.
///
/// Whatever renders a quote must show it; a technician confirms the real price.
pub const QUOTE_DISCLAIMER: &str =
    "This quote is only an approximate estimate and must be verified by our technicians.";

/// Result of pricing one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Volume after applying the scale factor, in cm³
    pub scaled_volume_cm3: f64,
    /// Price of a single part
    pub unit_price: f64,
    /// `unit_price * quantity`
    pub total: f64,
}

fn require_non_negative(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::invalid_input(format!("{name} must be finite (got {value})")));
    }
    if value < 0.0 {
        return Err(Error::invalid_input(format!(
            "{name} must not be negative (got {value})"
        )));
    }
    Ok(value)
}

/// Estimate the price of `quantity` parts.
///
/// Volume scales with the cube of the linear scale: a part printed at 50%
/// uses one eighth of the material.
pub fn estimate_price(
    volume_cm3: f64,
    price_per_cm3: f64,
    scale_percent: f64,
    quantity: u32,
) -> Result<PriceEstimate> {
    let volume_cm3 = require_non_negative("volume", volume_cm3)?;
    let price_per_cm3 = require_non_negative("price per cm³", price_per_cm3)?;
    let scale = ScaleFactor::from_percent(scale_percent)?;
    if quantity == 0 {
        return Err(Error::invalid_input("quantity must be at least 1"));
    }

    let scaled_volume_cm3 = volume_cm3 * scale.volumetric();
    let unit_price = scaled_volume_cm3 * price_per_cm3;
    let total = unit_price * f64::from(quantity);
    if !(scaled_volume_cm3.is_finite() && unit_price.is_finite() && total.is_finite()) {
        return Err(Error::invalid_input(format!(
            "quote out of range: {volume_cm3} cm³ at {price_per_cm3}/cm³, scale {scale_percent}%, x{quantity}"
        )));
    }

    debug!(
        "priced {scaled_volume_cm3:.3} cm³ at {price_per_cm3}/cm³ x{quantity}: {total:.2}"
    );

    Ok(PriceEstimate {
        scaled_volume_cm3,
        unit_price,
        total,
    })
}

/// Volume in cm³ of a box given its edge lengths in millimeters
pub fn volume_from_dimensions(length_mm: f64, width_mm: f64, height_mm: f64) -> Result<f64> {
    let length = require_non_negative("length", length_mm)?;
    let width = require_non_negative("width", width_mm)?;
    let height = require_non_negative("height", height_mm)?;
    Ok(length * width * height / MM3_PER_CM3)
}

/// Price per cm³ for each printable material.
///
/// Lookups ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<String, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self {
            prices: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, material: impl Into<String>, price_per_cm3: f64) {
        self.prices.insert(material.into(), price_per_cm3);
    }

    pub fn price_for(&self, material: &str) -> Result<f64> {
        self.prices
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(material.trim()))
            .map(|(_, &price)| price)
            .ok_or_else(|| Error::invalid_input(format!("unknown material '{material}'")))
    }

    pub fn materials(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.prices.iter().map(|(name, &price)| (name.as_str(), price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Reject prices that are non-finite or negative
    pub fn validate(&self) -> Result<()> {
        for (name, &price) in &self.prices {
            require_non_negative(&format!("price for {name}"), price)?;
        }
        Ok(())
    }
}

impl Default for PriceTable {
    /// Filament and powder rates in EUR per cm³
    fn default() -> Self {
        let mut table = Self::new();
        table.insert("PLA", 0.10);
        table.insert("ABS", 0.12);
        table.insert("PETG", 0.15);
        table.insert("Nylon", 0.20);
        table.insert("Carbon", 0.35);
        table.insert("PEEK", 0.50);
        table.insert("Metal", 1.00);
        table
    }
}
