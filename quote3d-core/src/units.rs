/// Length units and conversions between them
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Cubic millimeters in one cubic centimeter
pub const MM3_PER_CM3: f64 = 1000.0;

/// Linear length unit of a model or of a displayed measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    #[serde(alias = "mm")]
    Millimeter,
    #[serde(alias = "cm")]
    Centimeter,
    #[serde(alias = "in")]
    Inch,
}

impl LengthUnit {
    /// Factor converting a length in millimeters into this unit
    pub fn mm_factor(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 0.1,
            Self::Inch => 0.03937,
        }
    }

    /// Factor converting a length in this unit into centimeters
    pub fn cm_factor(self) -> f64 {
        match self {
            Self::Millimeter => 0.1,
            Self::Centimeter => 1.0,
            Self::Inch => 2.54,
        }
    }

    /// Factor converting a length in this unit into `target`
    pub fn length_factor(self, target: LengthUnit) -> f64 {
        match self {
            Self::Millimeter => target.mm_factor(),
            _ => self.cm_factor() / target.cm_factor(),
        }
    }

    /// Convert a volume in this unit cubed into cubic centimeters
    pub fn volume_to_cm3(self, volume: f64) -> f64 {
        match self {
            // 1000 mm³ is exactly 1 cm³
            Self::Millimeter => volume / MM3_PER_CM3,
            _ => volume * self.cm_factor().powi(3),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimetre" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimetre" => Ok(Self::Centimeter),
            "in" | "inch" | "inches" => Ok(Self::Inch),
            other => Err(Error::invalid_input(format!("unknown length unit '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mm_conversion_factors() {
        assert_eq!(LengthUnit::Millimeter.mm_factor(), 1.0);
        assert_relative_eq!(LengthUnit::Centimeter.mm_factor() * 25.0, 2.5);
        assert_relative_eq!(LengthUnit::Inch.mm_factor() * 100.0, 3.937);
    }

    #[test]
    fn test_length_factor() {
        assert_eq!(LengthUnit::Millimeter.length_factor(LengthUnit::Inch), 0.03937);
        assert_relative_eq!(LengthUnit::Inch.length_factor(LengthUnit::Millimeter), 25.4, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Centimeter.length_factor(LengthUnit::Centimeter), 1.0);
    }

    #[test]
    fn test_volume_to_cm3() {
        assert_eq!(LengthUnit::Millimeter.volume_to_cm3(1000.0), 1.0);
        assert_relative_eq!(LengthUnit::Centimeter.volume_to_cm3(7.5), 7.5);
        assert_relative_eq!(LengthUnit::Inch.volume_to_cm3(1.0), 16.387064, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("MM".parse::<LengthUnit>().unwrap(), LengthUnit::Millimeter);
        assert_eq!("inch".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_deserialize_alias() {
        let unit: LengthUnit = serde_json::from_str("\"cm\"").unwrap();
        assert_eq!(unit, LengthUnit::Centimeter);
    }
}
