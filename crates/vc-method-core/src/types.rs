use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VcMethodError;

/// Monetary amounts in the single reference currency unit.
pub type Money = f64;

/// Rates expressed as fractions (0.45 = 45%).
pub type Rate = f64;

/// Dimensionless multiples (e.g. 6.0x revenue).
pub type Multiple = f64;

/// Scalar a raw monetary input is expressed in.
///
/// Converting into the reference currency is a plain multiplication; there is
/// no exchange-rate concept here. Deserialization accepts the same aliases as
/// [`FromStr`]; serialization always writes the canonical snake_case name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum UnitScale {
    Ones,
    Thousands,
    #[default]
    Millions,
}

impl UnitScale {
    pub fn multiplier(self) -> f64 {
        match self {
            UnitScale::Ones => 1.0,
            UnitScale::Thousands => 1_000.0,
            UnitScale::Millions => 1_000_000.0,
        }
    }

    /// Convert an amount expressed in this unit into the reference currency.
    pub fn apply(self, amount: f64) -> Money {
        amount * self.multiplier()
    }
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitScale::Ones => "ones",
            UnitScale::Thousands => "thousands",
            UnitScale::Millions => "millions",
        };
        f.write_str(s)
    }
}

impl FromStr for UnitScale {
    type Err = VcMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ones" | "units" | "1" => Ok(UnitScale::Ones),
            "thousands" | "k" | "1e3" => Ok(UnitScale::Thousands),
            "millions" | "m" | "mm" | "1e6" => Ok(UnitScale::Millions),
            other => Err(VcMethodError::InvalidInput {
                field: "unit".into(),
                reason: format!("unknown unit scale '{other}' (expected ones, thousands or millions)"),
            }),
        }
    }
}

impl TryFrom<String> for UnitScale {
    type Error = VcMethodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64_ieee754".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_multipliers() {
        assert_eq!(UnitScale::Ones.multiplier(), 1.0);
        assert_eq!(UnitScale::Thousands.multiplier(), 1_000.0);
        assert_eq!(UnitScale::Millions.multiplier(), 1_000_000.0);
        assert_eq!(UnitScale::Thousands.apply(2.5), 2_500.0);
    }

    #[test]
    fn test_unit_scale_parse_aliases() {
        assert_eq!("Millions".parse::<UnitScale>().unwrap(), UnitScale::Millions);
        assert_eq!("mm".parse::<UnitScale>().unwrap(), UnitScale::Millions);
        assert_eq!(" k ".parse::<UnitScale>().unwrap(), UnitScale::Thousands);
        assert_eq!("units".parse::<UnitScale>().unwrap(), UnitScale::Ones);
    }

    #[test]
    fn test_unit_scale_parse_rejects_unknown() {
        let err = "billions".parse::<UnitScale>().unwrap_err();
        assert!(matches!(err, VcMethodError::InvalidInput { .. }));
        assert!(err.to_string().contains("billions"));
    }

    #[test]
    fn test_unit_scale_serde_names() {
        let json = serde_json::to_string(&UnitScale::Thousands).unwrap();
        assert_eq!(json, "\"thousands\"");
        let back: UnitScale = serde_json::from_str("\"ones\"").unwrap();
        assert_eq!(back, UnitScale::Ones);
        assert_eq!(UnitScale::Millions.to_string(), "millions");
    }
}
