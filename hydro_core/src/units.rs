//! # Unit Normalization
//!
//! Converts caller-supplied `(value, unit)` pairs into the single base system
//! every evaluator works in.
//!
//! ## Base System (SI)
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Velocity: meters per second (m/s)
//! - Flow rate: cubic meters per second (m³/s)
//! - Dimensionless coefficients: `-`
//!
//! ## Lookup Rules
//!
//! The table is flat and context-free: a unit label always applies the same
//! factor no matter which parameter it is attached to, so `ft` is 0.3048
//! whether it describes a length or the length part of a speed. Labels that
//! are not in the table (including the base labels themselves) pass the value
//! through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use hydro_core::units::{to_base, from_base};
//!
//! let meters = to_base(100.0, "ft");
//! assert!((meters - 30.48).abs() < 1e-12);
//! assert!((from_base(meters, "ft") - 100.0).abs() < 1e-9);
//!
//! // Unrecognized labels are treated as already-base
//! assert_eq!(to_base(42.0, "furlongs"), 42.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A raw caller value with its unit label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self { value, unit: unit.into() }
    }
}

/// Caller-supplied inputs keyed by parameter symbol.
pub type CalculationInput = BTreeMap<String, Quantity>;

/// Normalized inputs keyed by parameter symbol, all in base units.
pub type BaseInputs = BTreeMap<String, f64>;

// ============================================================================
// Conversion Table
// ============================================================================

/// A single conversion step into the base system.
///
/// Multiplication and division are kept distinct so that `mm ÷ 1000` is not
/// silently rewritten as `× 0.001`, which rounds differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Multiply(f64),
    Divide(f64),
}

impl Conversion {
    /// Look up the conversion for a unit label, `None` if the label is base or unknown.
    pub fn for_unit(unit: &str) -> Option<Conversion> {
        let conversion = match unit {
            // Length
            "ft" => Conversion::Multiply(0.3048),
            "km" => Conversion::Multiply(1000.0),
            "mm" => Conversion::Divide(1000.0),
            "in" => Conversion::Multiply(0.0254),
            "cm" => Conversion::Divide(100.0),

            // Area
            "cm²" => Conversion::Divide(10000.0),
            "ft²" => Conversion::Multiply(0.092903),
            "in²" => Conversion::Multiply(0.00064516),

            // Flow rate
            "L/s" => Conversion::Divide(1000.0),
            "gpm" => Conversion::Multiply(0.00006309),

            // Velocity
            "ft/s" => Conversion::Multiply(0.3048),

            _ => return None,
        };
        Some(conversion)
    }

    /// Apply the conversion (unit -> base)
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Conversion::Multiply(factor) => value * factor,
            Conversion::Divide(factor) => value / factor,
        }
    }

    /// Apply the inverse conversion (base -> unit)
    #[inline]
    pub fn invert(self, value: f64) -> f64 {
        match self {
            Conversion::Multiply(factor) => value / factor,
            Conversion::Divide(factor) => value * factor,
        }
    }
}

/// Every unit label the converter knows about, in table order.
pub const RECOGNIZED_UNITS: &[&str] = &[
    "ft", "km", "mm", "in", "cm", "cm²", "ft²", "in²", "L/s", "gpm", "ft/s",
];

/// Whether the label has an entry in the conversion table.
pub fn is_recognized(unit: &str) -> bool {
    Conversion::for_unit(unit).is_some()
}

/// Convert a single value into base units.
pub fn to_base(value: f64, unit: &str) -> f64 {
    match Conversion::for_unit(unit) {
        Some(conversion) => conversion.apply(value),
        None => value,
    }
}

/// Convert a base value back into the given unit.
pub fn from_base(value: f64, unit: &str) -> f64 {
    match Conversion::for_unit(unit) {
        Some(conversion) => conversion.invert(value),
        None => value,
    }
}

/// Normalize a full input map into base units.
pub fn to_base_units(inputs: &CalculationInput) -> BaseInputs {
    inputs
        .iter()
        .map(|(symbol, quantity)| {
            let base = match Conversion::for_unit(&quantity.unit) {
                Some(conversion) => {
                    let converted = conversion.apply(quantity.value);
                    trace!(symbol = %symbol, unit = %quantity.unit, from = quantity.value, to = converted, "converted to base");
                    converted
                }
                None => {
                    debug!(symbol = %symbol, unit = %quantity.unit, "unit passed through as base");
                    quantity.value
                }
            };
            (symbol.clone(), base)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        assert!((to_base(1.0, "ft") - 0.3048).abs() < 1e-12);
        assert_eq!(to_base(2.5, "km"), 2500.0);
        assert_eq!(to_base(150.0, "mm"), 0.15);
        assert!((to_base(6.0, "in") - 0.1524).abs() < 1e-12);
        assert_eq!(to_base(15.0, "cm"), 0.15);
    }

    #[test]
    fn test_area_and_flow_conversions() {
        assert_eq!(to_base(50.0, "cm²"), 0.005);
        assert!((to_base(1.0, "ft²") - 0.092903).abs() < 1e-12);
        assert!((to_base(10.0, "in²") - 0.0064516).abs() < 1e-12);
        assert_eq!(to_base(50.0, "L/s"), 0.05);
        assert!((to_base(1000.0, "gpm") - 0.06309).abs() < 1e-12);
    }

    #[test]
    fn test_ft_is_context_free() {
        // `ft` and `ft/s` share the same factor; the label alone decides
        assert_eq!(to_base(10.0, "ft"), to_base(10.0, "ft/s"));
    }

    #[test]
    fn test_base_labels_pass_through() {
        for unit in ["m", "m/s", "m²", "m³/s", "-"] {
            assert!(!is_recognized(unit));
            assert_eq!(to_base(1.234, unit), 1.234);
        }
    }

    #[test]
    fn test_unrecognized_unit_is_permissive() {
        // Intentional: unknown labels are not an error, the value is used as-is
        assert_eq!(to_base(7.0, "yards"), 7.0);
        assert_eq!(to_base(7.0, "FT"), 7.0);
    }

    #[test]
    fn test_recognized_units_table_matches_lookup() {
        for unit in RECOGNIZED_UNITS {
            assert!(is_recognized(unit), "{unit} should be recognized");
        }
    }

    #[test]
    fn test_round_trip_100_ft() {
        let meters = to_base(100.0, "ft");
        assert!((from_base(meters, "ft") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_base_units_map() {
        let mut inputs = CalculationInput::new();
        inputs.insert("L".to_string(), Quantity::new(1.0, "km"));
        inputs.insert("D".to_string(), Quantity::new(150.0, "mm"));
        inputs.insert("f".to_string(), Quantity::new(0.02, "-"));

        let base = to_base_units(&inputs);
        assert_eq!(base.len(), 3);
        assert_eq!(base["L"], 1000.0);
        assert_eq!(base["D"], 0.15);
        assert_eq!(base["f"], 0.02);
    }
}
