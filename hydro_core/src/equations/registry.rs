//! # Formula Registry
//!
//! Central catalog of every hydraulic formula the engine can evaluate. Each
//! entry carries its display equation and an ordered list of parameter
//! descriptors (symbol, accepted units, default, advisory range).
//!
//! ## Architecture
//!
//! - Type-safe formula identification via the closed [`Formula`] enum
//! - A process-wide, read-only catalog built once on first access
//! - Serialization support for JSON export (`formulas` command)
//!
//! ## Usage
//!
//! ```rust
//! use hydro_core::equations::registry::{list_formulas, Formula};
//!
//! assert_eq!(list_formulas().len(), 7);
//!
//! let formula: Formula = "tank_volume".parse().unwrap();
//! let descriptor = formula.descriptor();
//! assert_eq!(descriptor.equation, "V = π × D²/4 × H");
//! assert!(descriptor.parameter("D").is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::CalcError;
use crate::units::{CalculationInput, Quantity};

// ============================================================================
// Formula Categories
// ============================================================================

/// Categories for grouping formulas in listings and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaCategory {
    HeadLoss,
    Flow,
    Pump,
    TankSizing,
    WaterHammer,
}

impl FormulaCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::HeadLoss => "Head Loss",
            FormulaCategory::Flow => "Flow",
            FormulaCategory::Pump => "Pump",
            FormulaCategory::TankSizing => "Tank Sizing",
            FormulaCategory::WaterHammer => "Water Hammer",
        }
    }

    /// All categories in display order
    pub fn all() -> [FormulaCategory; 5] {
        [
            FormulaCategory::HeadLoss,
            FormulaCategory::Flow,
            FormulaCategory::Pump,
            FormulaCategory::TankSizing,
            FormulaCategory::WaterHammer,
        ]
    }
}

// ============================================================================
// Parameter Descriptors
// ============================================================================

/// Advisory numeric envelope, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One named quantity a formula consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Lookup key in input maps (e.g., "D", "η", "ΔV")
    pub symbol: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Accepted unit labels; conversion is driven by the label, not its position
    pub units: Vec<&'static str>,
    /// Suggested value in the first listed unit, never substituted silently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    /// Typical operating envelope, used for warnings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
}

impl ParameterDescriptor {
    fn new(
        symbol: &'static str,
        name: &'static str,
        description: &'static str,
        units: &[&'static str],
    ) -> Self {
        Self {
            symbol,
            name,
            description,
            units: units.to_vec(),
            default_value: None,
            range: None,
        }
    }

    fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ValueRange::new(min, max));
        self
    }
}

/// Identity and parameters of one supported computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: FormulaCategory,
    /// Display string, never evaluated
    pub equation: &'static str,
    pub parameters: Vec<ParameterDescriptor>,
}

impl FormulaDescriptor {
    /// Find a parameter by symbol
    pub fn parameter(&self, symbol: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.symbol == symbol)
    }

    /// Symbols in catalog order
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parameters.iter().map(|p| p.symbol)
    }

    /// Input map built from every parameter's default, in its first listed unit.
    pub fn default_inputs(&self) -> CalculationInput {
        self.parameters
            .iter()
            .filter_map(|p| {
                let value = p.default_value?;
                let unit = p.units.first()?;
                Some((p.symbol.to_string(), Quantity::new(value, *unit)))
            })
            .collect()
    }
}

// ============================================================================
// Formula Enum
// ============================================================================

/// All formulas supported by the engine.
///
/// Routing is an exhaustive match over this enum; string ids are resolved
/// once at the boundary through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    DarcyWeisbach,
    HazenWilliams,
    ContinuityEquation,
    OrificeFlow,
    PumpPower,
    TankVolume,
    WaterHammerPressure,
}

/// Every formula in catalog order
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::DarcyWeisbach,
    Formula::HazenWilliams,
    Formula::ContinuityEquation,
    Formula::OrificeFlow,
    Formula::PumpPower,
    Formula::TankVolume,
    Formula::WaterHammerPressure,
];

static CATALOG: Lazy<Vec<FormulaDescriptor>> =
    Lazy::new(|| ALL_FORMULAS.iter().map(|f| f.build_descriptor()).collect());

/// The full catalog in display order.
pub fn list_formulas() -> &'static [FormulaDescriptor] {
    &CATALOG
}

impl Formula {
    /// Stable string key
    pub fn id(&self) -> &'static str {
        match self {
            Formula::DarcyWeisbach => "darcy_weisbach",
            Formula::HazenWilliams => "hazen_williams",
            Formula::ContinuityEquation => "continuity_equation",
            Formula::OrificeFlow => "orifice_flow",
            Formula::PumpPower => "pump_power",
            Formula::TankVolume => "tank_volume",
            Formula::WaterHammerPressure => "water_hammer_pressure",
        }
    }

    /// Resolve a string id, `None` when it is not in the catalog
    pub fn from_id(id: &str) -> Option<Formula> {
        ALL_FORMULAS.iter().copied().find(|f| f.id() == id)
    }

    /// Catalog entry for this formula
    pub fn descriptor(&self) -> &'static FormulaDescriptor {
        // Discriminants follow ALL_FORMULAS order
        &CATALOG[*self as usize]
    }

    pub fn category(&self) -> FormulaCategory {
        match self {
            Formula::DarcyWeisbach | Formula::HazenWilliams => FormulaCategory::HeadLoss,
            Formula::ContinuityEquation | Formula::OrificeFlow => FormulaCategory::Flow,
            Formula::PumpPower => FormulaCategory::Pump,
            Formula::TankVolume => FormulaCategory::TankSizing,
            Formula::WaterHammerPressure => FormulaCategory::WaterHammer,
        }
    }

    /// Formulas in a category, in catalog order
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .copied()
            .filter(|f| f.category() == category)
            .collect()
    }

    fn build_descriptor(&self) -> FormulaDescriptor {
        let (name, equation, parameters) = match self {
            Formula::DarcyWeisbach => (
                "Darcy-Weisbach Head Loss",
                "hf = f × (L/D) × (V²/2g)",
                vec![
                    ParameterDescriptor::new("f", "Friction Factor", "Darcy friction factor (dimensionless)", &["-"])
                        .default_value(0.02)
                        .range(0.008, 0.1),
                    ParameterDescriptor::new("L", "Pipe Length", "Length of the pipe", &["m", "ft", "km"])
                        .default_value(100.0),
                    ParameterDescriptor::new("D", "Pipe Diameter", "Internal diameter of the pipe", &["m", "mm", "in", "ft"])
                        .default_value(0.15),
                    ParameterDescriptor::new("V", "Velocity", "Flow velocity in the pipe", &["m/s", "ft/s"])
                        .default_value(2.0)
                        .range(0.1, 5.0),
                ],
            ),
            Formula::HazenWilliams => (
                "Hazen-Williams Head Loss",
                "hf = 10.67 × L × Q^1.852 / (C^1.852 × D^4.871)",
                vec![
                    ParameterDescriptor::new("L", "Pipe Length", "Length of the pipe", &["m", "ft", "km"])
                        .default_value(100.0),
                    ParameterDescriptor::new("Q", "Flow Rate", "Volumetric flow rate", &["m³/s", "L/s", "gpm"])
                        .default_value(0.05),
                    ParameterDescriptor::new("C", "C Coefficient", "Hazen-Williams roughness coefficient", &["-"])
                        .default_value(130.0)
                        .range(80.0, 150.0),
                    ParameterDescriptor::new("D", "Pipe Diameter", "Internal diameter of the pipe", &["m", "mm", "in"])
                        .default_value(0.15),
                ],
            ),
            Formula::ContinuityEquation => (
                "Continuity Equation",
                "Q = A × V",
                vec![
                    ParameterDescriptor::new("A", "Cross-sectional Area", "Flow cross-sectional area", &["m²", "cm²", "ft²"])
                        .default_value(0.0177),
                    ParameterDescriptor::new("V", "Velocity", "Flow velocity", &["m/s", "ft/s"])
                        .default_value(2.0),
                ],
            ),
            Formula::OrificeFlow => (
                "Orifice Flow",
                "Q = Cd × A × √(2gh)",
                vec![
                    ParameterDescriptor::new("Cd", "Discharge Coefficient", "Orifice discharge coefficient", &["-"])
                        .default_value(0.62)
                        .range(0.5, 0.8),
                    ParameterDescriptor::new("A", "Orifice Area", "Area of the orifice", &["m²", "cm²", "in²"])
                        .default_value(0.005),
                    ParameterDescriptor::new("h", "Head", "Head above orifice centerline", &["m", "ft"])
                        .default_value(2.0),
                ],
            ),
            Formula::PumpPower => (
                "Pump Power",
                "P = ρgQH / η",
                vec![
                    ParameterDescriptor::new("Q", "Flow Rate", "Volumetric flow rate", &["m³/s", "L/s", "gpm"])
                        .default_value(0.05),
                    ParameterDescriptor::new("H", "Total Head", "Total dynamic head", &["m", "ft"])
                        .default_value(30.0),
                    ParameterDescriptor::new("η", "Efficiency", "Overall pump efficiency (0-1)", &["-"])
                        .default_value(0.75)
                        .range(0.4, 0.9),
                ],
            ),
            Formula::TankVolume => (
                "Cylindrical Tank Volume",
                "V = π × D²/4 × H",
                vec![
                    ParameterDescriptor::new("D", "Tank Diameter", "Internal diameter of the tank", &["m", "ft"])
                        .default_value(3.0),
                    ParameterDescriptor::new("H", "Tank Height", "Height of water in tank", &["m", "ft"])
                        .default_value(4.0),
                ],
            ),
            Formula::WaterHammerPressure => (
                "Water Hammer Pressure",
                "ΔP = ρ × c × ΔV",
                vec![
                    ParameterDescriptor::new("c", "Wave Speed", "Pressure wave speed in pipe", &["m/s", "ft/s"])
                        .default_value(1200.0)
                        .range(900.0, 1400.0),
                    ParameterDescriptor::new("ΔV", "Velocity Change", "Change in flow velocity", &["m/s", "ft/s"])
                        .default_value(2.0),
                ],
            ),
        };

        FormulaDescriptor {
            id: self.id(),
            name,
            category: self.category(),
            equation,
            parameters,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Formula {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::from_id(s).ok_or_else(|| CalcError::unknown_formula(s))
    }
}

// ============================================================================
// Documentation Generation
// ============================================================================

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Generate a markdown reference of the whole catalog.
///
/// ```rust
/// use hydro_core::equations::registry::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("Hydrocalc Formula Reference"));
/// assert!(markdown.contains("## Water Hammer"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Hydrocalc Formula Reference

> **Auto-generated from the formula registry. Do not edit manually.**
>
> Regenerate with: `hydro docs > FORMULAS.md`

All inputs are normalized to SI before evaluation (m, m², m/s, m³/s).
Defaults are given in the first listed unit. Ranges are advisory and only
produce warnings.

---

"#,
    );

    let categories = FormulaCategory::all();
    for category in &categories {
        let formulas = Formula::in_category(*category);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in formulas {
            let descriptor = formula.descriptor();
            output.push_str(&format!("### {}\n\n", descriptor.name));
            output.push_str(&format!("**ID:** `{}`\n\n", descriptor.id));
            output.push_str(&format!("**Equation:** `{}`\n\n", descriptor.equation));

            output.push_str("| Symbol | Name | Units | Default | Range |\n");
            output.push_str("|--------|------|-------|---------|-------|\n");
            for param in &descriptor.parameters {
                let range = param
                    .range
                    .map(|r| format!("{} – {}", r.min, r.max))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    param.symbol,
                    param.name,
                    param.units.join(", "),
                    format_optional(param.default_value),
                    range
                ));
            }
            output.push_str("\n---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        categories.len()
    ));

    output
}
