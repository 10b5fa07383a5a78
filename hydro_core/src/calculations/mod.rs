//! # Hydraulic Calculations
//!
//! Request handling around the formula kernels. Every calculation follows the
//! same pipeline:
//!
//! 1. Resolve the formula id against the catalog (`UnknownFormula`)
//! 2. Normalize every input to base units
//! 3. Check that each catalog symbol is present and finite (`MissingParameter`, `InvalidInput`)
//! 4. Run the formula's evaluator (domain guards, result, steps, advisories)
//! 5. Append range advisories for inputs outside their typical envelope
//!
//! ## Evaluators
//!
//! - [`head_loss`] - Darcy-Weisbach and Hazen-Williams friction loss
//! - [`flow`] - Continuity equation and orifice discharge
//! - [`pump`] - Pump shaft power and motor sizing
//! - [`tank`] - Cylindrical tank volume
//! - [`water_hammer`] - Joukowsky surge pressure
//!
//! ## Example
//!
//! ```rust
//! use hydro_core::calculations::calculate;
//! use hydro_core::units::{CalculationInput, Quantity};
//!
//! let mut inputs = CalculationInput::new();
//! inputs.insert("D".to_string(), Quantity::new(3.0, "m"));
//! inputs.insert("H".to_string(), Quantity::new(4.0, "m"));
//!
//! let response = calculate("tank_volume", &inputs).unwrap();
//! assert_eq!(response.result.unit, "m³");
//! assert!((response.result.value - 28.274).abs() < 0.001);
//! ```

pub mod flow;
pub mod head_loss;
pub mod pump;
pub mod tank;
pub mod water_hammer;

use serde::Serialize;
use tracing::debug;

use crate::equations::registry::Formula;
use crate::errors::{CalcError, CalcResult};
use crate::settings::{EngineSettings, FluidProperties};
use crate::units::{to_base_units, BaseInputs, CalculationInput};

// ============================================================================
// Response Types
// ============================================================================

/// Primary result of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultValue {
    pub value: f64,
    pub unit: &'static str,
}

/// One explanatory derivation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntermediateStep {
    pub description: String,
    /// Sub-formula with the numbers substituted in
    pub formula: String,
    pub result: f64,
}

/// Whether an advisory flags a problem or suggests an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    Warning,
    Recommendation,
}

/// Machine-readable form of a warning or recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    /// Stable code, e.g. `HIGH_VELOCITY`
    pub code: &'static str,
    pub message: String,
    /// Synthesized figure the message reports, unrounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Complete answer to one `calculate` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub result: ResultValue,
    /// Inputs after normalization to base units
    pub inputs: BaseInputs,
    pub intermediate_steps: Vec<IntermediateStep>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub advisories: Vec<Advisory>,
}

impl CalculationResponse {
    /// Advisories with the given code
    pub fn advisories_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Advisory> + 'a {
        self.advisories.iter().filter(move |a| a.code == code)
    }

    pub fn has_advisory(&self, code: &str) -> bool {
        self.advisories_with_code(code).next().is_some()
    }
}

// ============================================================================
// Evaluator Plumbing
// ============================================================================

/// Output of a single evaluator before it is packaged into a response.
#[derive(Debug, Clone)]
pub struct Evaluation {
    result: ResultValue,
    steps: Vec<IntermediateStep>,
    advisories: Vec<Advisory>,
}

impl Evaluation {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self {
            result: ResultValue { value, unit },
            steps: Vec::new(),
            advisories: Vec::new(),
        }
    }

    pub fn step(&mut self, description: &str, formula: String, result: f64) {
        self.steps.push(IntermediateStep {
            description: description.to_string(),
            formula,
            result,
        });
    }

    pub fn warn(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(AdvisoryKind::Warning, code, message.into(), None);
    }

    pub fn recommend(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(AdvisoryKind::Recommendation, code, message.into(), None);
    }

    /// Recommendation that reports a computed figure
    pub fn recommend_value(&mut self, code: &'static str, message: impl Into<String>, value: f64) {
        self.push(AdvisoryKind::Recommendation, code, message.into(), Some(value));
    }

    fn push(&mut self, kind: AdvisoryKind, code: &'static str, message: String, value: Option<f64>) {
        self.advisories.push(Advisory { kind, code, message, value });
    }

    fn into_response(self, inputs: BaseInputs) -> CalculationResponse {
        let messages = |kind: AdvisoryKind| {
            self.advisories
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.message.clone())
                .collect::<Vec<_>>()
        };
        let warnings = messages(AdvisoryKind::Warning);
        let recommendations = messages(AdvisoryKind::Recommendation);

        CalculationResponse {
            result: self.result,
            inputs,
            intermediate_steps: self.steps,
            warnings,
            recommendations,
            advisories: self.advisories,
        }
    }
}

/// Normalized inputs bound to the formula that consumes them.
///
/// Construction checks that every catalog symbol is present and finite, so
/// evaluators can read values without re-checking.
#[derive(Debug)]
pub struct FormulaInputs<'a> {
    formula: Formula,
    values: &'a BaseInputs,
}

impl<'a> FormulaInputs<'a> {
    pub fn bind(formula: Formula, values: &'a BaseInputs) -> CalcResult<Self> {
        for symbol in formula.descriptor().symbols() {
            let value = values
                .get(symbol)
                .copied()
                .ok_or_else(|| CalcError::missing_parameter(formula.id(), symbol))?;
            if !value.is_finite() {
                return Err(CalcError::invalid_input(symbol, value.to_string(), "Value must be finite"));
            }
        }
        Ok(Self { formula, values })
    }

    /// Value of a symbol the formula declares
    pub fn get(&self, symbol: &str) -> CalcResult<f64> {
        self.values
            .get(symbol)
            .copied()
            .ok_or_else(|| CalcError::missing_parameter(self.formula.id(), symbol))
    }

    /// Value that must be strictly positive (divisors, diameters)
    pub fn positive(&self, symbol: &str, what: &str) -> CalcResult<f64> {
        let value = self.get(symbol)?;
        if value <= 0.0 {
            return Err(CalcError::invalid_input(symbol, value.to_string(), format!("{what} must be positive")));
        }
        Ok(value)
    }

    /// Value that must not be negative (square roots, fractional powers)
    pub fn non_negative(&self, symbol: &str, what: &str) -> CalcResult<f64> {
        let value = self.get(symbol)?;
        if value < 0.0 {
            return Err(CalcError::invalid_input(symbol, value.to_string(), format!("{what} cannot be negative")));
        }
        Ok(value)
    }

    /// Warn for every declared input outside its advisory range.
    fn range_advisories(&self, evaluation: &mut Evaluation) {
        for param in &self.formula.descriptor().parameters {
            let (Some(range), Some(value)) = (param.range, self.values.get(param.symbol)) else {
                continue;
            };
            if !range.contains(*value) {
                evaluation.warn(
                    "OUT_OF_RANGE",
                    format!(
                        "{} ({}) = {} is outside the typical range {} to {}.",
                        param.name, param.symbol, value, range.min, range.max
                    ),
                );
            }
        }
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Stateless calculation service.
///
/// Holds only immutable fluid constants, so one instance can be shared across
/// threads and called concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HydraulicCalculator {
    fluid: FluidProperties,
}

impl HydraulicCalculator {
    /// Create a calculator for a specific fluid.
    pub fn new(fluid: FluidProperties) -> CalcResult<Self> {
        fluid.validate()?;
        Ok(Self { fluid })
    }

    pub fn from_settings(settings: &EngineSettings) -> CalcResult<Self> {
        Self::new(settings.fluid)
    }

    /// Calculate a formula by its string id.
    ///
    /// # Returns
    ///
    /// * `Ok(CalculationResponse)` - Result, derivation steps and advisories
    /// * `Err(CalcError)` - Unknown id, missing symbol, or invalid value; no partial result
    pub fn calculate(&self, formula_id: &str, inputs: &CalculationInput) -> CalcResult<CalculationResponse> {
        let formula: Formula = formula_id.parse()?;
        self.evaluate(formula, inputs)
    }

    /// Calculate an already-resolved formula.
    pub fn evaluate(&self, formula: Formula, inputs: &CalculationInput) -> CalcResult<CalculationResponse> {
        debug!(formula = formula.id(), inputs = inputs.len(), "evaluating formula");

        let base = to_base_units(inputs);
        let bound = FormulaInputs::bind(formula, &base)?;

        let mut evaluation = match formula {
            Formula::DarcyWeisbach => head_loss::darcy_weisbach(&bound, &self.fluid)?,
            Formula::HazenWilliams => head_loss::hazen_williams(&bound)?,
            Formula::ContinuityEquation => flow::continuity(&bound)?,
            Formula::OrificeFlow => flow::orifice(&bound, &self.fluid)?,
            Formula::PumpPower => pump::pump_power(&bound, &self.fluid)?,
            Formula::TankVolume => tank::tank_volume(&bound)?,
            Formula::WaterHammerPressure => water_hammer::surge_pressure(&bound, &self.fluid)?,
        };
        let result = evaluation.result.value;
        if !result.is_finite() {
            return Err(CalcError::invalid_input(
                formula.id(),
                result.to_string(),
                "Inputs produce a result outside the representable range",
            ));
        }
        bound.range_advisories(&mut evaluation);

        Ok(evaluation.into_response(base))
    }
}

/// Calculate with the default (water at 20 °C) calculator.
pub fn calculate(formula_id: &str, inputs: &CalculationInput) -> CalcResult<CalculationResponse> {
    HydraulicCalculator::default().calculate(formula_id, inputs)
}

/// Build an input map from `(symbol, value, unit)` triples.
pub fn inputs_from(entries: &[(&str, f64, &str)]) -> CalculationInput {
    entries
        .iter()
        .map(|(symbol, value, unit)| (symbol.to_string(), crate::units::Quantity::new(*value, *unit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_formula_rejected_before_inputs() {
        let err = calculate("not_a_formula", &CalculationInput::new()).unwrap_err();
        assert_eq!(err, CalcError::unknown_formula("not_a_formula"));
    }

    #[test]
    fn test_missing_parameter_names_symbol() {
        let inputs = inputs_from(&[("D", 3.0, "m")]);
        let err = calculate("tank_volume", &inputs).unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("tank_volume", "H"));
    }

    #[test]
    fn test_missing_checked_in_catalog_order() {
        let err = calculate("darcy_weisbach", &CalculationInput::new()).unwrap_err();
        assert_eq!(err, CalcError::missing_parameter("darcy_weisbach", "f"));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let inputs = inputs_from(&[("D", f64::NAN, "m"), ("H", 4.0, "m")]);
        let err = calculate("tank_volume", &inputs).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let inputs = inputs_from(&[("D", 3.0, "m"), ("H", f64::INFINITY, "m")]);
        assert!(calculate("tank_volume", &inputs).is_err());
    }

    #[test]
    fn test_overflowing_result_rejected() {
        let inputs = inputs_from(&[("Q", 1e300, "m³/s"), ("H", 1e300, "m"), ("η", 0.75, "-")]);
        let err = calculate("pump_power", &inputs).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_extra_inputs_are_echoed_but_ignored() {
        let inputs = inputs_from(&[("D", 3.0, "m"), ("H", 4.0, "m"), ("note", 1.0, "ft")]);
        let response = calculate("tank_volume", &inputs).unwrap();
        assert!((response.inputs["note"] - 0.3048).abs() < 1e-12);
        assert!((response.result.value - 28.274).abs() < 0.001);
    }

    #[test]
    fn test_warnings_and_recommendations_mirror_advisories() {
        let inputs = inputs_from(&[("c", 1200.0, "m/s"), ("ΔV", 2.0, "m/s")]);
        let response = calculate("water_hammer_pressure", &inputs).unwrap();
        let warning_count = response
            .advisories
            .iter()
            .filter(|a| a.kind == AdvisoryKind::Warning)
            .count();
        assert_eq!(warning_count, response.warnings.len());
        assert_eq!(
            response.advisories.len(),
            response.warnings.len() + response.recommendations.len()
        );
    }

    #[test]
    fn test_range_advisory_appended_after_formula_warnings() {
        // V = 6 m/s is both a high-velocity warning and outside 0.1-5
        let inputs = inputs_from(&[("f", 0.02, "-"), ("L", 100.0, "m"), ("D", 0.15, "m"), ("V", 6.0, "m/s")]);
        let response = calculate("darcy_weisbach", &inputs).unwrap();
        assert_eq!(response.warnings.len(), 2);
        assert_eq!(response.warnings[0], "Velocity is high. Risk of erosion and noise.");
        assert!(response.warnings[1].starts_with("Velocity (V) = 6"));
        assert!(response.has_advisory("OUT_OF_RANGE"));
    }

    #[test]
    fn test_custom_fluid_changes_result() {
        let fluid = FluidProperties {
            density: 850.0,
            ..FluidProperties::default()
        };
        let calculator = HydraulicCalculator::new(fluid).unwrap();
        let inputs = inputs_from(&[("Q", 0.05, "m³/s"), ("H", 30.0, "m"), ("η", 0.75, "-")]);
        let oil = calculator.calculate("pump_power", &inputs).unwrap();
        let water = calculate("pump_power", &inputs).unwrap();
        assert!((oil.result.value / water.result.value - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_fluid_rejected() {
        let fluid = FluidProperties {
            kinematic_viscosity: -1.0,
            ..FluidProperties::default()
        };
        assert!(HydraulicCalculator::new(fluid).is_err());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let inputs = inputs_from(&[("D", 3.0, "m"), ("H", 4.0, "m")]);
        let json = serde_json::to_value(calculate("tank_volume", &inputs).unwrap()).unwrap();
        assert!(json.get("intermediateSteps").is_some());
        assert_eq!(json["result"]["unit"], "m³");
        assert_eq!(json["advisories"][0]["kind"], "recommendation");
    }
}
