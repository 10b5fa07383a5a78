//! # Flow Rate
//!
//! Continuity (Q = A·V) and free-discharge orifice flow (Q = Cd·A·√(2gh)).

use crate::calculations::{Evaluation, FormulaInputs};
use crate::equations::hydraulics::{continuity_flow, equivalent_diameter, orifice_discharge, torricelli_velocity};
use crate::errors::CalcResult;
use crate::settings::FluidProperties;

/// Velocity below which water may stagnate (m/s)
pub const STAGNATION_VELOCITY: f64 = 0.3;

/// Velocity above which the pipe pressure rating needs checking (m/s)
pub const RATING_VELOCITY: f64 = 5.0;

/// Head below which orifice coefficients lose accuracy (m)
pub const LOW_ORIFICE_HEAD: f64 = 0.1;

/// Cd below which the orifice edge is likely not sharp
pub const SHARP_EDGE_CD: f64 = 0.6;

pub fn continuity(inputs: &FormulaInputs<'_>) -> CalcResult<Evaluation> {
    let a = inputs.non_negative("A", "Cross-sectional area")?;
    let v = inputs.get("V")?;

    let q = continuity_flow(a, v);
    let d_equiv = equivalent_diameter(a);

    let mut eval = Evaluation::new(q, "m³/s");
    eval.step("Calculate flow rate", format!("Q = A×V = {a}×{v}"), q);
    eval.step(
        "Calculate equivalent diameter",
        format!("D = √(4A/π) = √(4×{a}/π)"),
        d_equiv,
    );

    if v < STAGNATION_VELOCITY {
        eval.warn("STAGNATION", "Very low velocity - check for stagnation.");
    } else if v > RATING_VELOCITY {
        eval.warn("PIPE_RATING", "Very high velocity - check pipe rating.");
    }

    Ok(eval)
}

pub fn orifice(inputs: &FormulaInputs<'_>, fluid: &FluidProperties) -> CalcResult<Evaluation> {
    let cd = inputs.non_negative("Cd", "Discharge coefficient")?;
    let a = inputs.non_negative("A", "Orifice area")?;
    let h = inputs.non_negative("h", "Head")?;
    let g = fluid.gravity;

    let q = orifice_discharge(cd, a, h, g);
    let v = torricelli_velocity(h, g);

    let mut eval = Evaluation::new(q, "m³/s");
    eval.step(
        "Calculate theoretical velocity",
        format!("V = √(2gh) = √(2×{g}×{h})"),
        v,
    );
    eval.step("Calculate theoretical flow", format!("Q_theo = A×V = {a}×{v}"), a * v);

    if h < LOW_ORIFICE_HEAD {
        eval.warn("LOW_HEAD", "Very low head - results may be inaccurate.");
    }

    if cd < SHARP_EDGE_CD {
        eval.recommend("LOW_DISCHARGE_COEFFICIENT", "Low discharge coefficient - check for sharp edges.");
    }

    Ok(eval)
}

#[cfg(test)]
mod tests {
    use crate::calculations::{calculate, inputs_from};

    #[test]
    fn test_continuity_defaults() {
        let inputs = inputs_from(&[("A", 0.0177, "m²"), ("V", 2.0, "m/s")]);
        let response = calculate("continuity_equation", &inputs).unwrap();
        assert!((response.result.value - 0.0354).abs() < 1e-12);
        assert_eq!(response.result.unit, "m³/s");
        // Equivalent diameter of 0.0177 m² is ~150 mm
        assert!((response.intermediate_steps[1].result - 0.1501).abs() < 0.0001);
        assert!(response.warnings.is_empty());
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_continuity_area_units() {
        let inputs = inputs_from(&[("A", 177.0, "cm²"), ("V", 2.0, "m/s")]);
        let response = calculate("continuity_equation", &inputs).unwrap();
        assert!((response.result.value - 0.0354).abs() < 1e-12);
    }

    #[test]
    fn test_continuity_velocity_band() {
        let slow = calculate("continuity_equation", &inputs_from(&[("A", 0.01, "m²"), ("V", 0.2, "m/s")])).unwrap();
        assert_eq!(slow.warnings, vec!["Very low velocity - check for stagnation."]);

        let fast = calculate("continuity_equation", &inputs_from(&[("A", 0.01, "m²"), ("V", 6.0, "m/s")])).unwrap();
        assert_eq!(fast.warnings, vec!["Very high velocity - check pipe rating."]);
    }

    #[test]
    fn test_orifice_defaults() {
        let inputs = inputs_from(&[("Cd", 0.62, "-"), ("A", 0.005, "m²"), ("h", 2.0, "m")]);
        let response = calculate("orifice_flow", &inputs).unwrap();
        // Q = 0.62 × 0.005 × 6.2642
        assert!((response.result.value - 0.019419).abs() < 1e-6);
        assert!((response.intermediate_steps[0].result - 6.2642).abs() < 1e-4);
        assert!((response.intermediate_steps[1].result - 0.031321).abs() < 1e-6);
        assert!(response.warnings.is_empty());
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_orifice_low_head_and_blunt_edge() {
        let inputs = inputs_from(&[("Cd", 0.55, "-"), ("A", 50.0, "cm²"), ("h", 0.05, "m")]);
        let response = calculate("orifice_flow", &inputs).unwrap();
        assert_eq!(response.warnings, vec!["Very low head - results may be inaccurate."]);
        assert_eq!(response.recommendations, vec!["Low discharge coefficient - check for sharp edges."]);
    }

    #[test]
    fn test_orifice_negative_head_rejected() {
        let inputs = inputs_from(&[("Cd", 0.62, "-"), ("A", 0.005, "m²"), ("h", -1.0, "m")]);
        let err = calculate("orifice_flow", &inputs).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("Head cannot be negative"));
    }
}
