//! # Water Hammer
//!
//! Instantaneous surge pressure from a sudden velocity change (Joukowsky),
//! reported in bar.
//!
//! The critical pipe length recommendation assumes a fixed valve closure time
//! of [`VALVE_CLOSURE_S`]: for pipes longer than `c·t` the closure counts as
//! rapid and the full Joukowsky surge develops.

use crate::calculations::{Evaluation, FormulaInputs};
use crate::equations::hydraulics::{critical_pipe_length, joukowsky_pressure, pressure_head, PA_PER_BAR};
use crate::errors::CalcResult;
use crate::settings::FluidProperties;

/// Surge above which pipe damage is likely (bar)
pub const SURGE_DAMAGE_BAR: f64 = 10.0;

/// Velocity change above which slow-closing valves are advised (m/s)
pub const LARGE_VELOCITY_CHANGE: f64 = 1.0;

/// Assumed valve closure time (s)
pub const VALVE_CLOSURE_S: f64 = 2.0;

pub fn surge_pressure(inputs: &FormulaInputs<'_>, fluid: &FluidProperties) -> CalcResult<Evaluation> {
    let c = inputs.non_negative("c", "Wave speed")?;
    let dv = inputs.get("ΔV")?;
    let rho = fluid.density;
    let g = fluid.gravity;

    let dp = joukowsky_pressure(rho, c, dv);
    let dp_bar = dp / PA_PER_BAR;
    let dh = pressure_head(dp, rho, g);

    let mut eval = Evaluation::new(dp_bar, "bar");
    eval.step(
        "Calculate pressure rise in Pa",
        format!("ΔP = ρ×c×ΔV = {rho}×{c}×{dv}"),
        dp,
    );
    eval.step("Convert to bar", format!("ΔP = {dp}/100000"), dp_bar);
    eval.step(
        "Calculate head rise",
        format!("ΔH = ΔP/(ρg) = {dp}/({rho}×{g})"),
        dh,
    );

    if dp_bar > SURGE_DAMAGE_BAR {
        eval.warn("SURGE_DAMAGE", "High pressure surge - risk of pipe damage!");
        eval.recommend("SURGE_PROTECTION", "Consider installing surge protection devices.");
    }

    if dv > LARGE_VELOCITY_CHANGE {
        eval.recommend("SLOW_CLOSING_VALVES", "Large velocity change - use slow-closing valves.");
    }

    let l_critical = critical_pipe_length(c, VALVE_CLOSURE_S);
    eval.recommend_value(
        "CRITICAL_PIPE_LENGTH",
        format!("Critical pipe length: {l_critical:.0} m"),
        l_critical,
    );

    Ok(eval)
}

#[cfg(test)]
mod tests {
    use crate::calculations::{calculate, inputs_from};

    #[test]
    fn test_water_hammer_reference_case() {
        let inputs = inputs_from(&[("c", 1200.0, "m/s"), ("ΔV", 2.0, "m/s")]);
        let response = calculate("water_hammer_pressure", &inputs).unwrap();

        assert_eq!(response.intermediate_steps[0].result, 2_400_000.0);
        assert_eq!(response.result.value, 24.0);
        assert_eq!(response.result.unit, "bar");
        assert!((response.intermediate_steps[2].result - 244.648).abs() < 0.001);

        assert_eq!(response.warnings, vec!["High pressure surge - risk of pipe damage!"]);
        assert_eq!(
            response.recommendations,
            vec![
                "Consider installing surge protection devices.",
                "Large velocity change - use slow-closing valves.",
                "Critical pipe length: 2400 m",
            ]
        );
    }

    #[test]
    fn test_water_hammer_gentle_change() {
        // 1000 × 1000 × 0.5 = 5 bar: no surge warning, no valve advice
        let inputs = inputs_from(&[("c", 1000.0, "m/s"), ("ΔV", 0.5, "m/s")]);
        let response = calculate("water_hammer_pressure", &inputs).unwrap();
        assert_eq!(response.result.value, 5.0);
        assert!(response.warnings.is_empty());
        assert_eq!(response.recommendations, vec!["Critical pipe length: 2000 m"]);
    }

    #[test]
    fn test_water_hammer_step_text() {
        let inputs = inputs_from(&[("c", 1200.0, "m/s"), ("ΔV", 2.0, "m/s")]);
        let response = calculate("water_hammer_pressure", &inputs).unwrap();
        assert_eq!(response.intermediate_steps[0].formula, "ΔP = ρ×c×ΔV = 1000×1200×2");
        assert_eq!(response.intermediate_steps[1].formula, "ΔP = 2400000/100000");
    }

    #[test]
    fn test_wave_speed_outside_range_warns() {
        let inputs = inputs_from(&[("c", 400.0, "m/s"), ("ΔV", 0.5, "m/s")]);
        let response = calculate("water_hammer_pressure", &inputs).unwrap();
        assert_eq!(response.warnings.len(), 1);
        assert!(response.has_advisory("OUT_OF_RANGE"));
    }
}
