//! # Pump Power
//!
//! Shaft power from flow, total dynamic head and overall efficiency, reported
//! in kilowatts together with a motor rating suggestion.

use crate::calculations::{Evaluation, FormulaInputs};
use crate::equations::hydraulics::{hydraulic_power, shaft_power, W_PER_KW};
use crate::errors::CalcResult;
use crate::settings::FluidProperties;

/// Efficiency below which the pump is worth replacing
pub const LOW_EFFICIENCY: f64 = 0.5;

/// Shaft power above which splitting duty across pumps is suggested (kW)
pub const MULTIPLE_PUMP_KW: f64 = 100.0;

/// Motor service margin over shaft power
pub const MOTOR_SAFETY_FACTOR: f64 = 1.15;

pub fn pump_power(inputs: &FormulaInputs<'_>, fluid: &FluidProperties) -> CalcResult<Evaluation> {
    let q = inputs.non_negative("Q", "Flow rate")?;
    let h = inputs.non_negative("H", "Total head")?;
    let eta = inputs.positive("η", "Efficiency")?;
    let rho = fluid.density;
    let g = fluid.gravity;

    let p_hydraulic = hydraulic_power(rho, g, q, h);
    let p_shaft = shaft_power(p_hydraulic, eta);
    let p_kw = p_shaft / W_PER_KW;

    let mut eval = Evaluation::new(p_kw, "kW");
    eval.step(
        "Calculate hydraulic power",
        format!("P_hyd = ρgQH = {rho}×{g}×{q}×{h}"),
        p_hydraulic,
    );
    eval.step(
        "Calculate shaft power",
        format!("P_shaft = P_hyd/η = {p_hydraulic}/{eta}"),
        p_shaft,
    );

    if eta < LOW_EFFICIENCY {
        eval.warn("LOW_EFFICIENCY", "Low pump efficiency - consider pump replacement.");
    }

    if p_kw > MULTIPLE_PUMP_KW {
        eval.recommend("MULTIPLE_PUMPS", "High power requirement - consider multiple pumps.");
    }

    let motor_kw = p_kw * MOTOR_SAFETY_FACTOR;
    eval.recommend_value(
        "MOTOR_SIZE",
        format!("Recommended motor size: {motor_kw:.1} kW"),
        motor_kw,
    );

    Ok(eval)
}
