//! # Pipe Friction Head Loss
//!
//! Darcy-Weisbach and Hazen-Williams evaluators. Both report the loss as an
//! equivalent column of water in meters and screen the flow velocity against
//! the usual design band of 0.6-3 m/s.

use crate::calculations::{Evaluation, FormulaInputs};
use crate::equations::hydraulics::{
    circle_area, darcy_weisbach_head_loss, hazen_williams_head_loss, laminar_friction_factor,
    reynolds_number, velocity_head,
};
use crate::errors::CalcResult;
use crate::settings::FluidProperties;

/// Below this velocity solids settle out (m/s)
pub const SEDIMENTATION_VELOCITY: f64 = 0.6;

/// Above this velocity erosion and noise become a concern (m/s)
pub const EROSION_VELOCITY: f64 = 3.0;

/// Upper Reynolds number of laminar flow
pub const LAMINAR_RE: f64 = 2000.0;

/// Lower Reynolds number of fully turbulent flow
pub const TURBULENT_RE: f64 = 4000.0;

/// Hazen-Williams C below which pipe is considered old or rough
pub const LOW_C: f64 = 100.0;

/// Hazen-Williams C above which the material choice should be double-checked
pub const HIGH_C: f64 = 140.0;

/// hf = f·(L/D)·(V²/2g), with a Reynolds-number regime check.
pub fn darcy_weisbach(inputs: &FormulaInputs<'_>, fluid: &FluidProperties) -> CalcResult<Evaluation> {
    let f = inputs.non_negative("f", "Friction factor")?;
    let l = inputs.non_negative("L", "Pipe length")?;
    let d = inputs.positive("D", "Pipe diameter")?;
    let v = inputs.get("V")?;
    let g = fluid.gravity;
    let nu = fluid.kinematic_viscosity;

    let hf = darcy_weisbach_head_loss(f, l, d, v, g);
    let re = reynolds_number(v, d, nu);

    let mut eval = Evaluation::new(hf, "m");
    eval.step(
        "Calculate velocity head",
        format!("V²/(2g) = {v}²/(2×{g})"),
        velocity_head(v, g),
    );
    eval.step("Calculate L/D ratio", format!("L/D = {l}/{d}"), l / d);
    eval.step(
        "Calculate Reynolds number",
        format!("Re = VD/ν = {v}×{d}/{nu:e}"),
        re,
    );

    // Sign of V is direction; thresholds and regime apply to magnitude
    let speed = v.abs();
    if speed < SEDIMENTATION_VELOCITY {
        eval.warn("LOW_VELOCITY", "Velocity is low. Risk of sedimentation.");
    } else if speed > EROSION_VELOCITY {
        eval.warn("HIGH_VELOCITY", "Velocity is high. Risk of erosion and noise.");
    }

    let re_magnitude = re.abs();
    if re_magnitude < LAMINAR_RE {
        let message = "Flow is laminar. Consider using f = 64/Re.";
        if re_magnitude > 0.0 {
            eval.recommend_value("LAMINAR_FLOW", message, laminar_friction_factor(re_magnitude));
        } else {
            eval.recommend("LAMINAR_FLOW", message);
        }
    } else if re_magnitude > TURBULENT_RE {
        eval.recommend(
            "TURBULENT_FLOW",
            "Flow is turbulent. Verify friction factor using Moody diagram or Colebrook equation.",
        );
    }

    Ok(eval)
}

/// hf = 10.67·L·Q^1.852 / (C^1.852·D^4.871), SI form.
pub fn hazen_williams(inputs: &FormulaInputs<'_>) -> CalcResult<Evaluation> {
    let l = inputs.non_negative("L", "Pipe length")?;
    let q = inputs.non_negative("Q", "Flow rate")?;
    let c = inputs.positive("C", "C coefficient")?;
    let d = inputs.positive("D", "Pipe diameter")?;

    let hf = hazen_williams_head_loss(l, q, c, d);
    let a = circle_area(d);
    let v = q / a;

    let mut eval = Evaluation::new(hf, "m");
    eval.step("Calculate pipe area", format!("A = π×D²/4 = π×{d}²/4"), a);
    eval.step("Calculate velocity", format!("V = Q/A = {q}/{a}"), v);

    if c < LOW_C {
        eval.warn("LOW_C_VALUE", "Low C value indicates old or rough pipes.");
    } else if c > HIGH_C {
        eval.recommend("HIGH_C_VALUE", "High C value - ensure it matches pipe material.");
    }

    if v < SEDIMENTATION_VELOCITY {
        eval.warn("LOW_VELOCITY", "Low velocity - risk of sedimentation.");
    } else if v > EROSION_VELOCITY {
        eval.warn("HIGH_VELOCITY", "High velocity - risk of erosion.");
    }

    Ok(eval)
}
