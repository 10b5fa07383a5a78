//! # Tank Sizing
//!
//! Volume of a vertical cylindrical tank with an aspect-ratio screen.

use crate::calculations::{Evaluation, FormulaInputs};
use crate::equations::hydraulics::{circle_area, cylinder_volume, L_PER_M3};
use crate::errors::CalcResult;

/// H/D below which the tank is unusually wide
pub const MIN_ASPECT_RATIO: f64 = 0.5;

/// H/D above which the tank is unusually tall
pub const MAX_ASPECT_RATIO: f64 = 3.0;

/// Share of nominal volume usable after freeboard and dead storage
pub const EFFECTIVE_CAPACITY_RATIO: f64 = 0.95;

pub fn tank_volume(inputs: &FormulaInputs<'_>) -> CalcResult<Evaluation> {
    let d = inputs.positive("D", "Tank diameter")?;
    let h = inputs.non_negative("H", "Tank height")?;

    let area = circle_area(d);
    let volume = cylinder_volume(d, h);
    let liters = volume * L_PER_M3;

    let mut eval = Evaluation::new(volume, "m³");
    eval.step("Calculate tank area", format!("A = π×D²/4 = π×{d}²/4"), area);
    eval.step("Calculate volume in m³", format!("V = A×H = {area}×{h}"), volume);
    eval.step("Convert to liters", format!("V = {volume}×1000"), liters);

    let aspect_ratio = h / d;
    if aspect_ratio < MIN_ASPECT_RATIO {
        eval.warn("TANK_TOO_WIDE", "Tank is very wide - check structural design.");
    } else if aspect_ratio > MAX_ASPECT_RATIO {
        eval.warn("TANK_TOO_TALL", "Tank is very tall - check stability.");
    }

    eval.recommend_value("TOTAL_CAPACITY", format!("Total capacity: {liters:.0} liters"), liters);
    let effective = liters * EFFECTIVE_CAPACITY_RATIO;
    eval.recommend_value(
        "EFFECTIVE_CAPACITY",
        format!("Effective volume (95%): {effective:.0} liters"),
        effective,
    );

    Ok(eval)
}
