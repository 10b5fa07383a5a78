//! # Closed-Form Hydraulic Formulas
//!
//! Pure numeric kernels behind every catalog entry. All inputs and outputs are
//! SI base units; nothing here validates, logs, or allocates. Domain guards
//! live in the calculation layer.
//!
//! ## Notation
//!
//! - `f` = Darcy friction factor
//! - `L` = Pipe length
//! - `D` = Diameter (pipe or tank)
//! - `V` = Mean velocity
//! - `Q` = Volumetric flow rate
//! - `C` = Hazen-Williams roughness coefficient
//! - `A` = Flow or orifice area
//! - `h`, `H` = Head / height
//! - `η` = Pump efficiency
//! - `c` = Pressure wave speed
//! - `g` = Gravitational acceleration, `ρ` = density, `ν` = kinematic viscosity

use std::f64::consts::PI;

/// Pascals per bar
pub const PA_PER_BAR: f64 = 100_000.0;

/// Watts per kilowatt
pub const W_PER_KW: f64 = 1000.0;

/// Liters per cubic meter
pub const L_PER_M3: f64 = 1000.0;

/// Hazen-Williams SI constant
pub const HAZEN_WILLIAMS_K: f64 = 10.67;

/// Hazen-Williams flow exponent
pub const HAZEN_WILLIAMS_Q_EXP: f64 = 1.852;

/// Hazen-Williams diameter exponent
pub const HAZEN_WILLIAMS_D_EXP: f64 = 4.871;

// =============================================================================
// PIPE FRICTION
// =============================================================================

/// Velocity head V²/2g
#[inline]
pub fn velocity_head(v: f64, g: f64) -> f64 {
    v.powi(2) / (2.0 * g)
}

/// Reynolds number Re = VD/ν
#[inline]
pub fn reynolds_number(v: f64, d: f64, nu: f64) -> f64 {
    v * d / nu
}

/// Darcy-Weisbach head loss hf = f·(L/D)·(V²/2g)
#[inline]
pub fn darcy_weisbach_head_loss(f: f64, l: f64, d: f64, v: f64, g: f64) -> f64 {
    f * (l / d) * velocity_head(v, g)
}

/// Laminar friction factor f = 64/Re
#[inline]
pub fn laminar_friction_factor(re: f64) -> f64 {
    64.0 / re
}

/// Hazen-Williams head loss hf = 10.67·L·Q^1.852 / (C^1.852·D^4.871)
#[inline]
pub fn hazen_williams_head_loss(l: f64, q: f64, c: f64, d: f64) -> f64 {
    HAZEN_WILLIAMS_K * l * q.powf(HAZEN_WILLIAMS_Q_EXP)
        / (c.powf(HAZEN_WILLIAMS_Q_EXP) * d.powf(HAZEN_WILLIAMS_D_EXP))
}

// =============================================================================
// GEOMETRY AND CONTINUITY
// =============================================================================

/// Circular area A = πD²/4
#[inline]
pub fn circle_area(d: f64) -> f64 {
    PI * d.powi(2) / 4.0
}

/// Diameter of the circle with area A: D = √(4A/π)
#[inline]
pub fn equivalent_diameter(a: f64) -> f64 {
    (4.0 * a / PI).sqrt()
}

/// Continuity Q = A·V
#[inline]
pub fn continuity_flow(a: f64, v: f64) -> f64 {
    a * v
}

/// Torricelli velocity √(2gh)
#[inline]
pub fn torricelli_velocity(h: f64, g: f64) -> f64 {
    (2.0 * g * h).sqrt()
}

/// Orifice discharge Q = Cd·A·√(2gh)
#[inline]
pub fn orifice_discharge(cd: f64, a: f64, h: f64, g: f64) -> f64 {
    cd * a * torricelli_velocity(h, g)
}

// =============================================================================
// PUMPS
// =============================================================================

/// Hydraulic (water) power ρgQH in watts
#[inline]
pub fn hydraulic_power(rho: f64, g: f64, q: f64, h: f64) -> f64 {
    rho * g * q * h
}

/// Shaft power P_hyd/η in watts
#[inline]
pub fn shaft_power(hydraulic_w: f64, efficiency: f64) -> f64 {
    hydraulic_w / efficiency
}

// =============================================================================
// TANKS
// =============================================================================

/// Cylinder volume V = πD²/4·H
#[inline]
pub fn cylinder_volume(d: f64, h: f64) -> f64 {
    circle_area(d) * h
}

// =============================================================================
// WATER HAMMER
// =============================================================================

/// Joukowsky surge ΔP = ρ·c·ΔV in pascals
#[inline]
pub fn joukowsky_pressure(rho: f64, c: f64, dv: f64) -> f64 {
    rho * c * dv
}

/// Pressure expressed as head ΔH = ΔP/(ρg)
#[inline]
pub fn pressure_head(dp: f64, rho: f64, g: f64) -> f64 {
    dp / (rho * g)
}

/// Pipe length a pressure wave covers in the round trip of a valve closure, c·t.
#[inline]
pub fn critical_pipe_length(c: f64, closure_time_s: f64) -> f64 {
    c * closure_time_s
}
