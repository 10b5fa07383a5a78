//! # Hydraulic Equations
//!
//! Everything the engine knows about its formulas, kept apart from the
//! request handling in [`crate::calculations`]:
//!
//! - [`hydraulics`] - Pure closed-form kernels (head loss, flow, power, surge)
//! - [`registry`] - Formula catalog: ids, display equations, parameter descriptors
//!
//! ## Constants
//!
//! Kernels take g, ρ and ν as arguments; the values used by the engine come
//! from [`crate::settings::FluidProperties`].
//!
//! ## References
//!
//! - Darcy-Weisbach and Hazen-Williams friction loss (SI forms)
//! - Torricelli's law for orifice discharge
//! - Joukowsky equation for instantaneous valve closure

pub mod hydraulics;
pub mod registry;

pub use registry::{
    generate_formulas_markdown, list_formulas, Formula, FormulaCategory, FormulaDescriptor,
    ParameterDescriptor, ValueRange, ALL_FORMULAS,
};
