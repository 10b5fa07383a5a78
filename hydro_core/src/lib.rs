//! # hydro_core - Hydraulic Formula Calculation Engine
//!
//! `hydro_core` evaluates closed-form hydraulic engineering formulas (head loss,
//! flow, pump power, tank sizing, water hammer). Callers pass raw values with
//! unit labels; the engine normalizes them to SI, evaluates the formula and
//! returns the result with a derivation trace, warnings and recommendations.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `calculate` is a pure function of its inputs; the catalog is read-only
//! - **JSON-First**: Requests deserialize and responses serialize with serde
//! - **Rich Errors**: Structured error types with stable codes
//! - **Closed Set**: Formulas are an enum, unknown ids fail at the boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use hydro_core::{calculate, list_formulas, CalculationInput, Quantity};
//!
//! assert_eq!(list_formulas().len(), 7);
//!
//! let mut inputs = CalculationInput::new();
//! inputs.insert("c".to_string(), Quantity::new(1200.0, "m/s"));
//! inputs.insert("ΔV".to_string(), Quantity::new(2.0, "m/s"));
//!
//! let response = calculate("water_hammer_pressure", &inputs).unwrap();
//! assert_eq!(response.result.value, 24.0);
//! assert_eq!(response.result.unit, "bar");
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Formula catalog and pure hydraulic kernels
//! - [`calculations`] - Dispatch, evaluators, response types
//! - [`units`] - Unit normalization to the SI base system
//! - [`settings`] - Fluid constants and settings file loading
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate, Advisory, AdvisoryKind, CalculationResponse, HydraulicCalculator, IntermediateStep,
    ResultValue,
};
pub use equations::registry::{list_formulas, Formula, FormulaCategory, FormulaDescriptor, ParameterDescriptor};
pub use errors::{CalcError, CalcResult};
pub use settings::{EngineSettings, FluidProperties};
pub use units::{to_base_units, BaseInputs, CalculationInput, Quantity};
