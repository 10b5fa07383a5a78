//! # Engine Settings
//!
//! Physical constants the evaluators use, plus loading them from a JSON file.
//! The defaults are water at 20 °C and reproduce the reference results
//! exactly; a settings file only needs the fields it overrides.
//!
//! ```json
//! {
//!   "fluid": {
//!     "gravity": 9.81,
//!     "density": 1000.0,
//!     "kinematic_viscosity": 1.003e-6
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Density of water at 20 °C (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// Kinematic viscosity of water at 20 °C (m²/s)
pub const WATER_KINEMATIC_VISCOSITY: f64 = 1.003e-6;

/// Fluid and environment constants shared by every formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidProperties {
    /// g (m/s²)
    pub gravity: f64,
    /// ρ (kg/m³)
    pub density: f64,
    /// ν (m²/s)
    pub kinematic_viscosity: f64,
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            density: WATER_DENSITY,
            kinematic_viscosity: WATER_KINEMATIC_VISCOSITY,
        }
    }
}

impl FluidProperties {
    /// Reject constants that would make any formula meaningless.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("gravity", self.gravity),
            ("density", self.density),
            ("kinematic_viscosity", self.kinematic_viscosity),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    name,
                    value.to_string(),
                    "Fluid constant must be finite and positive",
                ));
            }
        }
        Ok(())
    }
}

/// Top-level settings document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub fluid: FluidProperties,
}

impl EngineSettings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.fluid.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| CalcError::settings(&display, e.to_string()))?;
        Self::from_json(&contents).map_err(|e| CalcError::settings(&display, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_water() {
        let fluid = FluidProperties::default();
        assert_eq!(fluid.gravity, 9.81);
        assert_eq!(fluid.density, 1000.0);
        assert_eq!(fluid.kinematic_viscosity, 1.003e-6);
        assert!(fluid.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = EngineSettings::from_json(r#"{"fluid": {"density": 998.2}}"#).unwrap();
        assert_eq!(settings.fluid.density, 998.2);
        assert_eq!(settings.fluid.gravity, GRAVITY);
    }

    #[test]
    fn test_empty_document_is_default() {
        let settings = EngineSettings::from_json("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_non_positive_constant_rejected() {
        let err = EngineSettings::from_json(r#"{"fluid": {"gravity": 0.0}}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_file_is_settings_error() {
        let err = EngineSettings::load(Path::new("/nonexistent/hydro-settings.json")).unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");
    }
}
