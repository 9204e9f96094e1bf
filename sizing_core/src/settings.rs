//! # Analysis Settings
//!
//! Material and code-basis parameters for an analysis run. Every field has a
//! default, so a partial JSON settings file only needs the values it changes.
//!
//! ```rust
//! use sizing_core::settings::AnalysisSettings;
//!
//! let settings: AnalysisSettings = serde_json::from_str(r#"{ "yield_strength_mpa": 250.0 }"#).unwrap();
//! assert_eq!(settings.yield_strength_mpa, 250.0);
//! assert_eq!(settings.safety_factor, 1.67);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SizingError, SizingResult};
use crate::units::MegaPascals;

/// Default yield strength (MPa), Grade 50 steel
pub const DEFAULT_YIELD_STRENGTH_MPA: f64 = 345.0;

/// Default ASD safety factor for flexure
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.67;

/// Default tolerance for treating two section weights as equal (kg/m)
pub const DEFAULT_WEIGHT_EPSILON: f64 = 1e-9;

/// Settings for demand calculation and section selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Steel yield strength Fy (MPa)
    #[serde(alias = "yieldStrength")]
    pub yield_strength_mpa: f64,

    /// Safety factor Ω applied to Fy to get the allowable stress
    #[serde(alias = "safetyFactor")]
    pub safety_factor: f64,

    /// Weights closer than this are treated as a tie during selection
    #[serde(alias = "modulusToleranceEpsilon", alias = "weightEpsilon")]
    pub weight_epsilon: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            yield_strength_mpa: DEFAULT_YIELD_STRENGTH_MPA,
            safety_factor: DEFAULT_SAFETY_FACTOR,
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
        }
    }
}

impl AnalysisSettings {
    /// Override the yield strength
    pub fn with_yield_strength(mut self, yield_strength_mpa: f64) -> Self {
        self.yield_strength_mpa = yield_strength_mpa;
        self
    }

    /// Override the safety factor
    pub fn with_safety_factor(mut self, safety_factor: f64) -> Self {
        self.safety_factor = safety_factor;
        self
    }

    /// Validate settings before any computation uses them.
    pub fn validate(&self) -> SizingResult<()> {
        if !self.yield_strength_mpa.is_finite() || self.yield_strength_mpa <= 0.0 {
            return Err(SizingError::invalid_input(
                "yield_strength_mpa",
                self.yield_strength_mpa.to_string(),
                "Yield strength must be positive",
            ));
        }
        if !self.safety_factor.is_finite() || self.safety_factor <= 0.0 {
            return Err(SizingError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be positive",
            ));
        }
        if !self.weight_epsilon.is_finite() || self.weight_epsilon < 0.0 {
            return Err(SizingError::invalid_input(
                "weight_epsilon",
                self.weight_epsilon.to_string(),
                "Tolerance must be non-negative",
            ));
        }
        Ok(())
    }

    /// Allowable bending stress Fy / Ω
    pub fn allowable_stress(&self) -> MegaPascals {
        MegaPascals(self.yield_strength_mpa / self.safety_factor)
    }
}
