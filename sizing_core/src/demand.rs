//! # Flexural Demand
//!
//! Converts a beam's peak bending moment into the elastic section modulus it
//! requires at the allowable stress Fy / Ω:
//!
//! ```text
//! S_req = M / (Fy / Ω)
//!       = (M[kN·m] · 1e6) / (Fy[MPa] / Ω) / 1000   [cm³]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::demand::required_modulus;
//!
//! let sx = required_modulus(100.0, 345.0, 1.67).unwrap();
//! assert!((sx.0 - 484.06).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SizingError, SizingResult};
use crate::settings::AnalysisSettings;
use crate::units::{Cm3, KiloNewtonMeters, MegaPascals, NewtonMillimeters};

/// Flexural demand of one beam. Derived per evaluation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamDemand {
    /// Peak bending moment (kN·m)
    pub max_moment_knm: f64,

    /// Beam length (m)
    pub length_m: f64,

    /// Required elastic section modulus (cm³)
    pub required_modulus_cm3: f64,
}

/// Required elastic section modulus for a moment at Fy / Ω.
///
/// Fails with `InvalidInput` for a negative or non-finite moment, or a
/// non-positive yield strength or safety factor. A zero moment requires zero
/// modulus.
pub fn required_modulus(max_moment_knm: f64, yield_strength_mpa: f64, safety_factor: f64) -> SizingResult<Cm3> {
    if !max_moment_knm.is_finite() || max_moment_knm < 0.0 {
        return Err(SizingError::invalid_input(
            "max_moment_knm",
            max_moment_knm.to_string(),
            "Moment must be a non-negative number",
        ));
    }
    if !yield_strength_mpa.is_finite() || yield_strength_mpa <= 0.0 {
        return Err(SizingError::invalid_input(
            "yield_strength_mpa",
            yield_strength_mpa.to_string(),
            "Yield strength must be positive",
        ));
    }
    if !safety_factor.is_finite() || safety_factor <= 0.0 {
        return Err(SizingError::invalid_input(
            "safety_factor",
            safety_factor.to_string(),
            "Safety factor must be positive",
        ));
    }

    let moment: NewtonMillimeters = KiloNewtonMeters(max_moment_knm).into();
    let allowable = MegaPascals(yield_strength_mpa / safety_factor);
    Ok((moment / allowable).into())
}

/// Demand calculator bound to one set of analysis settings.
#[derive(Debug, Clone, Copy)]
pub struct DemandCalculator {
    settings: AnalysisSettings,
}

impl DemandCalculator {
    /// Create a calculator; settings are validated up front.
    pub fn new(settings: AnalysisSettings) -> SizingResult<Self> {
        settings.validate()?;
        Ok(DemandCalculator { settings })
    }

    /// Required modulus for a moment under these settings
    pub fn required_modulus(&self, max_moment_knm: f64) -> SizingResult<Cm3> {
        required_modulus(
            max_moment_knm,
            self.settings.yield_strength_mpa,
            self.settings.safety_factor,
        )
    }

    /// Full demand for a beam. Length must be positive.
    pub fn demand(&self, max_moment_knm: f64, length_m: f64) -> SizingResult<BeamDemand> {
        if !length_m.is_finite() || length_m <= 0.0 {
            return Err(SizingError::invalid_input(
                "length_m",
                length_m.to_string(),
                "Length must be positive",
            ));
        }
        let required = self.required_modulus(max_moment_knm)?;
        Ok(BeamDemand {
            max_moment_knm,
            length_m,
            required_modulus_cm3: required.value(),
        })
    }
}
