//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the sizing engine. These are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! ## Units
//!
//! - Length: meters (m) for spans
//! - Moment: kilonewton-meters (kN·m) as input, newton-millimeters (N·mm) internally
//! - Stress: megapascals (MPa = N/mm²)
//! - Section modulus: cm³ (catalog), mm³ (intermediate)
//! - Mass: kilograms, kilograms per meter (kg/m)
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::units::{KiloNewtonMeters, NewtonMillimeters, MegaPascals, Mm3, Cm3};
//!
//! let moment: NewtonMillimeters = KiloNewtonMeters(100.0).into();
//! let modulus: Mm3 = moment / MegaPascals(200.0);
//! let modulus_cm3: Cm3 = modulus.into();
//! assert!((modulus_cm3.0 - 500.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

// ============================================================================
// Section Properties
// ============================================================================

/// Section modulus in cubic centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm3(pub f64);

/// Section modulus in cubic millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm3(pub f64);

impl From<Mm3> for Cm3 {
    fn from(mm3: Mm3) -> Self {
        Cm3(mm3.0 / 1000.0)
    }
}

impl From<Cm3> for Mm3 {
    fn from(cm3: Cm3) -> Self {
        Mm3(cm3.0 * 1000.0)
    }
}

/// Elastic section modulus from moment and stress: S = M / σ
impl Div<MegaPascals> for NewtonMillimeters {
    type Output = Mm3;
    fn div(self, rhs: MegaPascals) -> Mm3 {
        Mm3(self.0 / rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Linear mass in kilograms per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl Mul<Meters> for KgPerM {
    type Output = Kilograms;
    fn mul(self, rhs: Meters) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(Cm3);
impl_arithmetic!(Mm3);
impl_arithmetic!(KgPerM);
impl_arithmetic!(Kilograms);
