//! # Section Selection
//!
//! Exhaustive search for the lightest catalog section whose strong-axis
//! modulus meets a requirement.
//!
//! ## Ordering
//!
//! Among adequate sections:
//!
//! 1. find the minimum weight `w_min`
//! 2. keep the sections weighing at most `w_min + weight_epsilon`
//! 3. of those, take the smallest strong-axis modulus Sx (closest fit), then
//!    the lexicographically first name
//!
//! The tie band is anchored at the minimum weight, so the winner depends only
//! on section properties, never on catalog order or on chains of near-ties.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::catalog::builtin_catalog;
//! use sizing_core::selector::select_optimal;
//! use sizing_core::units::Cm3;
//!
//! let selection = select_optimal(Cm3(600.0), builtin_catalog(), "W21X44").unwrap();
//! assert_eq!(selection.optimal_section_name, "W16X26");
//! assert!(!selection.is_optimal);
//! assert_eq!(selection.savings_percentage, 41.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Section, SectionCatalog};
use crate::errors::{SizingError, SizingResult};
use crate::settings::DEFAULT_WEIGHT_EPSILON;
use crate::units::Cm3;

/// Outcome of selecting the optimal section for one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalSelection {
    /// Catalog name of the selected section
    pub optimal_section_name: String,

    /// Snapshot of the selected section
    pub optimal_section: Section,

    /// Whether the current section is the selected one
    pub is_optimal: bool,

    /// Rounded weight reduction from current to optimal (%). Zero when optimal.
    pub savings_percentage: f64,
}

/// Lightest-adequate-section search with a configurable weight tolerance.
#[derive(Debug, Clone, Copy)]
pub struct SectionSelector {
    weight_epsilon: f64,
}

impl Default for SectionSelector {
    fn default() -> Self {
        SectionSelector {
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
        }
    }
}

impl SectionSelector {
    /// Create a selector. Negative or non-finite tolerances are rejected.
    pub fn new(weight_epsilon: f64) -> SizingResult<Self> {
        if !weight_epsilon.is_finite() || weight_epsilon < 0.0 {
            return Err(SizingError::invalid_input(
                "weight_epsilon",
                weight_epsilon.to_string(),
                "Tolerance must be non-negative",
            ));
        }
        Ok(SectionSelector { weight_epsilon })
    }

    /// Lightest section with `Sx >= required`.
    ///
    /// Fails with `InvalidInput` for a negative or non-finite requirement and
    /// with `NoAdequateSection` when every section falls short.
    pub fn lightest_adequate<'c>(&self, required: Cm3, catalog: &'c SectionCatalog) -> SizingResult<&'c Section> {
        if !required.value().is_finite() || required.value() < 0.0 {
            return Err(SizingError::invalid_input(
                "required_modulus_cm3",
                required.value().to_string(),
                "Required modulus must be a non-negative number",
            ));
        }

        let no_adequate = || SizingError::NoAdequateSection {
            required_modulus_cm3: required.value(),
            largest_available_cm3: catalog.largest_modulus().map(Cm3::value).unwrap_or(0.0),
        };

        let w_min = catalog
            .all()
            .filter(|s| s.is_adequate_for(required))
            .map(|s| s.weight_kg_per_m)
            .min_by(|a, b| a.total_cmp(b))
            .ok_or_else(no_adequate)?;
        let weight_limit = w_min + self.weight_epsilon;

        catalog
            .all()
            .filter(|s| s.is_adequate_for(required) && s.weight_kg_per_m <= weight_limit)
            .min_by(|a, b| {
                a.section_modulus_x_cm3
                    .total_cmp(&b.section_modulus_x_cm3)
                    .then_with(|| a.name.cmp(&b.name))
            })
            .ok_or_else(no_adequate)
    }

    /// Select the optimal section and compare it with the current one.
    ///
    /// The current section must exist in the catalog (`SectionNotFound`
    /// otherwise). An under-designed current section is never reported as
    /// optimal, since it is not a candidate.
    pub fn select(
        &self,
        required: Cm3,
        catalog: &SectionCatalog,
        current_section_name: &str,
    ) -> SizingResult<OptimalSelection> {
        let current = catalog.lookup(current_section_name)?;
        let optimal = self.lightest_adequate(required, catalog)?;

        let is_optimal = current.name.eq_ignore_ascii_case(&optimal.name);
        let savings_percentage = if is_optimal {
            0.0
        } else {
            savings_percentage(current, optimal)?
        };

        log::trace!(
            "Sx_req={:.1} cm³: current {} -> optimal {} ({}%)",
            required.value(),
            current.name,
            optimal.name,
            savings_percentage
        );

        Ok(OptimalSelection {
            optimal_section_name: optimal.name.clone(),
            optimal_section: optimal.clone(),
            is_optimal,
            savings_percentage,
        })
    }
}

/// Rounded percentage weight reduction from `current` to `optimal`.
///
/// Clamped at zero: an under-designed current section can be lighter than
/// the optimal one, in which case nothing is saved.
fn savings_percentage(current: &Section, optimal: &Section) -> SizingResult<f64> {
    if current.weight_kg_per_m <= 0.0 {
        return Err(SizingError::invalid_catalog_entry(
            &current.name,
            "weight_kg_per_m must be positive",
        ));
    }
    let reduction = (current.weight_kg_per_m - optimal.weight_kg_per_m) / current.weight_kg_per_m;
    let percentage = (100.0 * reduction).round();
    Ok(if percentage > 0.0 { percentage } else { 0.0 })
}

/// Select with the default weight tolerance.
pub fn select_optimal(
    required: Cm3,
    catalog: &SectionCatalog,
    current_section_name: &str,
) -> SizingResult<OptimalSelection> {
    SectionSelector::default().select(required, catalog, current_section_name)
}
