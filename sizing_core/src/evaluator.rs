//! # Beam Evaluation
//!
//! Runs demand calculation and section selection for a batch of beams and
//! aggregates the batch summary.
//!
//! A beam that cannot be evaluated (unknown section, invalid input, no
//! adequate section) is left out of `results` and reported in `failures`;
//! the rest of the batch is still evaluated.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::catalog::builtin_catalog;
//! use sizing_core::evaluator::{BeamEvaluator, BeamInput};
//! use sizing_core::settings::AnalysisSettings;
//!
//! let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
//!
//! let beams = vec![
//!     BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 120.0, "W18X35"),
//!     BeamInput::new("b2", "Story1", "Story1-B2", 6.0, 120.0, "W99X1"),
//! ];
//! let analysis = evaluator.evaluate(&beams);
//!
//! assert_eq!(analysis.total_beams, 1);
//! assert_eq!(analysis.failures.len(), 1);
//! assert_eq!(analysis.failures[0].beam_id, "b2");
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Section, SectionCatalog};
use crate::demand::DemandCalculator;
use crate::errors::{SizingError, SizingResult};
use crate::selector::SectionSelector;
use crate::settings::AnalysisSettings;
use crate::units::{Cm3, KgPerM, Kilograms, Meters};

/// One beam record from the upstream structural analysis.
///
/// Accepts both snake_case and the dashboard's camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Beam identifier. Blank ids are filled in when a batch file is loaded.
    #[serde(default)]
    pub id: String,

    /// Story the beam belongs to (e.g., "Story3")
    #[serde(alias = "storyName")]
    pub story_name: String,

    /// Frame label (e.g., "Story3-B7")
    #[serde(alias = "frameName")]
    pub frame_name: String,

    /// Beam length (m)
    #[serde(alias = "length")]
    pub length_m: f64,

    /// Peak bending moment (kN·m)
    #[serde(alias = "maxMoment")]
    pub max_moment_knm: f64,

    /// Catalog name of the section currently specified
    #[serde(alias = "currentSection", alias = "currentSectionName")]
    pub current_section: String,
}

impl BeamInput {
    pub fn new(
        id: impl Into<String>,
        story_name: impl Into<String>,
        frame_name: impl Into<String>,
        length_m: f64,
        max_moment_knm: f64,
        current_section: impl Into<String>,
    ) -> Self {
        BeamInput {
            id: id.into(),
            story_name: story_name.into(),
            frame_name: frame_name.into(),
            length_m,
            max_moment_knm,
            current_section: current_section.into(),
        }
    }
}

/// Evaluation result for one beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    // === Identity ===
    pub id: String,
    pub story_name: String,
    pub frame_name: String,

    // === Inputs ===
    /// Beam length (m)
    pub length_m: f64,

    /// Peak bending moment (kN·m)
    pub max_moment_knm: f64,

    /// Section currently specified
    pub current_section: String,

    // === Derived ===
    /// Required elastic section modulus (cm³)
    pub required_modulus_cm3: f64,

    /// Lightest adequate section
    pub optimal_section: String,

    /// Current section is the optimal one
    pub is_optimal: bool,

    /// Rounded weight reduction from current to optimal (%)
    pub savings_percentage: f64,

    // === Snapshots for display ===
    pub current_section_properties: Section,
    pub optimal_section_properties: Section,
}

impl BeamResult {
    /// Whether the current section meets the demand
    pub fn current_is_adequate(&self) -> bool {
        self.current_section_properties
            .is_adequate_for(Cm3(self.required_modulus_cm3))
    }

    /// Demand-to-capacity ratio of the current section (Sx_req / Sx)
    pub fn current_utilization(&self) -> f64 {
        self.required_modulus_cm3 / self.current_section_properties.section_modulus_x_cm3
    }

    /// Steel mass saved over the beam length by switching to the optimal
    /// section. Zero when switching would add weight.
    pub fn weight_savings(&self) -> Kilograms {
        let delta = KgPerM(
            self.current_section_properties.weight_kg_per_m - self.optimal_section_properties.weight_kg_per_m,
        );
        if delta.value() > 0.0 {
            delta * Meters(self.length_m)
        } else {
            Kilograms(0.0)
        }
    }
}

/// A beam that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamFailure {
    pub beam_id: String,

    /// Short code from [`SizingError::error_code`]
    pub error_code: String,

    /// Human-readable reason
    pub reason: String,
}

impl BeamFailure {
    fn new(beam_id: impl Into<String>, error: &SizingError) -> Self {
        BeamFailure {
            beam_id: beam_id.into(),
            error_code: error.error_code().to_string(),
            reason: error.to_string(),
        }
    }
}

/// Batch results with summary counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Number of successfully evaluated beams
    pub total_beams: usize,

    /// Beams whose current section is already optimal
    pub optimal_beams: usize,

    /// `total_beams - optimal_beams`
    pub improvable_beams: usize,

    /// Mean savings percentage over all evaluated beams, zeros included
    pub average_savings: f64,

    /// Per-beam results in input order
    pub results: Vec<BeamResult>,

    /// Beams left out of `results`, in input order
    #[serde(default)]
    pub failures: Vec<BeamFailure>,
}

impl AnalysisResults {
    /// Aggregate results and failures into a batch summary.
    pub fn from_parts(results: Vec<BeamResult>, failures: Vec<BeamFailure>) -> Self {
        let total_beams = results.len();
        let optimal_beams = results.iter().filter(|r| r.is_optimal).count();
        let average_savings = if total_beams == 0 {
            0.0
        } else {
            results.iter().map(|r| r.savings_percentage).sum::<f64>() / total_beams as f64
        };

        AnalysisResults {
            total_beams,
            optimal_beams,
            improvable_beams: total_beams - optimal_beams,
            average_savings,
            results,
            failures,
        }
    }

    /// Total steel mass saved if every improvable beam is switched (kg)
    pub fn total_weight_savings(&self) -> Kilograms {
        self.results
            .iter()
            .map(BeamResult::weight_savings)
            .fold(Kilograms(0.0), |acc, w| acc + w)
    }

    /// Look up a result by beam id
    pub fn get(&self, id: &str) -> Option<&BeamResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Whether any beam failed evaluation
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Evaluates beams against one catalog and one set of settings.
///
/// The catalog is borrowed, never copied or mutated, so one catalog can back
/// any number of evaluators.
#[derive(Debug, Clone, Copy)]
pub struct BeamEvaluator<'c> {
    catalog: &'c SectionCatalog,
    settings: AnalysisSettings,
    demand: DemandCalculator,
    selector: SectionSelector,
}

impl<'c> BeamEvaluator<'c> {
    /// Create an evaluator. Invalid settings are rejected here, once, rather
    /// than per beam.
    pub fn new(catalog: &'c SectionCatalog, settings: AnalysisSettings) -> SizingResult<Self> {
        Ok(BeamEvaluator {
            catalog,
            settings,
            demand: DemandCalculator::new(settings)?,
            selector: SectionSelector::new(settings.weight_epsilon)?,
        })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &'c SectionCatalog {
        self.catalog
    }

    /// Evaluate a single beam.
    pub fn evaluate_beam(&self, beam: &BeamInput) -> SizingResult<BeamResult> {
        let current = self.catalog.lookup(&beam.current_section)?;
        let demand = self.demand.demand(beam.max_moment_knm, beam.length_m)?;
        let selection = self.selector.select(
            Cm3(demand.required_modulus_cm3),
            self.catalog,
            &beam.current_section,
        )?;

        Ok(BeamResult {
            id: beam.id.clone(),
            story_name: beam.story_name.clone(),
            frame_name: beam.frame_name.clone(),
            length_m: demand.length_m,
            max_moment_knm: demand.max_moment_knm,
            current_section: current.name.clone(),
            required_modulus_cm3: demand.required_modulus_cm3,
            optimal_section: selection.optimal_section_name,
            is_optimal: selection.is_optimal,
            savings_percentage: selection.savings_percentage,
            current_section_properties: current.clone(),
            optimal_section_properties: selection.optimal_section,
        })
    }

    /// Evaluate a batch. Per-beam failures are collected, not propagated.
    pub fn evaluate(&self, beams: &[BeamInput]) -> AnalysisResults {
        let mut results = Vec::with_capacity(beams.len());
        let mut failures = Vec::new();

        for beam in beams {
            match self.evaluate_beam(beam) {
                Ok(result) => {
                    log::debug!(
                        "Beam {}: {} -> {} (Sx_req {:.1} cm³, savings {}%)",
                        result.id,
                        result.current_section,
                        result.optimal_section,
                        result.required_modulus_cm3,
                        result.savings_percentage
                    );
                    results.push(result);
                }
                Err(e) => {
                    log::warn!("Beam {} not evaluated: {}", beam.id, e);
                    failures.push(BeamFailure::new(&beam.id, &e));
                }
            }
        }

        let analysis = AnalysisResults::from_parts(results, failures);
        log::info!(
            "Evaluated {} beams: {} optimal, {} improvable, {} failed, average savings {:.1}%",
            analysis.total_beams,
            analysis.optimal_beams,
            analysis.improvable_beams,
            analysis.failures.len(),
            analysis.average_savings
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    fn evaluator() -> BeamEvaluator<'static> {
        BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap()
    }

    #[test]
    fn test_evaluate_single_beam() {
        // 100 kN·m -> 484.06 cm³; W14X22 (471) falls short, W12X26 (528) wins
        let beam = BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44");
        let result = evaluator().evaluate_beam(&beam).unwrap();

        assert!((result.required_modulus_cm3 - 484.06).abs() < 0.01);
        assert_eq!(result.optimal_section, "W12X26");
        assert!(!result.is_optimal);
        // (65.5 - 38.7) / 65.5 = 40.9% -> 41
        assert_eq!(result.savings_percentage, 41.0);
        assert_eq!(result.current_section_properties.name, "W21X44");
        assert_eq!(result.optimal_section_properties.name, "W12X26");
        assert!(result.current_is_adequate());
    }

    #[test]
    fn test_current_name_is_normalized() {
        let beam = BeamInput::new("b1", "S1", "S1-B1", 5.0, 100.0, "w12x26");
        let result = evaluator().evaluate_beam(&beam).unwrap();
        assert_eq!(result.current_section, "W12X26");
        assert!(result.is_optimal);
    }

    #[test]
    fn test_under_designed_current_is_not_optimal() {
        // 120 kN·m -> 580.9 cm³; W14X22 is inadequate
        let beam = BeamInput::new("b1", "S1", "S1-B1", 5.0, 120.0, "W14X22");
        let result = evaluator().evaluate_beam(&beam).unwrap();
        assert!(!result.current_is_adequate());
        assert!(!result.is_optimal);
        assert_eq!(result.optimal_section, "W16X26");
        assert_eq!(result.savings_percentage, 0.0);
        assert_eq!(result.weight_savings(), Kilograms(0.0));
        assert!(result.current_utilization() > 1.0);
    }

    #[test]
    fn test_invalid_input_recorded() {
        let beams = vec![
            BeamInput::new("neg", "S1", "S1-B1", 5.0, -1.0, "W12X26"),
            BeamInput::new("len", "S1", "S1-B2", 0.0, 50.0, "W12X26"),
            BeamInput::new("ok", "S1", "S1-B3", 5.0, 50.0, "W12X26"),
        ];
        let analysis = evaluator().evaluate(&beams);
        assert_eq!(analysis.total_beams, 1);
        assert_eq!(analysis.failures.len(), 2);
        assert!(analysis.failures.iter().all(|f| f.error_code == "INVALID_INPUT"));
    }

    #[test]
    fn test_no_adequate_section_recorded() {
        let beams = vec![BeamInput::new("huge", "S1", "S1-B1", 9.0, 1000.0, "W24X55")];
        let analysis = evaluator().evaluate(&beams);
        assert!(analysis.results.is_empty());
        assert_eq!(analysis.failures[0].error_code, "NO_ADEQUATE_SECTION");
        assert_eq!(analysis.average_savings, 0.0);
    }

    #[test]
    fn test_summary_counts() {
        let beams = vec![
            BeamInput::new("a", "S1", "S1-B1", 6.0, 100.0, "W12X26"),
            BeamInput::new("b", "S1", "S1-B2", 6.0, 100.0, "W21X44"),
            BeamInput::new("c", "S2", "S2-B1", 6.0, 100.0, "W24X55"),
        ];
        let analysis = evaluator().evaluate(&beams);
        assert_eq!(analysis.total_beams, 3);
        assert_eq!(analysis.optimal_beams, 1);
        assert_eq!(analysis.improvable_beams, 2);
        // (0 + 41 + 53) / 3
        assert!((analysis.average_savings - 94.0 / 3.0).abs() < 1e-9);
        let ids: Vec<&str> = analysis.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_total_weight_savings() {
        let beams = vec![
            BeamInput::new("a", "S1", "S1-B1", 5.0, 100.0, "W21X44"),
            BeamInput::new("b", "S1", "S1-B2", 5.0, 100.0, "W12X26"),
        ];
        let analysis = evaluator().evaluate(&beams);
        // (65.5 - 38.7) * 5.0
        assert!((analysis.total_weight_savings().0 - 134.0).abs() < 1e-9);
        assert!(analysis.get("b").unwrap().is_optimal);
        assert!(analysis.get("zzz").is_none());
    }

    #[test]
    fn test_camel_case_input() {
        let json = r#"{
            "id": "x1", "storyName": "Story2", "frameName": "Story2-B4",
            "length": 7.5, "maxMoment": 210.0, "currentSection": "W18X40"
        }"#;
        let beam: BeamInput = serde_json::from_str(json).unwrap();
        assert_eq!(beam.current_section, "W18X40");
        assert_eq!(beam.length_m, 7.5);
    }

    #[test]
    fn test_result_serialization() {
        let beam = BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44");
        let analysis = evaluator().evaluate(&[beam]);
        let json = serde_json::to_string_pretty(&analysis).unwrap();
        assert!(json.contains("average_savings"));
        assert!(json.contains("optimal_section_properties"));

        let roundtrip: AnalysisResults = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.total_beams, 1);
        assert_eq!(roundtrip.results[0].optimal_section, "W12X26");
        assert!((roundtrip.results[0].required_modulus_cm3 - analysis.results[0].required_modulus_cm3).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = AnalysisSettings::default().with_yield_strength(-345.0);
        assert!(BeamEvaluator::new(builtin_catalog(), settings).is_err());
    }
}
