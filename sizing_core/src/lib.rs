//! # sizing_core - Steel Beam Section Sizing Engine
//!
//! `sizing_core` takes beam forces from an upstream structural analysis and
//! finds, for every beam, the lightest standard section whose strong-axis
//! elastic modulus carries the peak moment at the allowable stress. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the catalog is read-only and evaluation has no side effects
//! - **Deterministic**: identical inputs give identical results, tie-breaks included
//! - **Rich Errors**: structured error types, per-beam failures kept apart from results
//!
//! ## Quick Start
//!
//! ```rust
//! use sizing_core::{builtin_catalog, AnalysisSettings, BeamEvaluator, BeamInput};
//!
//! let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
//! let analysis = evaluator.evaluate(&[
//!     BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44"),
//! ]);
//!
//! let result = &analysis.results[0];
//! assert_eq!(result.optimal_section, "W12X26");
//! assert_eq!(result.savings_percentage, 41.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Section properties and the read-only section catalog
//! - [`demand`] - Required section modulus from bending moment
//! - [`selector`] - Lightest adequate section search
//! - [`evaluator`] - Batch evaluation and summary
//! - [`query`] - Filtering and sorting of results
//! - [`settings`] - Material and selection settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Batch/catalog loading and atomic report saves

pub mod catalog;
pub mod demand;
pub mod errors;
pub mod evaluator;
pub mod file_io;
pub mod query;
pub mod selector;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{builtin_catalog, Section, SectionCatalog, ShapeType};
pub use demand::{required_modulus, BeamDemand, DemandCalculator};
pub use errors::{SizingError, SizingResult};
pub use evaluator::{AnalysisResults, BeamEvaluator, BeamFailure, BeamInput, BeamResult};
pub use file_io::{load_beam_batch, load_catalog, load_report, save_report, AnalysisReport};
pub use selector::{select_optimal, OptimalSelection, SectionSelector};
pub use settings::AnalysisSettings;
