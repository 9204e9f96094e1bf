//! # Result Queries
//!
//! Filtering and sorting over [`AnalysisResults`] for table views: by story,
//! by section, by optimal/improvable status, and by any displayed column.
//!
//! ```rust
//! use sizing_core::catalog::builtin_catalog;
//! use sizing_core::evaluator::{BeamEvaluator, BeamInput};
//! use sizing_core::query::{ResultFilter, StatusFilter};
//! use sizing_core::settings::AnalysisSettings;
//!
//! let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
//! let analysis = evaluator.evaluate(&[
//!     BeamInput::new("a", "Story1", "Story1-B1", 6.0, 100.0, "W12X26"),
//!     BeamInput::new("b", "Story2", "Story2-B1", 6.0, 100.0, "W24X55"),
//! ]);
//!
//! let filter = ResultFilter { status: StatusFilter::Improvable, ..Default::default() };
//! let improvable = filter.apply(&analysis);
//! assert_eq!(improvable.len(), 1);
//! assert_eq!(improvable[0].id, "b");
//! ```

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SizingError;
use crate::evaluator::{AnalysisResults, BeamResult};

/// Optimal/improvable status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Optimal,
    Improvable,
}

impl FromStr for StatusFilter {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "optimal" => Ok(StatusFilter::Optimal),
            "improvable" => Ok(StatusFilter::Improvable),
            other => Err(SizingError::invalid_input(
                "status",
                other,
                "Expected one of: all, optimal, improvable",
            )),
        }
    }
}

/// Result filter. Empty story/section strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultFilter {
    /// Exact story name
    #[serde(default)]
    pub story: String,

    /// Section name, matched case-insensitively against the current section
    /// and also against the optimal one, so beams that would move to the
    /// section are listed alongside beams already using it
    #[serde(default)]
    pub section: String,

    #[serde(default)]
    pub status: StatusFilter,
}

impl ResultFilter {
    /// Check a single result against the filter
    pub fn matches(&self, result: &BeamResult) -> bool {
        let story_ok = self.story.is_empty() || result.story_name == self.story;
        let section_ok = self.section.is_empty()
            || result.current_section.eq_ignore_ascii_case(&self.section)
            || result.optimal_section.eq_ignore_ascii_case(&self.section);
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Optimal => result.is_optimal,
            StatusFilter::Improvable => !result.is_optimal,
        };
        story_ok && section_ok && status_ok
    }

    /// Matching results, in their original order
    pub fn apply<'a>(&self, analysis: &'a AnalysisResults) -> Vec<&'a BeamResult> {
        analysis.results.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sortable result columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Story,
    Frame,
    CurrentSection,
    OptimalSection,
    Length,
    Moment,
    RequiredModulus,
    Savings,
}

impl FromStr for SortKey {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "id" => Ok(SortKey::Id),
            "story" => Ok(SortKey::Story),
            "frame" => Ok(SortKey::Frame),
            "current_section" | "current" => Ok(SortKey::CurrentSection),
            "optimal_section" | "optimal" => Ok(SortKey::OptimalSection),
            "length" => Ok(SortKey::Length),
            "moment" => Ok(SortKey::Moment),
            "required_modulus" | "sx" => Ok(SortKey::RequiredModulus),
            "savings" => Ok(SortKey::Savings),
            other => Err(SizingError::invalid_input("sort", other, "Unknown sort column")),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

fn compare(a: &BeamResult, b: &BeamResult, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Story => a.story_name.cmp(&b.story_name),
        SortKey::Frame => a.frame_name.cmp(&b.frame_name),
        SortKey::CurrentSection => a.current_section.cmp(&b.current_section),
        SortKey::OptimalSection => a.optimal_section.cmp(&b.optimal_section),
        SortKey::Length => a.length_m.total_cmp(&b.length_m),
        SortKey::Moment => a.max_moment_knm.total_cmp(&b.max_moment_knm),
        SortKey::RequiredModulus => a.required_modulus_cm3.total_cmp(&b.required_modulus_cm3),
        SortKey::Savings => a.savings_percentage.total_cmp(&b.savings_percentage),
    }
}

/// Stable sort by one column
pub fn sort_results(results: &mut [&BeamResult], key: SortKey, direction: SortDirection) {
    results.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Distinct story names, sorted
pub fn stories(analysis: &AnalysisResults) -> Vec<&str> {
    let mut names: Vec<&str> = analysis.results.iter().map(|r| r.story_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Per-story summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySummary {
    pub story_name: String,
    pub total_beams: usize,
    pub optimal_beams: usize,
    pub average_savings: f64,
}

/// Summaries for every story, in story-name order
pub fn story_summaries(analysis: &AnalysisResults) -> Vec<StorySummary> {
    stories(analysis)
        .into_iter()
        .map(|story| {
            let rows: Vec<&BeamResult> = analysis.results.iter().filter(|r| r.story_name == story).collect();
            let total = rows.len();
            StorySummary {
                story_name: story.to_string(),
                total_beams: total,
                optimal_beams: rows.iter().filter(|r| r.is_optimal).count(),
                average_savings: rows.iter().map(|r| r.savings_percentage).sum::<f64>() / total as f64,
            }
        })
        .collect()
}
