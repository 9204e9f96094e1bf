//! # File I/O Module
//!
//! Reading beam batches, catalogs, and settings from disk, and writing
//! analysis reports:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: reports carry a schema version that is checked on load
//! - **Generated ids**: beams with a blank id get a fresh UUID on load
//!
//! ## File Formats
//!
//! | File            | Format                                   |
//! |-----------------|------------------------------------------|
//! | Beam batch      | JSON array of [`BeamInput`]              |
//! | Catalog (JSON)  | JSON array of [`Section`]                |
//! | Catalog (CSV)   | Header row, see [`SectionCatalog::from_csv_str`] |
//! | Settings        | JSON object, see [`AnalysisSettings`]    |
//! | Report          | JSON [`AnalysisReport`]                  |
//!
//! ## Example
//!
//! ```rust,no_run
//! use sizing_core::catalog::builtin_catalog;
//! use sizing_core::evaluator::BeamEvaluator;
//! use sizing_core::file_io::{load_beam_batch, save_report, AnalysisReport};
//! use sizing_core::settings::AnalysisSettings;
//! use std::path::Path;
//!
//! let beams = load_beam_batch(Path::new("beams.json")).unwrap();
//! let settings = AnalysisSettings::default();
//! let evaluator = BeamEvaluator::new(builtin_catalog(), settings).unwrap();
//! let analysis = evaluator.evaluate(&beams);
//!
//! let report = AnalysisReport::new(settings, builtin_catalog().version.clone(), analysis);
//! save_report(&report, Path::new("report.json")).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Section, SectionCatalog};
use crate::errors::{SizingError, SizingResult};
use crate::evaluator::{AnalysisResults, BeamInput};
use crate::settings::AnalysisSettings;

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "0.1.0";

/// Saved analysis run: results plus everything needed to reproduce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Report schema version
    pub version: String,

    /// When the analysis was run
    pub generated_at: DateTime<Utc>,

    /// Catalog version label, if the catalog had one
    #[serde(default)]
    pub catalog_version: Option<String>,

    /// Settings the batch was evaluated with
    pub settings: AnalysisSettings,

    pub analysis: AnalysisResults,
}

impl AnalysisReport {
    /// Wrap results in a report stamped with the current time
    pub fn new(settings: AnalysisSettings, catalog_version: Option<String>, analysis: AnalysisResults) -> Self {
        AnalysisReport {
            version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            catalog_version,
            settings,
            analysis,
        }
    }
}

/// Read a whole file into a string, mapping failures to `FileError`.
fn read_file(path: &Path) -> SizingResult<String> {
    let path_str = path.display().to_string();

    let mut file = File::open(path).map_err(|e| SizingError::file_error("open", &path_str, e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| SizingError::file_error("read", &path_str, e.to_string()))?;

    Ok(contents)
}

/// Parse a beam batch from JSON text. Blank ids are replaced with UUIDs.
pub fn parse_beam_batch(json: &str) -> SizingResult<Vec<BeamInput>> {
    let mut beams: Vec<BeamInput> =
        serde_json::from_str(json).map_err(|e| SizingError::serialization(format!("Invalid beam batch: {}", e)))?;

    for beam in beams.iter_mut().filter(|b| b.id.trim().is_empty()) {
        beam.id = Uuid::new_v4().to_string();
        log::debug!("Assigned id {} to beam {}", beam.id, beam.frame_name);
    }

    Ok(beams)
}

/// Load a beam batch file.
pub fn load_beam_batch(path: &Path) -> SizingResult<Vec<BeamInput>> {
    let contents = read_file(path)?;
    let beams = parse_beam_batch(&contents).map_err(|e| match e {
        SizingError::SerializationError { reason } => {
            SizingError::serialization(format!("{} ({})", reason, path.display()))
        }
        other => other,
    })?;
    log::info!("Loaded {} beams from {}", beams.len(), path.display());
    Ok(beams)
}

/// Catalog version label taken from the file stem (e.g. `aisc-v15.json` -> `aisc-v15`)
fn version_from_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Load a catalog from a JSON array of sections.
///
/// Every entry is validated; duplicates and non-positive properties are
/// rejected with `InvalidCatalogEntry`.
pub fn load_catalog_json(path: &Path) -> SizingResult<SectionCatalog> {
    let contents = read_file(path)?;
    let sections: Vec<Section> = serde_json::from_str(&contents)
        .map_err(|e| SizingError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    let mut catalog = SectionCatalog::from_sections(sections)?;
    if let Some(version) = version_from_stem(path) {
        catalog = catalog.with_version(version);
    }
    log::info!("Loaded {} sections from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog from a CSV table.
pub fn load_catalog_csv(path: &Path) -> SizingResult<SectionCatalog> {
    let contents = read_file(path)?;
    let mut catalog = SectionCatalog::from_csv_str(&contents)?;
    if let Some(version) = version_from_stem(path) {
        catalog = catalog.with_version(version);
    }
    log::info!("Loaded {} sections from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog, choosing the parser from the file extension.
/// Anything other than `.csv` is read as JSON.
pub fn load_catalog(path: &Path) -> SizingResult<SectionCatalog> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        load_catalog_csv(path)
    } else {
        load_catalog_json(path)
    }
}

/// Load analysis settings. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> SizingResult<AnalysisSettings> {
    let contents = read_file(path)?;
    let settings: AnalysisSettings = serde_json::from_str(&contents)
        .map_err(|e| SizingError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    settings.validate()?;
    Ok(settings)
}

/// Save a report with an atomic write.
///
/// The report is written to `<path>.tmp`, synced, then renamed over `path`,
/// so a crash never leaves a half-written report behind.
pub fn save_report(report: &AnalysisReport, path: &Path) -> SizingResult<()> {
    let path_str = path.display().to_string();

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| SizingError::serialization(format!("Failed to serialize report: {}", e)))?;

    let tmp_path = path.with_extension("json.tmp");

    {
        let mut file =
            File::create(&tmp_path).map_err(|e| SizingError::file_error("create", &path_str, e.to_string()))?;

        file.write_all(json.as_bytes())
            .map_err(|e| SizingError::file_error("write", &path_str, e.to_string()))?;

        file.sync_all()
            .map_err(|e| SizingError::file_error("sync", &path_str, e.to_string()))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SizingError::file_error("rename", &path_str, e.to_string())
    })?;

    log::info!("Saved report for {} beams to {}", report.analysis.total_beams, path_str);
    Ok(())
}

/// Load a saved report, checking its schema version.
pub fn load_report(path: &Path) -> SizingResult<AnalysisReport> {
    let contents = read_file(path)?;
    let report: AnalysisReport = serde_json::from_str(&contents)
        .map_err(|e| SizingError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&report.version)?;

    Ok(report)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> SizingResult<()> {
    let mismatch = || SizingError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: REPORT_SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = REPORT_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // On 0.x a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::evaluator::BeamEvaluator;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn sample_report() -> AnalysisReport {
        let settings = AnalysisSettings::default();
        let evaluator = BeamEvaluator::new(builtin_catalog(), settings).unwrap();
        let analysis = evaluator.evaluate(&[
            BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44"),
            BeamInput::new("b2", "Story1", "Story1-B2", 6.0, 100.0, "W99X1"),
        ]);
        AnalysisReport::new(settings, builtin_catalog().version.clone(), analysis)
    }

    #[test]
    fn test_parse_beam_batch_assigns_missing_ids() {
        let json = r#"[
            {"id": "keep", "storyName": "Story1", "frameName": "B1", "length": 6.0, "maxMoment": 100.0, "currentSection": "W12X26"},
            {"story_name": "Story1", "frame_name": "B2", "length_m": 5.0, "max_moment_knm": 80.0, "current_section": "W12X26"},
            {"id": "  ", "story_name": "Story2", "frame_name": "B3", "length_m": 5.0, "max_moment_knm": 80.0, "current_section": "W12X26"}
        ]"#;
        let beams = parse_beam_batch(json).unwrap();
        assert_eq!(beams.len(), 3);
        assert_eq!(beams[0].id, "keep");
        assert!(Uuid::parse_str(&beams[1].id).is_ok());
        assert!(Uuid::parse_str(&beams[2].id).is_ok());
        assert_ne!(beams[1].id, beams[2].id);
    }

    #[test]
    fn test_parse_beam_batch_rejects_bad_json() {
        let err = parse_beam_batch("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_beam_batch(&dir.path().join("missing.json")).unwrap_err();
        match err {
            SizingError::FileError { operation, .. } => assert_eq!(operation, "open"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_load_catalog_json_sets_version() {
        let dir = TempDir::new().unwrap();
        let json = serde_json::to_string(&crate::catalog::builtin_sections()).unwrap();
        let path = write(&dir, "aisc-v15.json", &json);

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), builtin_catalog().len());
        assert_eq!(catalog.version.as_deref(), Some("aisc-v15"));
    }

    #[test]
    fn test_load_catalog_json_rejects_invalid_entry() {
        let dir = TempDir::new().unwrap();
        let mut sections = crate::catalog::builtin_sections();
        sections[0].weight_kg_per_m = 0.0;
        let path = write(&dir, "bad.json", &serde_json::to_string(&sections).unwrap());
        let err = load_catalog_json(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATALOG_ENTRY");
    }

    #[test]
    fn test_load_catalog_csv() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "shapes.CSV",
            "Name,Type,d,bf,A,Ix,Iy,Sx,Sy,Zx,Zy,W\n\
             W12X26,W,310,165,49.4,8180,285,528,53.2,595,82.4,38.7\n\
             W16X26,W,406,140,49.7,13400,187,659,26.7,744,41.5,38.7\n",
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("w16x26"));
        assert_eq!(catalog.version.as_deref(), Some("shapes"));
    }

    #[test]
    fn test_load_settings_defaults_and_validation() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "settings.json", r#"{"yieldStrength": 250.0}"#);
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.yield_strength_mpa, 250.0);
        assert_eq!(settings.safety_factor, crate::settings::DEFAULT_SAFETY_FACTOR);

        let bad = write(&dir, "bad.json", r#"{"safety_factor": -1.0}"#);
        assert!(load_settings(&bad).is_err());
    }

    #[test]
    fn test_save_and_load_report_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let report = sample_report();
        save_report(&report, &path).unwrap();
        assert!(path.exists());

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.version, REPORT_SCHEMA_VERSION);
        assert_eq!(loaded.generated_at, report.generated_at);
        assert_eq!(loaded.catalog_version, report.catalog_version);
        assert_eq!(loaded.analysis.total_beams, 1);
        assert_eq!(loaded.analysis.failures.len(), 1);
        assert_eq!(loaded.analysis.results[0].optimal_section, "W12X26");
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        save_report(&sample_report(), &path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_report_rejects_newer_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let mut report = sample_report();
        report.version = "0.9.0".to_string();
        save_report(&report, &path).unwrap();

        let err = load_report(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.5").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
