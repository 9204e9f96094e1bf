//! # Section Catalog
//!
//! Registry of standard steel sections and their geometric/mechanical
//! properties. A catalog is built once, validated as a whole, and is read-only
//! afterwards, so it can be shared by reference across evaluations.
//!
//! ## Built-in Sections
//!
//! [`builtin_catalog`] returns a process-wide catalog of common wide flange
//! beams (W12X26 through W24X55) in SI units. Custom catalogs can be loaded
//! from CSV or JSON (see [`crate::file_io`]) or assembled in code with
//! [`SectionCatalog::from_sections`].
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::catalog::builtin_catalog;
//!
//! let catalog = builtin_catalog();
//! let w21 = catalog.lookup("W21X44").unwrap();
//!
//! println!("Sx = {} cm³", w21.section_modulus_x_cm3);
//! println!("w = {} kg/m", w21.weight_kg_per_m);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{SizingError, SizingResult};
use crate::units::{Cm3, KgPerM};

/// Steel shape type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeType {
    /// Wide flange beam (W-shape)
    #[default]
    W,
    /// Miscellaneous shape (M-shape)
    M,
    /// American Standard beam (S-shape)
    S,
    /// H-pile (HP-shape)
    HP,
    /// American Standard channel (C-shape)
    C,
}

impl ShapeType {
    /// Parse from a type code ("W", "HP", ...)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "W" => Some(ShapeType::W),
            "M" => Some(ShapeType::M),
            "S" => Some(ShapeType::S),
            "HP" => Some(ShapeType::HP),
            "C" => Some(ShapeType::C),
            _ => None,
        }
    }

    /// Short type code, the inverse of [`ShapeType::from_code`]
    pub fn code(&self) -> &'static str {
        match self {
            ShapeType::W => "W",
            ShapeType::M => "M",
            ShapeType::S => "S",
            ShapeType::HP => "HP",
            ShapeType::C => "C",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::W => "Wide Flange (W)",
            ShapeType::M => "Miscellaneous (M)",
            ShapeType::S => "American Standard (S)",
            ShapeType::HP => "H-Pile (HP)",
            ShapeType::C => "Channel (C)",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Standard structural section with its section properties.
///
/// Units are SI: dimensions in mm, area in cm², inertia in cm⁴, moduli in cm³
/// and weight in kg/m. Field aliases accept the camelCase names used by the
/// dashboard's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog key (e.g., "W21X44")
    pub name: String,

    /// Shape family
    #[serde(default, rename = "type", alias = "shape_type")]
    pub shape_type: ShapeType,

    /// Overall depth (mm)
    #[serde(alias = "depth")]
    pub depth_mm: f64,

    /// Flange width (mm)
    #[serde(alias = "width")]
    pub width_mm: f64,

    /// Cross-sectional area (cm²)
    #[serde(alias = "area")]
    pub area_cm2: f64,

    /// Moment of inertia about X-axis (cm⁴)
    #[serde(alias = "momentOfInertiaX")]
    pub moment_of_inertia_x_cm4: f64,

    /// Moment of inertia about Y-axis (cm⁴)
    #[serde(alias = "momentOfInertiaY")]
    pub moment_of_inertia_y_cm4: f64,

    /// Elastic section modulus about X-axis (cm³). Governs strong-axis bending.
    #[serde(alias = "sectionModulusX")]
    pub section_modulus_x_cm3: f64,

    /// Elastic section modulus about Y-axis (cm³)
    #[serde(alias = "sectionModulusY")]
    pub section_modulus_y_cm3: f64,

    /// Plastic section modulus about X-axis (cm³)
    #[serde(alias = "plasticModulusX")]
    pub plastic_modulus_x_cm3: f64,

    /// Plastic section modulus about Y-axis (cm³)
    #[serde(alias = "plasticModulusY")]
    pub plastic_modulus_y_cm3: f64,

    /// Mass per unit length (kg/m)
    #[serde(alias = "weight")]
    pub weight_kg_per_m: f64,
}

impl Section {
    /// Strong-axis elastic section modulus
    pub fn sx(&self) -> Cm3 {
        Cm3(self.section_modulus_x_cm3)
    }

    /// Linear weight
    pub fn weight(&self) -> KgPerM {
        KgPerM(self.weight_kg_per_m)
    }

    /// Check whether this section provides at least the required modulus
    pub fn is_adequate_for(&self, required: Cm3) -> bool {
        self.sx() >= required
    }

    /// Check the catalog invariants: non-empty name, every numeric property
    /// finite and strictly positive.
    pub fn validate(&self) -> SizingResult<()> {
        if self.name.trim().is_empty() {
            return Err(SizingError::invalid_catalog_entry("", "Section name is empty"));
        }

        let properties = [
            ("depth_mm", self.depth_mm),
            ("width_mm", self.width_mm),
            ("area_cm2", self.area_cm2),
            ("moment_of_inertia_x_cm4", self.moment_of_inertia_x_cm4),
            ("moment_of_inertia_y_cm4", self.moment_of_inertia_y_cm4),
            ("section_modulus_x_cm3", self.section_modulus_x_cm3),
            ("section_modulus_y_cm3", self.section_modulus_y_cm3),
            ("plastic_modulus_x_cm3", self.plastic_modulus_x_cm3),
            ("plastic_modulus_y_cm3", self.plastic_modulus_y_cm3),
            ("weight_kg_per_m", self.weight_kg_per_m),
        ];

        for (field, value) in properties {
            if !value.is_finite() || value <= 0.0 {
                return Err(SizingError::invalid_catalog_entry(
                    &self.name,
                    format!("{} must be positive, got {}", field, value),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (w={:.1} kg/m, Sx={:.0} cm³, Ix={:.0} cm⁴)",
            self.name, self.weight_kg_per_m, self.section_modulus_x_cm3, self.moment_of_inertia_x_cm4
        )
    }
}

/// Immutable registry of sections keyed by upper-cased name.
///
/// Iteration order is by key, so listings and selections never depend on
/// the order the sections were supplied in.
#[derive(Debug, Clone, Default)]
pub struct SectionCatalog {
    sections: BTreeMap<String, Section>,

    /// Catalog version or source tag (e.g., "builtin-w-shapes")
    pub version: Option<String>,
}

impl SectionCatalog {
    /// Build a catalog, validating every entry.
    ///
    /// Fails with [`SizingError::InvalidCatalogEntry`] on the first invalid
    /// or duplicate section; no partial catalog is returned.
    pub fn from_sections<I>(sections: I) -> SizingResult<Self>
    where
        I: IntoIterator<Item = Section>,
    {
        let mut catalog = SectionCatalog::default();
        for section in sections {
            section.validate()?;
            let key = section.name.trim().to_uppercase();
            if catalog.sections.contains_key(&key) {
                return Err(SizingError::invalid_catalog_entry(
                    &section.name,
                    "Duplicate section name",
                ));
            }
            catalog.sections.insert(key, section);
        }
        log::debug!("Section catalog built with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Attach a version tag
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse a catalog from CSV text.
    ///
    /// The header row is matched case-insensitively. Every property column is
    /// required: `Name`, `d`, `bf`, `A`, `Ix`, `Iy`, `Sx`, `Sy`, `Zx`, `Zy`, `W`.
    /// `Type` is optional and defaults to W. A missing column fails with
    /// `SerializationError` naming it; blank or non-numeric values fail
    /// catalog validation.
    pub fn from_csv_str(text: &str) -> SizingResult<Self> {
        let mut lines = text.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| SizingError::serialization("CSV catalog is empty"))?;

        let headers: Vec<&str> = header_line.split(',').map(|h| h.trim()).collect();
        let col_index = |names: &[&str]| -> Option<usize> {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let required = |names: &[&str]| -> SizingResult<usize> {
            col_index(names)
                .ok_or_else(|| SizingError::serialization(format!("CSV catalog missing '{}' column", names[0])))
        };

        let name_idx = required(&["Name", "AISC_Manual_Label"])?;
        let d_idx = required(&["d", "depth"])?;
        let bf_idx = required(&["bf", "width"])?;
        let a_idx = required(&["A", "area"])?;
        let ix_idx = required(&["Ix", "momentOfInertiaX"])?;
        let iy_idx = required(&["Iy", "momentOfInertiaY"])?;
        let sx_idx = required(&["Sx", "sectionModulusX"])?;
        let sy_idx = required(&["Sy", "sectionModulusY"])?;
        let zx_idx = required(&["Zx", "plasticModulusX"])?;
        let zy_idx = required(&["Zy", "plasticModulusY"])?;
        let w_idx = required(&["W", "weight"])?;
        let type_idx = col_index(&["Type"]);

        let mut sections = Vec::new();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            let name = fields.get(name_idx).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                continue;
            }

            let get_f64 = |idx: usize| -> f64 {
                fields.get(idx).and_then(|v| parse_optional_f64(v)).unwrap_or(0.0)
            };

            let shape_type = match type_idx.and_then(|i| fields.get(i)) {
                Some(code) if !code.trim().is_empty() => ShapeType::from_code(code).ok_or_else(|| {
                    SizingError::invalid_catalog_entry(name, format!("Unknown shape type '{}'", code.trim()))
                })?,
                _ => ShapeType::default(),
            };

            sections.push(Section {
                name: name.to_string(),
                shape_type,
                depth_mm: get_f64(d_idx),
                width_mm: get_f64(bf_idx),
                area_cm2: get_f64(a_idx),
                moment_of_inertia_x_cm4: get_f64(ix_idx),
                moment_of_inertia_y_cm4: get_f64(iy_idx),
                section_modulus_x_cm3: get_f64(sx_idx),
                section_modulus_y_cm3: get_f64(sy_idx),
                plastic_modulus_x_cm3: get_f64(zx_idx),
                plastic_modulus_y_cm3: get_f64(zy_idx),
                weight_kg_per_m: get_f64(w_idx),
            });
        }

        SectionCatalog::from_sections(sections)
    }

    /// Look up a section by name (case-insensitive)
    pub fn lookup(&self, name: &str) -> SizingResult<&Section> {
        self.sections
            .get(&name.trim().to_uppercase())
            .ok_or_else(|| SizingError::section_not_found(name))
    }

    /// Check whether a section name is present
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(&name.trim().to_uppercase())
    }

    /// Iterate over all sections, ordered by name
    pub fn all(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.values()
    }

    /// Get all sections of a specific type
    pub fn shapes_of_type(&self, shape_type: ShapeType) -> Vec<&Section> {
        self.all().filter(|s| s.shape_type == shape_type).collect()
    }

    /// Search for sections whose name starts with a prefix (e.g., "W18")
    pub fn search(&self, prefix: &str) -> Vec<&Section> {
        let prefix = prefix.trim().to_uppercase();
        self.sections
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v)
            .collect()
    }

    /// Largest strong-axis modulus available, if any
    pub fn largest_modulus(&self) -> Option<Cm3> {
        self.all().map(|s| s.sx()).reduce(|a, b| if b > a { b } else { a })
    }

    /// Get the number of sections in the catalog
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse an optional f64 from a CSV field
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    f64::from_str(trimmed).ok()
}

// ============================================================================
// Built-in Sections
// ============================================================================

/// Common wide flange beams in SI units.
///
/// Columns: name, d (mm), bf (mm), A (cm²), Ix, Iy (cm⁴), Sx, Sy, Zx, Zy (cm³), w (kg/m)
const BUILTIN_W_SHAPES: [(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64); 10] = [
    ("W12X26", 310.0, 165.0, 49.4, 8180.0, 285.0, 528.0, 53.2, 595.0, 82.4, 38.7),
    ("W12X30", 312.0, 166.0, 56.8, 9440.0, 301.0, 607.0, 56.3, 684.0, 86.8, 44.5),
    ("W14X22", 356.0, 127.0, 41.9, 8360.0, 148.0, 471.0, 23.3, 533.0, 36.1, 32.9),
    ("W16X26", 406.0, 140.0, 49.7, 13400.0, 187.0, 659.0, 26.7, 744.0, 41.5, 38.7),
    ("W16X31", 406.0, 140.0, 58.8, 15700.0, 221.0, 774.0, 31.5, 873.0, 48.9, 46.1),
    ("W18X35", 457.0, 152.0, 66.5, 23000.0, 317.0, 1010.0, 41.7, 1140.0, 64.1, 52.1),
    ("W18X40", 459.0, 153.0, 75.9, 26200.0, 341.0, 1140.0, 44.6, 1290.0, 68.6, 59.5),
    ("W21X44", 533.0, 165.0, 83.9, 39400.0, 449.0, 1480.0, 54.5, 1650.0, 84.1, 65.5),
    ("W21X50", 528.0, 166.0, 95.0, 43700.0, 512.0, 1650.0, 61.7, 1860.0, 95.0, 74.4),
    ("W24X55", 610.0, 178.0, 103.9, 67800.0, 656.0, 2230.0, 73.7, 2500.0, 113.0, 81.6),
];

/// Version tag of the built-in catalog
pub const BUILTIN_CATALOG_VERSION: &str = "builtin-w-shapes";

/// The built-in wide flange sections as owned values
pub fn builtin_sections() -> Vec<Section> {
    BUILTIN_W_SHAPES
        .iter()
        .map(|&(name, d, bf, a, ix, iy, sx, sy, zx, zy, w)| Section {
            name: name.to_string(),
            shape_type: ShapeType::W,
            depth_mm: d,
            width_mm: bf,
            area_cm2: a,
            moment_of_inertia_x_cm4: ix,
            moment_of_inertia_y_cm4: iy,
            section_modulus_x_cm3: sx,
            section_modulus_y_cm3: sy,
            plastic_modulus_x_cm3: zx,
            plastic_modulus_y_cm3: zy,
            weight_kg_per_m: w,
        })
        .collect()
}

// Validated like any other catalog; a bad row in the table panics on first use.
static BUILTIN_CATALOG: Lazy<SectionCatalog> = Lazy::new(|| {
    SectionCatalog::from_sections(builtin_sections())
        .expect("built-in section table must pass catalog validation")
        .with_version(BUILTIN_CATALOG_VERSION)
});

/// Process-wide built-in catalog, initialized on first use.
pub fn builtin_catalog() -> &'static SectionCatalog {
    &BUILTIN_CATALOG
}
