//! # Sizing CLI
//!
//! Command-line front end for sizing_core: evaluate a beam batch, list the
//! section catalog, or run a one-shot selection.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-beam output.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use sizing_core::catalog::builtin_catalog;
use sizing_core::errors::SizingResult;
use sizing_core::evaluator::{AnalysisResults, BeamEvaluator, BeamResult};
use sizing_core::file_io::{load_beam_batch, load_catalog, load_settings, save_report, AnalysisReport};
use sizing_core::query::{sort_results, ResultFilter, SortDirection, SortKey, StatusFilter};
use sizing_core::selector::SectionSelector;
use sizing_core::settings::AnalysisSettings;
use sizing_core::units::Cm3;
use sizing_core::SectionCatalog;

#[derive(Parser, Debug)]
#[command(name = "sizing")]
#[command(version)]
#[command(about = "Steel beam section sizing - lightest adequate section per beam")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Section catalog (JSON array or CSV). Defaults to the built-in W shapes.
    #[arg(short, long, global = true, env = "SIZING_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a batch of beams
    Analyze {
        /// Beam batch (JSON array)
        beams: PathBuf,

        /// Settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Yield strength Fy (MPa), overrides the settings file
        #[arg(long)]
        yield_strength: Option<f64>,

        /// Safety factor, overrides the settings file
        #[arg(long)]
        safety_factor: Option<f64>,

        /// Only show beams on this story
        #[arg(long)]
        story: Option<String>,

        /// Only show beams whose current or optimal section matches
        #[arg(long)]
        section: Option<String>,

        /// all, optimal, or improvable
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Sort column (id, story, frame, current, optimal, length, moment, sx, savings)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Save the report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List catalog sections
    Sections {
        /// Only sections whose name starts with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Select the lightest section for a required modulus
    Select {
        /// Required elastic section modulus (cm³)
        required_modulus_cm3: f64,

        /// Section currently specified, for the savings comparison
        #[arg(long)]
        current: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            log::debug!("Error JSON:\n{}", json);
        }
        process::exit(1);
    }
}

fn run(args: Args) -> SizingResult<()> {
    let loaded;
    let catalog: &SectionCatalog = match &args.catalog {
        Some(path) => {
            loaded = load_catalog(path)?;
            &loaded
        }
        None => builtin_catalog(),
    };

    match args.command {
        Commands::Analyze {
            beams,
            settings,
            yield_strength,
            safety_factor,
            story,
            section,
            status,
            sort,
            desc,
            json,
            output,
        } => {
            let mut settings = match settings {
                Some(path) => load_settings(&path)?,
                None => AnalysisSettings::default(),
            };
            if let Some(fy) = yield_strength {
                settings = settings.with_yield_strength(fy);
            }
            if let Some(omega) = safety_factor {
                settings = settings.with_safety_factor(omega);
            }

            let inputs = load_beam_batch(&beams)?;
            let evaluator = BeamEvaluator::new(catalog, settings)?;
            let analysis = evaluator.evaluate(&inputs);
            let report = AnalysisReport::new(settings, catalog.version.clone(), analysis);

            if let Some(path) = output {
                save_report(&report, &path)?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let filter = ResultFilter {
                story: story.unwrap_or_default(),
                section: section.unwrap_or_default(),
                status,
            };
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            print_analysis(&report, &filter, sort, direction, &beams);
        }
        Commands::Sections { prefix } => {
            let sections = match prefix {
                Some(prefix) => catalog.search(&prefix),
                None => catalog.all().collect(),
            };
            println!(
                "{:<10} {:>4} {:>8} {:>8} {:>10} {:>10}",
                "Section", "Type", "d (mm)", "w kg/m", "Sx cm³", "Ix cm⁴"
            );
            for s in sections {
                println!(
                    "{:<10} {:>4} {:>8.0} {:>8.1} {:>10.0} {:>10.0}",
                    s.name,
                    s.shape_type.code(),
                    s.depth_mm,
                    s.weight_kg_per_m,
                    s.section_modulus_x_cm3,
                    s.moment_of_inertia_x_cm4
                );
            }
        }
        Commands::Select {
            required_modulus_cm3,
            current,
        } => {
            let required = Cm3(required_modulus_cm3);
            let selector = SectionSelector::default();
            match current {
                Some(name) => {
                    let selection = selector.select(required, catalog, &name)?;
                    println!("Required Sx: {:.1} cm³", required.value());
                    println!("Optimal:     {}", selection.optimal_section);
                    println!(
                        "Current:     {} {}",
                        name,
                        status_icon(selection.is_optimal)
                    );
                    println!("Savings:     {:.0}%", selection.savings_percentage);
                }
                None => {
                    let section = selector.lightest_adequate(required, catalog)?;
                    println!("Required Sx: {:.1} cm³", required.value());
                    println!("Optimal:     {}", section);
                }
            }
        }
    }

    Ok(())
}

fn print_analysis(
    report: &AnalysisReport,
    filter: &ResultFilter,
    sort: Option<SortKey>,
    direction: SortDirection,
    source: &Path,
) {
    let analysis: &AnalysisResults = &report.analysis;

    println!("═══════════════════════════════════════");
    println!("  BEAM SIZING RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:      {}", source.display());
    println!(
        "Catalog:    {}",
        report.catalog_version.as_deref().unwrap_or("(unversioned)")
    );
    println!(
        "Material:   Fy = {:.0} MPa, Ω = {:.2} (allowable {:.1} MPa)",
        report.settings.yield_strength_mpa,
        report.settings.safety_factor,
        report.settings.allowable_stress().value()
    );
    println!();
    println!("Summary:");
    println!("  Beams evaluated:  {}", analysis.total_beams);
    println!("  Already optimal:  {}", analysis.optimal_beams);
    println!("  Improvable:       {}", analysis.improvable_beams);
    println!("  Average savings:  {:.1}%", analysis.average_savings);
    println!("  Steel saved:      {:.0} kg", analysis.total_weight_savings().value());
    println!();

    let mut rows: Vec<&BeamResult> = filter.apply(analysis);
    if let Some(key) = sort {
        sort_results(&mut rows, key, direction);
    }

    println!(
        "{:<10} {:<14} {:>7} {:>9} {:>10} {:<10} {:<10} {:>7}",
        "Story", "Frame", "L (m)", "M (kN·m)", "Sx req", "Current", "Optimal", "Savings"
    );
    for r in &rows {
        println!(
            "{:<10} {:<14} {:>7.2} {:>9.1} {:>10.1} {:<10} {:<10} {:>6.0}% {}",
            r.story_name,
            r.frame_name,
            r.length_m,
            r.max_moment_knm,
            r.required_modulus_cm3,
            r.current_section,
            r.optimal_section,
            r.savings_percentage,
            status_icon(r.is_optimal)
        );
    }
    if rows.len() != analysis.results.len() {
        println!("({} of {} beams shown)", rows.len(), analysis.results.len());
    }

    if analysis.has_failures() {
        println!();
        println!("Failures:");
        for f in &analysis.failures {
            println!("  {} [{}] {}", f.beam_id, f.error_code, f.reason);
        }
    }
    println!("═══════════════════════════════════════");
}

fn status_icon(optimal: bool) -> &'static str {
    if optimal { "[OK]" } else { "[IMPROVE]" }
}
