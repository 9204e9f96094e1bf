use sizing_core::catalog::{builtin_catalog, Section, SectionCatalog, ShapeType};
use sizing_core::evaluator::{BeamEvaluator, BeamInput};
use sizing_core::selector::select_optimal;
use sizing_core::settings::AnalysisSettings;
use sizing_core::units::Cm3;
use sizing_core::SizingError;

fn section(name: &str, weight: f64, sx: f64) -> Section {
    Section {
        name: name.to_string(),
        shape_type: ShapeType::W,
        depth_mm: 350.0,
        width_mm: 170.0,
        area_cm2: 55.0,
        moment_of_inertia_x_cm4: 10_000.0,
        moment_of_inertia_y_cm4: 400.0,
        section_modulus_x_cm3: sx,
        section_modulus_y_cm3: 60.0,
        plastic_modulus_x_cm3: sx * 1.12,
        plastic_modulus_y_cm3: 95.0,
        weight_kg_per_m: weight,
    }
}

fn ab_catalog() -> SectionCatalog {
    SectionCatalog::from_sections(vec![section("A", 40.0, 500.0), section("B", 50.0, 700.0)])
        .expect("valid two-section catalog")
}

#[test]
fn lighter_inadequate_section_is_skipped() {
    let selection = select_optimal(Cm3(600.0), &ab_catalog(), "A").unwrap();
    assert_eq!(selection.optimal_section_name, "B");
    assert!(!selection.is_optimal);
}

#[test]
fn zero_requirement_selects_lightest_overall() {
    let selection = select_optimal(Cm3(0.0), &ab_catalog(), "A").unwrap();
    assert_eq!(selection.optimal_section_name, "A");
    assert!(selection.is_optimal);
    assert_eq!(selection.savings_percentage, 0.0);
}

#[test]
fn oversized_demand_fails_only_that_beam() {
    let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
    let analysis = evaluator.evaluate(&[
        BeamInput::new("ok", "Story1", "Story1-B1", 6.0, 120.0, "W18X35"),
        BeamInput::new("huge", "Story1", "Story1-B2", 12.0, 1000.0, "W24X55"),
    ]);

    assert_eq!(analysis.total_beams, 1);
    assert!(analysis.get("huge").is_none());
    assert_eq!(analysis.failures.len(), 1);
    assert_eq!(analysis.failures[0].beam_id, "huge");
    assert_eq!(analysis.failures[0].error_code, "NO_ADEQUATE_SECTION");

    let err = select_optimal(Cm3(5000.0), builtin_catalog(), "W24X55").unwrap_err();
    assert!(matches!(err, SizingError::NoAdequateSection { largest_available_cm3, .. } if largest_available_cm3 == 2230.0));
}

#[test]
fn unknown_section_does_not_stop_the_batch() {
    let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
    let analysis = evaluator.evaluate(&[
        BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44"),
        BeamInput::new("b2", "Story1", "Story1-B2", 6.0, 100.0, "HSS8X8X1/2"),
        BeamInput::new("b3", "Story2", "Story2-B1", 6.0, 250.0, "W21X44"),
    ]);

    let ids: Vec<&str> = analysis.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b3"]);
    assert_eq!(analysis.failures.len(), 1);
    assert_eq!(analysis.failures[0].beam_id, "b2");
    assert_eq!(analysis.failures[0].error_code, "SECTION_NOT_FOUND");
    assert!(analysis.failures[0].reason.contains("HSS8X8X1/2"));
}

#[test]
fn weight_tie_goes_to_closer_fit() {
    let catalog = SectionCatalog::from_sections(vec![
        section("S650", 45.0, 650.0),
        section("S600", 45.0, 600.0),
        section("S900", 70.0, 900.0),
    ])
    .unwrap();

    let selection = select_optimal(Cm3(550.0), &catalog, "S900").unwrap();
    assert_eq!(selection.optimal_section_name, "S600");
    // (70 - 45) / 70 = 35.7%
    assert_eq!(selection.savings_percentage, 36.0);
}

#[test]
fn zero_moment_beam() {
    let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
    let analysis = evaluator.evaluate(&[
        BeamInput::new("lightest", "Roof", "Roof-B1", 4.0, 0.0, "W14X22"),
        BeamInput::new("heavier", "Roof", "Roof-B2", 4.0, 0.0, "W12X26"),
    ]);

    let lightest = analysis.get("lightest").unwrap();
    assert_eq!(lightest.required_modulus_cm3, 0.0);
    assert!(lightest.is_optimal);
    assert_eq!(lightest.savings_percentage, 0.0);

    let heavier = analysis.get("heavier").unwrap();
    assert_eq!(heavier.optimal_section, "W14X22");
    assert!(!heavier.is_optimal);
    // (38.7 - 32.9) / 38.7 = 14.99%
    assert_eq!(heavier.savings_percentage, 15.0);
}

#[test]
fn repeated_evaluation_is_identical() {
    let evaluator = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
    let beams = vec![
        BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 100.0, "W21X44"),
        BeamInput::new("b2", "Story1", "Story1-B2", 5.5, 180.0, "W24X55"),
        BeamInput::new("b3", "Story2", "Story2-B1", 7.0, 75.0, "W12X30"),
    ];
    assert_eq!(evaluator.evaluate(&beams), evaluator.evaluate(&beams));
}

#[test]
fn lower_grade_steel_changes_selection() {
    let beam = BeamInput::new("b1", "Story1", "Story1-B1", 6.0, 120.0, "W24X55");

    let grade50 = BeamEvaluator::new(builtin_catalog(), AnalysisSettings::default()).unwrap();
    let grade36 = BeamEvaluator::new(
        builtin_catalog(),
        AnalysisSettings::default().with_yield_strength(250.0),
    )
    .unwrap();

    let a = grade50.evaluate_beam(&beam).unwrap();
    let b = grade36.evaluate_beam(&beam).unwrap();
    assert_eq!(a.optimal_section, "W16X26");
    // 120e6 / (250 / 1.67) / 1000 = 801.6 cm³
    assert_eq!(b.optimal_section, "W18X35");
    assert!(b.required_modulus_cm3 > a.required_modulus_cm3);
}
