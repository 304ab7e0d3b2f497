//! Integration tests for the modal and nonlinear drivers

use approx::assert_relative_eq;
use frame_solver::prelude::*;

/// Discretized cantilever with a fixed base
fn cantilever(length: f64, segments: usize, section: Section) -> Model {
    let mut model = Model::new();
    model
        .add_node("N0", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
        .unwrap();
    for s in 1..=segments {
        let x = length * s as f64 / segments as f64;
        model
            .add_node(&format!("N{}", s), Node::new(x, 0.0, 0.0))
            .unwrap();
    }
    for s in 0..segments {
        model
            .add_element(
                &format!("E{}", s),
                Element::new(
                    &format!("N{}", s),
                    &format!("N{}", s + 1),
                    Material::steel(),
                    section.clone(),
                ),
            )
            .unwrap();
    }
    model
}

/// Cantilever fundamental frequency vs the Euler-Bernoulli closed form
#[test]
fn cantilever_fundamental_frequency() {
    let length = 2.0;
    let section = Section::rectangular(0.1, 0.1);
    let material = Material::steel();
    let model = cantilever(length, 4, section.clone());

    let mut analyzer = Analyzer::with_options(&model, AnalysisOptions::default().with_num_modes(2));
    let results = analyzer.run_modal().unwrap();
    let modes = results.modal.unwrap().modes;

    // omega_1 = 1.8751^2 * sqrt(E I / (rho A L^4))
    let omega = 1.875_104_f64.powi(2)
        * (material.e * section.iz / (material.rho * section.a * length.powi(4))).sqrt();
    let expected = omega / (2.0 * std::f64::consts::PI);

    assert_relative_eq!(modes[0].frequency, expected, max_relative = 0.01);
    assert!(modes[0].period > 0.0);

    // A square section bends equally easily in both planes, so the second
    // mode is the same frequency in the other plane
    assert_relative_eq!(modes[1].frequency, expected, max_relative = 0.01);
}

/// Mode shapes come back mass-normalized and keyed by node
#[test]
fn mode_shapes_cover_all_nodes() {
    let model = cantilever(3.0, 3, Section::rectangular(0.15, 0.3));

    let mut analyzer = Analyzer::with_options(&model, AnalysisOptions::default().with_num_modes(3));
    let results = analyzer.run_modal().unwrap();

    for mode in &results.modal.unwrap().modes {
        assert_eq!(mode.shape.len(), model.node_count());
        // The fixed base never moves
        assert_eq!(mode.shape["N0"], [0.0; 6]);
    }
}

/// Without geometric effects, a converged nonlinear run reproduces the
/// linear solution
#[test]
fn nonlinear_reduces_to_linear() {
    let mut model = cantilever(4.0, 2, Section::rectangular(0.2, 0.4));
    model
        .add_load_case(
            LoadCase::new("Tip", LoadCategory::Live).with_node_load("N2", NodeLoad::fy(-30_000.0)),
        )
        .unwrap();

    let linear = Analyzer::new(&model).run_linear_static("Tip").unwrap();
    let nonlinear = Analyzer::new(&model).run_nonlinear("Tip").unwrap();

    let record = nonlinear.nonlinear.unwrap();
    assert!(record.converged);

    for (id, expected) in &linear.node_displacements {
        let got = nonlinear.node_displacements[id];
        assert_relative_eq!(got.dy, expected.dy, epsilon = 1e-12, max_relative = 1e-9);
    }
}

/// Exhausting the iteration cap reports non-convergence instead of erroring
#[test]
fn non_convergence_is_reported_not_raised() {
    let mut model = cantilever(4.0, 2, Section::rectangular(0.2, 0.4));
    model
        .add_load_case(
            LoadCase::new("Tip", LoadCategory::Live).with_node_load("N2", NodeLoad::fy(-30_000.0)),
        )
        .unwrap();

    let options = AnalysisOptions::default()
        .with_tolerance(0.0)
        .with_max_iterations(3);
    let mut analyzer = Analyzer::with_options(&model, options);

    let results = analyzer.run_nonlinear("Tip").unwrap();
    let record = results.nonlinear.unwrap();

    assert!(!record.converged);
    assert_eq!(record.iterations, 3);
    assert!(record.residual_norm.is_finite());
    // The displacement field is still usable
    assert!(results.node_displacements["N2"].dy < 0.0);
}

/// Models serialize to JSON and back without losing analysis behavior
#[test]
fn model_survives_json_round_trip() {
    let mut model = cantilever(3.0, 2, Section::rectangular(0.2, 0.3));
    model
        .add_load_case(
            LoadCase::new("Tip", LoadCategory::Live)
                .with_node_load("N2", NodeLoad::fy(-10_000.0))
                .with_element_load("E0", ElementLoad::distributed(-2_000.0, LoadAxis::Y)),
        )
        .unwrap();

    let json = serde_json::to_string(&model).unwrap();
    let restored: Model = serde_json::from_str(&json).unwrap();

    let original = Analyzer::new(&model).run_linear_static("Tip").unwrap();
    let round_tripped = Analyzer::new(&restored).run_linear_static("Tip").unwrap();

    assert_eq!(original.node_displacements, round_tripped.node_displacements);
    assert_eq!(original.reactions, round_tripped.reactions);
}
