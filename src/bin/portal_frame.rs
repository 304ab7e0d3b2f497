//! Frame Solver Example - Simple Portal Frame

use anyhow::Result;
use frame_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Portal Frame ===\n");

    let mut model = Model::new();

    // Create a simple portal frame
    //
    //     N3 -------- N4
    //     |          |
    //     |          |
    //     |          |
    //     N1        N2
    //     ^          ^
    //   Fixed     Fixed
    //

    let height = 4.0; // 4m column height
    let span = 6.0; // 6m beam span

    model.add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))?;
    model.add_node("N2", Node::new(span, 0.0, 0.0).with_support(Support::fixed()))?;
    model.add_node("N3", Node::new(0.0, height, 0.0))?;
    model.add_node("N4", Node::new(span, height, 0.0))?;

    // W12x26 (approximate properties, SI units)
    let section = Section::new(0.00494, 8.49e-5, 7.2e-6, 1.25e-7, 2.78e-4, 6.3e-5);
    let steel = Material::steel();

    model.add_element(
        "Col1",
        Element::new("N1", "N3", steel.clone(), section.clone()).with_kind(ElementKind::Column),
    )?;
    model.add_element(
        "Col2",
        Element::new("N2", "N4", steel.clone(), section.clone()).with_kind(ElementKind::Column),
    )?;
    model.add_element("Beam", Element::new("N3", "N4", steel, section))?;

    // Dead: 20 kN/m down on the beam. Wind: 10 kN lateral at roof level.
    model.add_load_case(
        LoadCase::new("1.4D", LoadCategory::Dead)
            .with_factor(1.4)
            .with_element_load("Beam", ElementLoad::distributed(-20_000.0, LoadAxis::Y)),
    )?;
    model.add_load_case(
        LoadCase::new("1.2D + 1.0W", LoadCategory::Wind)
            .with_element_load("Beam", ElementLoad::distributed(-1.2 * 20_000.0, LoadAxis::Y))
            .with_node_load("N3", NodeLoad::fx(10_000.0)),
    )?;

    println!("Running linear analysis...\n");
    for case in model.load_case_names() {
        let mut analyzer = Analyzer::new(&model);
        let results = analyzer.run_linear_static(&case)?;

        println!("=== Results for {} ===\n", case);

        println!("Node Displacements:");
        for node in model.node_ids() {
            let disp = results.node_displacements[&node];
            println!(
                "  {}: DX={:.4}mm, DY={:.4}mm, RZ={:.6}rad",
                node,
                disp.dx * 1000.0,
                disp.dy * 1000.0,
                disp.rz
            );
        }

        println!("\nSupport Reactions:");
        for (node, rxn) in &results.reactions {
            println!(
                "  {}: FX={:.2}kN, FY={:.2}kN, MZ={:.2}kN·m",
                node,
                rxn.fx / 1000.0,
                rxn.fy / 1000.0,
                rxn.mz / 1000.0
            );
        }

        println!("\nElement Forces:");
        for (element, forces) in &results.element_forces {
            println!(
                "  {}: P={:.2}kN, Vmax={:.2}kN, Mmax={:.2}kN·m",
                element,
                forces.i.axial / 1000.0,
                forces.max_shear() / 1000.0,
                forces.max_moment() / 1000.0
            );
        }

        let summary = results.summary();
        log::debug!("summary: {}", serde_json::to_string(&summary)?);
        println!("\nSummary:");
        println!(
            "  Max displacement: {:.4}mm at {}",
            summary.max_displacement * 1000.0,
            summary.max_disp_node
        );
        println!(
            "  Max reaction: {:.2}kN at {}",
            summary.max_reaction / 1000.0,
            summary.max_reaction_node
        );
        println!(
            "  Max moment: {:.2}kN·m in {}",
            summary.max_moment / 1000.0,
            summary.max_moment_element
        );
        println!();
    }

    // Second-order comparison under the lateral combination
    println!("=== Second-Order Comparison ===\n");

    let options = AnalysisOptions::default().with_geometric_nonlinearity();
    let mut analyzer = Analyzer::with_options(&model, options);
    let results = analyzer.run_nonlinear("1.2D + 1.0W")?;

    let record = results.nonlinear.expect("nonlinear record");
    println!(
        "Converged: {} in {} iterations (residual {:.3e})",
        record.converged, record.iterations, record.residual_norm
    );
    println!(
        "Lateral displacement at N3 (second order): {:.4}mm",
        results.node_displacements["N3"].dx * 1000.0
    );

    // Natural frequencies
    println!("\n=== Modal Analysis ===\n");

    let mut analyzer =
        Analyzer::with_options(&model, AnalysisOptions::default().with_num_modes(4));
    let results = analyzer.run_modal()?;
    for (i, mode) in results.modal.expect("modal block").modes.iter().enumerate() {
        println!(
            "Mode {}: f={:.3}Hz, T={:.4}s, participation X={:.3}",
            i + 1,
            mode.frequency,
            mode.period,
            mode.participation[0]
        );
    }

    println!("\n=== Analysis Complete ===");
    Ok(())
}
