//! Nonlinear static analysis (Newton-Raphson)

use std::collections::BTreeMap;

use super::{recovery, AnalysisState, Analyzer};
use crate::assembly;
use crate::boundary::Partition;
use crate::error::{SolverError, SolverResult};
use crate::math::{dense, Mat, Vec};
use crate::results::{AnalysisResults, ConvergenceRecord};

impl Analyzer<'_> {
    /// Run a second-order static analysis for one load case
    ///
    /// Newton-Raphson from u = 0. When geometric nonlinearity is enabled the
    /// tangent picks up the geometric stiffness built from the member axial
    /// forces at the current displacement state. Exhausting `max_iterations`
    /// is reported through the convergence record, not as an error.
    pub fn run_nonlinear(&mut self, load_case: &str) -> SolverResult<AnalysisResults> {
        log::info!(
            "nonlinear static analysis, load case '{}', tolerance {:e}, max {} iterations",
            load_case,
            self.options.tolerance,
            self.options.max_iterations
        );

        if let Err(err) = self.model.validate() {
            return self.fail(err);
        }
        let case = match self.model.load_case(load_case) {
            Some(case) => case,
            None => return self.fail(SolverError::LoadCaseNotFound(load_case.to_string())),
        };

        self.set_state(AnalysisState::Assembling);
        let k_elastic = match assembly::assemble_stiffness(self.model) {
            Ok(k) => k,
            Err(err) => return self.fail(err),
        };
        let f_global = match assembly::assemble_load_vector(self.model, &case) {
            Ok(f) => f,
            Err(err) => return self.fail(err),
        };

        let partition = match Partition::from_model(self.model) {
            Ok(p) => p,
            Err(err) => return self.fail(err),
        };
        self.set_state(AnalysisState::BoundaryConditionsApplied);

        let f_reduced = partition.reduce_vector(&f_global);

        self.set_state(AnalysisState::Solving);
        let mut u_reduced = Vec::zeros(partition.free_count());
        let mut axial_forces: BTreeMap<String, f64> = BTreeMap::new();
        let mut k_tangent = k_elastic.clone();
        let mut residual_norm = f_reduced.norm();
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.options.max_iterations {
            k_tangent = match self.tangent_stiffness(&k_elastic, &axial_forces) {
                Ok(k) => k,
                Err(err) => return self.fail(err),
            };
            let k_reduced = partition.reduce_matrix(&k_tangent);

            let internal = match dense::checked_mul_vec(&k_reduced, &u_reduced) {
                Ok(v) => v,
                Err(err) => return self.fail(err),
            };
            let residual = &f_reduced - internal;
            residual_norm = residual.norm();
            log::debug!("iteration {}: residual norm {:e}", iterations, residual_norm);

            if residual_norm < self.options.tolerance {
                converged = true;
                break;
            }

            let du = match dense::solve(&k_reduced, &residual) {
                Ok(du) => du,
                Err(err) => return self.fail(partition.diagnose_singularity(err)),
            };
            u_reduced += du;
            iterations += 1;

            if self.options.geometric_nonlinearity {
                let u_full = partition.expand_vector(&u_reduced);
                axial_forces = match recovery::element_axial_forces(self.model, &u_full, &case) {
                    Ok(forces) => forces,
                    Err(err) => return self.fail(err),
                };
            }
        }

        if !converged {
            log::warn!(
                "did not converge in {} iterations, residual norm {:e}",
                iterations,
                residual_norm
            );
        }

        let u_full = partition.expand_vector(&u_reduced);

        self.set_state(AnalysisState::RecoveringForces);
        let mut results = match recovery::recover_results(
            self.model,
            &k_tangent,
            &f_global,
            &u_full,
            &case,
            partition.restrained_dofs(),
        ) {
            Ok(results) => results,
            Err(err) => return self.fail(err),
        };

        results.nonlinear = Some(ConvergenceRecord {
            converged,
            iterations,
            residual_norm,
        });

        self.set_state(AnalysisState::Done);
        Ok(results)
    }

    /// Elastic stiffness plus, when enabled, the geometric stiffness at the
    /// current axial force state
    fn tangent_stiffness(
        &self,
        k_elastic: &Mat,
        axial_forces: &BTreeMap<String, f64>,
    ) -> SolverResult<Mat> {
        if !self.options.geometric_nonlinearity || axial_forces.is_empty() {
            return Ok(k_elastic.clone());
        }
        let k_geometric = assembly::assemble_geometric_stiffness(self.model, axial_forces)?;
        dense::checked_add(k_elastic, &k_geometric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisOptions;
    use crate::elements::{Element, Material, Node, Section, Support};
    use crate::loads::{LoadCase, LoadCategory, NodeLoad};
    use crate::model::Model;
    use approx::assert_relative_eq;

    fn loaded_cantilever() -> Model {
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(3.0, 0.0, 0.0)).unwrap();
        model
            .add_element(
                "E1",
                Element::new("N1", "N2", Material::steel(), Section::rectangular(0.2, 0.4)),
            )
            .unwrap();
        model
            .add_load_case(
                LoadCase::new("Tip", LoadCategory::Live)
                    .with_node_load("N2", NodeLoad::fy(-10_000.0)),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_converged_run_matches_linear() {
        let model = loaded_cantilever();

        let mut linear = Analyzer::new(&model);
        let reference = linear.run_linear_static("Tip").unwrap();

        let mut nonlinear = Analyzer::new(&model);
        let results = nonlinear.run_nonlinear("Tip").unwrap();

        let record = results.nonlinear.unwrap();
        assert!(record.converged);
        assert!(record.iterations <= 2);

        // Without geometric effects the converged answer is the linear one
        let expected = reference.node_displacements["N2"].dy;
        assert_relative_eq!(
            results.node_displacements["N2"].dy,
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_non_convergence_is_data_not_error() {
        let model = loaded_cantilever();

        // A zero tolerance can never be satisfied (the check is strict)
        let options = AnalysisOptions::default()
            .with_tolerance(0.0)
            .with_max_iterations(5);
        let mut analyzer = Analyzer::with_options(&model, options);

        let results = analyzer.run_nonlinear("Tip").unwrap();
        let record = results.nonlinear.unwrap();
        assert!(!record.converged);
        assert_eq!(record.iterations, 5);
    }

    #[test]
    fn test_geometric_softening_under_compression() {
        // Column loaded axially in compression plus a small lateral load:
        // the second-order lateral deflection exceeds the first-order one
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(0.0, 3.0, 0.0)).unwrap();
        model
            .add_element(
                "E1",
                Element::new("N1", "N2", Material::steel(), Section::rectangular(0.1, 0.1)),
            )
            .unwrap();
        model
            .add_load_case(
                // Axial load well below the Euler load (about 457 kN here)
                LoadCase::new("Combined", LoadCategory::Live).with_node_load(
                    "N2",
                    NodeLoad::new(1_000.0, -1.0e5, 0.0, 0.0, 0.0, 0.0),
                ),
            )
            .unwrap();

        let mut linear = Analyzer::new(&model);
        let first_order = linear.run_linear_static("Combined").unwrap();

        let options = AnalysisOptions::default().with_geometric_nonlinearity();
        let mut analyzer = Analyzer::with_options(&model, options);
        let second_order = analyzer.run_nonlinear("Combined").unwrap();

        assert!(second_order.nonlinear.unwrap().converged);
        let dx1 = first_order.node_displacements["N2"].dx;
        let dx2 = second_order.node_displacements["N2"].dx;
        assert!(dx2 > dx1, "expected softening: {} vs {}", dx2, dx1);
    }
}
