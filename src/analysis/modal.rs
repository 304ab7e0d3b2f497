//! Modal (eigenvalue) analysis

use std::collections::BTreeMap;
use std::f64::consts::PI;

use super::{AnalysisState, Analyzer};
use crate::assembly::{self, DOFS_PER_NODE};
use crate::boundary::Partition;
use crate::math::{eigen, Vec};
use crate::error::SolverResult;
use crate::results::{AnalysisResults, ModalResults, Mode};

impl Analyzer<'_> {
    /// Solve for the natural frequencies and mode shapes of the model
    ///
    /// Uses the consistent element mass. Shapes are mass-normalized and
    /// participation factors are reported per global translation direction.
    pub fn run_modal(&mut self) -> SolverResult<AnalysisResults> {
        log::info!("modal analysis, {} modes requested", self.options.num_modes);

        if let Err(err) = self.model.validate() {
            return self.fail(err);
        }

        self.set_state(AnalysisState::Assembling);
        let k_global = match assembly::assemble_stiffness(self.model) {
            Ok(k) => k,
            Err(err) => return self.fail(err),
        };
        let m_global = match assembly::assemble_mass(self.model) {
            Ok(m) => m,
            Err(err) => return self.fail(err),
        };

        let partition = match Partition::from_model(self.model) {
            Ok(p) => p,
            Err(err) => return self.fail(err),
        };
        self.set_state(AnalysisState::BoundaryConditionsApplied);

        let k_reduced = partition.reduce_matrix(&k_global);
        let m_reduced = partition.reduce_matrix(&m_global);

        self.set_state(AnalysisState::Solving);
        let num_modes = self.options.num_modes.min(partition.free_count());
        let pairs = match eigen::generalized_symmetric(&k_reduced, &m_reduced, num_modes) {
            Ok(pairs) => pairs,
            Err(err) => return self.fail(err),
        };

        self.set_state(AnalysisState::RecoveringForces);
        let dofs = assembly::dof_map(self.model);

        // Unit influence vector per global translation axis, free DOFs only
        let influence: [Vec; 3] = std::array::from_fn(|axis| {
            let mut r = Vec::zeros(partition.free_count());
            for (i, &gdof) in partition.free_dofs().iter().enumerate() {
                if gdof % DOFS_PER_NODE == axis {
                    r[i] = 1.0;
                }
            }
            r
        });

        let mut modes = std::vec::Vec::with_capacity(pairs.len());
        for pair in &pairs {
            let omega = pair.lambda.sqrt();
            let frequency = omega / (2.0 * PI);
            let period = if frequency > 0.0 {
                1.0 / frequency
            } else {
                f64::INFINITY
            };

            // Shapes are mass-normalized, so the participation factor is
            // just the modal excitation phi' * M * r
            let m_phi = &m_reduced * &pair.shape;
            let participation: [f64; 3] =
                std::array::from_fn(|axis| influence[axis].dot(&m_phi));

            let full_shape = partition.expand_vector(&pair.shape);
            let mut shape = BTreeMap::new();
            for (id, &base) in &dofs {
                let mut components = [0.0; 6];
                for (k, slot) in components.iter_mut().enumerate() {
                    *slot = full_shape[base + k];
                }
                shape.insert(id.clone(), components);
            }

            log::debug!("mode at {:.3} Hz", frequency);
            modes.push(Mode {
                frequency,
                period,
                participation,
                shape,
            });
        }

        self.set_state(AnalysisState::Done);
        Ok(AnalysisResults {
            modal: Some(ModalResults { modes }),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisOptions;
    use crate::elements::{Element, Material, Node, Section, Support};
    use crate::model::Model;
    use approx::assert_relative_eq;

    #[test]
    fn test_cantilever_fundamental_frequency() {
        let length = 3.0;
        let material = Material::steel();
        let section = Section::rectangular(0.2, 0.4);

        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(length, 0.0, 0.0)).unwrap();
        model
            .add_element(
                "E1",
                Element::new("N1", "N2", material.clone(), section.clone()),
            )
            .unwrap();

        let mut analyzer =
            Analyzer::with_options(&model, AnalysisOptions::default().with_num_modes(3));
        let results = analyzer.run_modal().unwrap();
        let modal = results.modal.unwrap();

        // Closed form: omega1 = 1.875104^2 * sqrt(EI / (rho A L^4)),
        // bending about the weak axis. A single consistent-mass element
        // overestimates by about half a percent.
        let lambda1 = 1.875_104_f64.powi(2);
        let omega = lambda1
            * (material.e * section.iz / (material.rho * section.a * length.powi(4))).sqrt();
        let expected = omega / (2.0 * std::f64::consts::PI);

        let fundamental = &modal.modes[0];
        assert_relative_eq!(fundamental.frequency, expected, max_relative = 0.02);

        // The bending mode moves mass in global Y
        assert!(fundamental.participation[1].abs() > 1e-6);
        assert!(fundamental.period > 0.0);
    }

    #[test]
    fn test_modes_sorted_ascending() {
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(2.0, 0.0, 0.0)).unwrap();
        model.add_node("N3", Node::new(4.0, 0.0, 0.0)).unwrap();
        for (id, i, j) in [("E1", "N1", "N2"), ("E2", "N2", "N3")] {
            model
                .add_element(
                    id,
                    Element::new(i, j, Material::steel(), Section::rectangular(0.1, 0.1)),
                )
                .unwrap();
        }

        let mut analyzer =
            Analyzer::with_options(&model, AnalysisOptions::default().with_num_modes(6));
        let results = analyzer.run_modal().unwrap();
        let modes = results.modal.unwrap().modes;

        assert!(!modes.is_empty());
        for pair in modes.windows(2) {
            assert!(pair[0].frequency <= pair[1].frequency + 1e-9);
        }
    }
}
