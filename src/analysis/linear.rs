//! Linear static analysis

use super::{recovery, AnalysisState, Analyzer};
use crate::assembly;
use crate::boundary::Partition;
use crate::error::{SolverError, SolverResult};
use crate::math::dense;
use crate::results::AnalysisResults;

impl Analyzer<'_> {
    /// Run a first-order static analysis for one load case
    ///
    /// Assembles K and F, eliminates restrained DOFs, solves the reduced
    /// system, and recovers displacements, element end forces, stresses,
    /// and reactions. The model is not modified.
    pub fn run_linear_static(&mut self, load_case: &str) -> SolverResult<AnalysisResults> {
        log::info!("linear static analysis, load case '{}'", load_case);

        if let Err(err) = self.model.validate() {
            return self.fail(err);
        }
        let case = match self.model.load_case(load_case) {
            Some(case) => case,
            None => return self.fail(SolverError::LoadCaseNotFound(load_case.to_string())),
        };

        self.set_state(AnalysisState::Assembling);
        let k_global = match assembly::assemble_stiffness(self.model) {
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
        log::debug!(
            "{} free DOFs, {} restrained",
            partition.free_count(),
            partition.restrained_count()
        );

        let k_reduced = partition.reduce_matrix(&k_global);
        let f_reduced = partition.reduce_vector(&f_global);

        self.set_state(AnalysisState::Solving);
        let u_reduced = match dense::solve(&k_reduced, &f_reduced) {
            Ok(u) => u,
            Err(err) => return self.fail(partition.diagnose_singularity(err)),
        };
        let u_full = partition.expand_vector(&u_reduced);

        self.set_state(AnalysisState::RecoveringForces);
        let results = match recovery::recover_results(
            self.model,
            &k_global,
            &f_global,
            &u_full,
            &case,
            partition.restrained_dofs(),
        ) {
            Ok(results) => results,
            Err(err) => return self.fail(err),
        };

        self.set_state(AnalysisState::Done);
        Ok(results)
    }
}
