//! Analysis drivers - linear static, modal, and nonlinear static
//!
//! Each driver is a method on [`Analyzer`], which borrows the model
//! immutably and produces a fresh [`crate::results::AnalysisResults`].
//! Running the same driver twice on an unmodified model yields identical
//! results.

mod linear;
mod modal;
mod nonlinear;
mod recovery;

use std::fmt;

use crate::model::Model;

/// Phase of the current (or last) analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    /// No run started yet
    Idle,
    /// Assembling global matrices and the load vector
    Assembling,
    /// Restrained DOFs eliminated from the system
    BoundaryConditionsApplied,
    /// Solving the reduced system
    Solving,
    /// Computing displacements, forces, stresses, and reactions
    RecoveringForces,
    /// Run finished successfully
    Done,
    /// Run aborted with an error
    Failed,
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Assembling => "assembling",
            AnalysisState::BoundaryConditionsApplied => "boundary conditions applied",
            AnalysisState::Solving => "solving",
            AnalysisState::RecoveringForces => "recovering forces",
            AnalysisState::Done => "done",
            AnalysisState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Options controlling the analysis drivers
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Include geometric stiffness in the nonlinear tangent
    pub geometric_nonlinearity: bool,
    /// Reserved for material nonlinearity (not yet consulted)
    pub material_nonlinearity: bool,
    /// Reserved for time-history analysis
    pub include_dynamic: bool,
    /// Reserved for response-spectrum analysis
    pub include_seismic: bool,
    /// Reserved for thermal load effects
    pub include_thermal: bool,
    /// Residual norm below which a nonlinear run converges
    pub tolerance: f64,
    /// Iteration cap for the nonlinear driver
    pub max_iterations: usize,
    /// Number of modes requested from the modal driver
    pub num_modes: usize,
    /// Reserved: time steps for dynamic analysis
    pub time_steps: Option<usize>,
    /// Reserved: duration for dynamic analysis, in seconds
    pub duration: Option<f64>,
    /// Reserved: modal damping ratio
    pub damping_ratio: Option<f64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            geometric_nonlinearity: false,
            material_nonlinearity: false,
            include_dynamic: false,
            include_seismic: false,
            include_thermal: false,
            tolerance: 1e-6,
            max_iterations: 30,
            num_modes: 12,
            time_steps: None,
            duration: None,
            damping_ratio: None,
        }
    }
}

impl AnalysisOptions {
    /// Enable geometric nonlinearity for the nonlinear driver
    pub fn with_geometric_nonlinearity(mut self) -> Self {
        self.geometric_nonlinearity = true;
        self
    }

    /// Set the nonlinear convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the nonlinear iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the number of modes for the modal driver
    pub fn with_num_modes(mut self, num_modes: usize) -> Self {
        self.num_modes = num_modes;
        self
    }
}

/// Analysis driver bound to one model
///
/// Borrows the model immutably, so several analyzers (or clones of the
/// model in other threads) can run what-if studies side by side.
pub struct Analyzer<'m> {
    model: &'m Model,
    options: AnalysisOptions,
    state: AnalysisState,
}

impl<'m> Analyzer<'m> {
    /// Create an analyzer with default options
    pub fn new(model: &'m Model) -> Self {
        Self::with_options(model, AnalysisOptions::default())
    }

    /// Create an analyzer with explicit options
    pub fn with_options(model: &'m Model, options: AnalysisOptions) -> Self {
        Self {
            model,
            options,
            state: AnalysisState::Idle,
        }
    }

    /// Current run state
    pub fn state(&self) -> AnalysisState {
        self.state
    }

    /// Options in effect
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub(crate) fn set_state(&mut self, state: AnalysisState) {
        log::debug!("analysis state: {} -> {}", self.state, state);
        self.state = state;
    }

    /// Record the failure and pass the error through
    pub(crate) fn fail<T>(&mut self, err: crate::error::SolverError) -> crate::error::SolverResult<T> {
        log::warn!("analysis failed: {}", err);
        self.set_state(AnalysisState::Failed);
        Err(err)
    }
}
