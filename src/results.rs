//! Result types produced by the analysis drivers
//!
//! Results are independent of the model they were computed from: drivers
//! build them from scratch on every run and never write back into the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Displacement results at a node, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2) + self.rz.powi(2)).sqrt()
    }
}

/// Internal forces at one end of an element, in local axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear_y: f64,
    /// Shear force in local z direction
    pub shear_z: f64,
    /// Torsion
    pub torsion: f64,
    /// Bending moment about local y axis
    pub moment_y: f64,
    /// Bending moment about local z axis
    pub moment_z: f64,
}

impl EndForces {
    /// Extract i-end forces from the 12-component local force vector
    pub fn from_i_end(forces: &[f64; 12]) -> Self {
        Self {
            axial: -forces[0],
            shear_y: forces[1],
            shear_z: forces[2],
            torsion: -forces[3],
            moment_y: forces[4],
            moment_z: forces[5],
        }
    }

    /// Extract j-end forces from the 12-component local force vector
    pub fn from_j_end(forces: &[f64; 12]) -> Self {
        Self {
            axial: forces[6],
            shear_y: -forces[7],
            shear_z: -forces[8],
            torsion: forces[9],
            moment_y: forces[10],
            moment_z: forces[11],
        }
    }
}

/// End forces of one element, in local axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementForces {
    /// Forces at the i-end
    pub i: EndForces,
    /// Forces at the j-end
    pub j: EndForces,
}

impl ElementForces {
    /// Build from the 12-component local force vector
    pub fn from_local(forces: &[f64; 12]) -> Self {
        Self {
            i: EndForces::from_i_end(forces),
            j: EndForces::from_j_end(forces),
        }
    }

    /// Largest absolute value of one component over both ends
    pub fn max_of(&self, component: impl Fn(&EndForces) -> f64) -> f64 {
        component(&self.i).abs().max(component(&self.j).abs())
    }

    /// Maximum absolute axial force over both ends
    pub fn max_axial(&self) -> f64 {
        self.i.axial.abs().max(self.j.axial.abs())
    }

    /// Maximum absolute bending moment over both ends and axes
    pub fn max_moment(&self) -> f64 {
        self.i
            .moment_y
            .abs()
            .max(self.i.moment_z.abs())
            .max(self.j.moment_y.abs())
            .max(self.j.moment_z.abs())
    }

    /// Maximum absolute shear over both ends and axes
    pub fn max_shear(&self) -> f64 {
        self.i
            .shear_y
            .abs()
            .max(self.i.shear_z.abs())
            .max(self.j.shear_y.abs())
            .max(self.j.shear_z.abs())
    }
}

/// Stress components in an element, derived from end forces and the section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStress {
    /// Axial stress (positive = tension)
    pub axial: f64,
    /// Average shear stress in local y
    pub shear_y: f64,
    /// Average shear stress in local z
    pub shear_z: f64,
    /// Torsional shear stress
    pub torsion: f64,
    /// Bending stress about local y
    pub bending_y: f64,
    /// Bending stress about local z
    pub bending_z: f64,
    /// Von-Mises-like combination of the above
    pub combined: f64,
}

/// Reaction forces at a supported node, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reaction {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// One natural vibration mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mode {
    /// Natural frequency in Hz
    pub frequency: f64,
    /// Natural period in seconds (infinite for a zero frequency)
    pub period: f64,
    /// Modal participation factors for global X, Y, Z translation
    pub participation: [f64; 3],
    /// Mass-normalized mode shape per node
    pub shape: BTreeMap<String, [f64; 6]>,
}

/// Modal analysis block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalResults {
    /// Modes sorted by ascending frequency
    pub modes: Vec<Mode>,
}

/// Convergence record of a nonlinear run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConvergenceRecord {
    /// Whether the residual dropped below tolerance
    pub converged: bool,
    /// Iterations performed
    pub iterations: usize,
    /// Final residual norm
    pub residual_norm: f64,
}

/// Results of one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Per-node displacements
    pub node_displacements: BTreeMap<String, NodeDisplacement>,
    /// Per-element end forces in local axes
    pub element_forces: BTreeMap<String, ElementForces>,
    /// Per-element stresses
    pub element_stresses: BTreeMap<String, ElementStress>,
    /// Reactions at supported nodes
    pub reactions: BTreeMap<String, Reaction>,
    /// Modal block (modal runs only)
    pub modal: Option<ModalResults>,
    /// Convergence record (nonlinear runs only)
    pub nonlinear: Option<ConvergenceRecord>,
}

/// Summary statistics for report consumers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with the maximum displacement
    pub max_disp_node: String,
    /// Maximum reaction force magnitude
    pub max_reaction: f64,
    /// Node with the maximum reaction
    pub max_reaction_node: String,
    /// Maximum element axial force
    pub max_axial: f64,
    /// Element with the maximum axial force
    pub max_axial_element: String,
    /// Maximum element bending moment
    pub max_moment: f64,
    /// Element with the maximum moment
    pub max_moment_element: String,
    /// Maximum element shear
    pub max_shear: f64,
    /// Element with the maximum shear
    pub max_shear_element: String,
    /// Fundamental period in seconds, when a modal block exists
    pub fundamental_period: Option<f64>,
}

impl AnalysisResults {
    /// Compute summary statistics over the result maps
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary::default();

        for (id, disp) in &self.node_displacements {
            let mag = disp.translation_magnitude();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = id.clone();
            }
        }

        for (id, reaction) in &self.reactions {
            let mag = reaction.force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = id.clone();
            }
        }

        for (id, forces) in &self.element_forces {
            let axial = forces.max_axial();
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_element = id.clone();
            }
            let moment = forces.max_moment();
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_element = id.clone();
            }
            let shear = forces.max_shear();
            if shear > summary.max_shear {
                summary.max_shear = shear;
                summary.max_shear_element = id.clone();
            }
        }

        if let Some(modal) = &self.modal {
            summary.fundamental_period = modal.modes.first().map(|m| m.period);
        }

        summary
    }
}
