//! Frame element - 3D beam/column/truss/cable member

use serde::{Deserialize, Serialize};

use super::{Material, Section};

/// Structural role of an element
///
/// All kinds use the 3D frame formulation; truss and cable members condense
/// out their end moments so they carry axial force only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Beam,
    Column,
    Truss,
    Cable,
}

impl ElementKind {
    /// Local DOF releases implied by the element kind
    /// [DX, DY, DZ, RX, RY, RZ] at i, then at j
    pub fn releases(&self) -> [bool; 12] {
        match self {
            ElementKind::Beam | ElementKind::Column => [false; 12],
            ElementKind::Truss | ElementKind::Cable => {
                let mut r = [false; 12];
                // Moment releases at both ends
                r[4] = true;
                r[5] = true;
                r[10] = true;
                r[11] = true;
                r
            }
        }
    }
}

/// A 3D frame element connecting two distinct nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Id of the i-node (start)
    pub i_node: String,
    /// Id of the j-node (end)
    pub j_node: String,
    /// Material properties
    pub material: Material,
    /// Cross-section properties
    pub section: Section,
    /// Structural role
    pub kind: ElementKind,
    /// Rotation about the longitudinal axis (radians)
    pub rotation: f64,
}

impl Element {
    /// Create a new beam element
    pub fn new(i_node: &str, j_node: &str, material: Material, section: Section) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material,
            section,
            kind: ElementKind::Beam,
            rotation: 0.0,
        }
    }

    /// Set the element kind
    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the rotation about the longitudinal axis
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}
