//! Element loads - distributed, point, and moment loads applied along members
//!
//! Element loads are converted to statically equivalent nodal loads (via the
//! fixed-end reaction tables in [`crate::math`]) before assembly, and folded
//! back into member end forces during recovery.

use serde::{Deserialize, Serialize};

/// Kind of an element load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementLoadKind {
    /// Uniform line load over the full element length (magnitude per unit length)
    Distributed,
    /// Concentrated force at a position along the element
    Point,
    /// Concentrated moment at a position along the element
    Moment,
}

/// Local axis an element load acts along (force loads) or about (moments)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadAxis {
    /// Element longitudinal axis
    X,
    /// Local y axis
    Y,
    /// Local z axis
    Z,
}

impl LoadAxis {
    /// Axis index used by the fixed-end reaction tables
    pub fn index(&self) -> usize {
        match self {
            LoadAxis::X => 0,
            LoadAxis::Y => 1,
            LoadAxis::Z => 2,
        }
    }
}

/// A load applied along an element, in the element's local axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementLoad {
    /// Kind of load
    pub kind: ElementLoadKind,
    /// Magnitude: N/m for distributed, N for point, N·m for moment
    pub magnitude: f64,
    /// Normalized position along the element (0 = i-node, 1 = j-node);
    /// ignored for distributed loads
    pub position: f64,
    /// Local load axis
    pub axis: LoadAxis,
}

impl ElementLoad {
    /// A uniform distributed load over the full element length
    pub fn distributed(magnitude: f64, axis: LoadAxis) -> Self {
        Self {
            kind: ElementLoadKind::Distributed,
            magnitude,
            position: 0.0,
            axis,
        }
    }

    /// A concentrated force at a normalized position
    pub fn point(magnitude: f64, position: f64, axis: LoadAxis) -> Self {
        Self {
            kind: ElementLoadKind::Point,
            magnitude,
            position: position.clamp(0.0, 1.0),
            axis,
        }
    }

    /// A concentrated moment at a normalized position
    pub fn moment(magnitude: f64, position: f64, axis: LoadAxis) -> Self {
        Self {
            kind: ElementLoadKind::Moment,
            magnitude,
            position: position.clamp(0.0, 1.0),
            axis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamped() {
        let load = ElementLoad::point(-1000.0, 1.5, LoadAxis::Y);
        assert_eq!(load.position, 1.0);
    }
}
