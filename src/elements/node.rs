//! Node - a point in 3D space with restraints and base loads

use serde::{Deserialize, Serialize};

use super::Support;
use crate::loads::NodeLoad;

/// A 3D node in the structural model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Boundary restraint flags
    pub support: Support,
    /// Base applied load (a load case may override it)
    pub load: NodeLoad,
}

impl Node {
    /// Create a new free, unloaded node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            support: Support::free(),
            load: NodeLoad::zero(),
        }
    }

    /// Set the support condition
    pub fn with_support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    /// Set the base applied load
    pub fn with_load(mut self, load: NodeLoad) -> Self {
        self.load = load;
        self
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_distance() {
        let n1 = Node::new(0.0, 0.0, 0.0);
        let n2 = Node::new(3.0, 4.0, 0.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_node_builders() {
        let node = Node::new(1.0, 2.0, 3.0)
            .with_support(Support::fixed())
            .with_load(NodeLoad::fy(-1000.0));
        assert!(node.support.dx);
        assert_eq!(node.load.fy, -1000.0);
    }
}
