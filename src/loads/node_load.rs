//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// Six load components applied at a node, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
    /// Force in Z direction (N)
    pub fz: f64,
    /// Moment about X axis (N·m)
    pub mx: f64,
    /// Moment about Y axis (N·m)
    pub my: f64,
    /// Moment about Z axis (N·m)
    pub mz: f64,
}

impl NodeLoad {
    /// Create a load with all components
    pub fn new(fx: f64, fy: f64, fz: f64, mx: f64, my: f64, mz: f64) -> Self {
        Self {
            fx,
            fy,
            fz,
            mx,
            my,
            mz,
        }
    }

    /// A zero load
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// A force-only load
    pub fn force(fx: f64, fy: f64, fz: f64) -> Self {
        Self::new(fx, fy, fz, 0.0, 0.0, 0.0)
    }

    /// A moment-only load
    pub fn moment(mx: f64, my: f64, mz: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mx, my, mz)
    }

    /// A force in X
    pub fn fx(value: f64) -> Self {
        Self::force(value, 0.0, 0.0)
    }

    /// A force in Y
    pub fn fy(value: f64) -> Self {
        Self::force(0.0, value, 0.0)
    }

    /// A force in Z
    pub fn fz(value: f64) -> Self {
        Self::force(0.0, 0.0, value)
    }

    /// Components as an array [FX, FY, FZ, MX, MY, MZ]
    pub fn as_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }

    /// Check whether every component is zero
    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|&c| c == 0.0)
    }
}

impl Default for NodeLoad {
    fn default() -> Self {
        Self::zero()
    }
}
