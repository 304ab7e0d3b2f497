//! Support conditions

use serde::{Deserialize, Serialize};

/// Boundary restraint flags at a node (true = restrained)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
    /// Restrained in Z translation
    pub dz: bool,
    /// Restrained in X rotation
    pub rx: bool,
    /// Restrained in Y rotation
    pub ry: bool,
    /// Restrained in Z rotation
    pub rz: bool,
}

impl Support {
    /// No restraints
    pub fn free() -> Self {
        Self::default()
    }

    /// Fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self {
            dx: true,
            dy: true,
            dz: true,
            rx: true,
            ry: true,
            rz: true,
        }
    }

    /// Pinned support (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self {
            dx: true,
            dy: true,
            dz: true,
            rx: false,
            ry: false,
            rz: false,
        }
    }

    /// Roller support restraining Y translation only
    pub fn roller_y() -> Self {
        Self {
            dy: true,
            ..Self::free()
        }
    }

    /// Roller support restraining X translation only
    pub fn roller_x() -> Self {
        Self {
            dx: true,
            ..Self::free()
        }
    }

    /// Support with explicit restraint flags
    pub fn with_restraints(dx: bool, dy: bool, dz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
        }
    }

    /// Restraint flags as an array [DX, DY, DZ, RX, RY, RZ]
    pub fn as_array(&self) -> [bool; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Restrained DOF indices (0-5)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| if r { Some(i) } else { None })
            .collect()
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.as_array().iter().any(|&r| r)
    }

    /// Count restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.as_array().iter().filter(|&&r| r).count()
    }
}

impl Default for Support {
    fn default() -> Self {
        Self {
            dx: false,
            dy: false,
            dz: false,
            rx: false,
            ry: false,
            rz: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_support() {
        let support = Support::fixed();
        assert_eq!(support.num_restrained(), 6);
    }

    #[test]
    fn test_pinned_support() {
        let support = Support::pinned();
        assert!(support.dx && support.dy && support.dz);
        assert!(!support.rx && !support.ry && !support.rz);
        assert_eq!(support.restrained_dofs(), vec![0, 1, 2]);
    }
}
