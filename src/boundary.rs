//! Boundary condition enforcement via exact DOF elimination
//!
//! Restrained rows and columns are removed from the assembled system rather
//! than penalized: the reduced system keeps the conditioning of the physical
//! stiffness, and restrained displacements are exactly zero by construction.
//! The partition also maps reduced equation indices back to node/DOF pairs
//! for singularity diagnostics.

use std::collections::BTreeMap;

use crate::assembly::{self, DOFS_PER_NODE};
use crate::error::{SolverError, SolverResult};
use crate::math::{Mat, Vec};
use crate::model::Model;

/// Names of the six per-node DOF components, in DOF order
pub const DOF_COMPONENTS: [&str; 6] = ["ux", "uy", "uz", "rx", "ry", "rz"];

/// Free/restrained split of the global DOFs of a model
#[derive(Debug, Clone)]
pub struct Partition {
    /// Global DOF indices that remain unknowns, in ascending order
    free: std::vec::Vec<usize>,
    /// Global DOF indices eliminated by restraints, in ascending order
    restrained: std::vec::Vec<usize>,
    /// Total number of global DOFs
    n_dofs: usize,
    /// Node id and base DOF, for diagnostics
    dof_map: BTreeMap<String, usize>,
}

impl Partition {
    /// Scan the model's restraint flags and split its global DOFs
    pub fn from_model(model: &Model) -> SolverResult<Self> {
        let dof_map = assembly::dof_map(model);
        let n_dofs = model.node_count() * DOFS_PER_NODE;

        let mut free = std::vec::Vec::new();
        let mut restrained = std::vec::Vec::new();

        for id in model.node_ids() {
            let node = model.node(&id).ok_or(SolverError::NodeNotFound(id.clone()))?;
            let base = dof_map[&id];
            for (i, flag) in node.support.as_array().iter().enumerate() {
                if *flag {
                    restrained.push(base + i);
                } else {
                    free.push(base + i);
                }
            }
        }

        if free.is_empty() {
            return Err(SolverError::AnalysisFailed(
                "no free degrees of freedom".to_string(),
            ));
        }

        Ok(Self {
            free,
            restrained,
            n_dofs,
            dof_map,
        })
    }

    /// Number of free DOFs
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of restrained DOFs
    pub fn restrained_count(&self) -> usize {
        self.restrained.len()
    }

    /// Global DOF indices of the free set
    pub fn free_dofs(&self) -> &[usize] {
        &self.free
    }

    /// Global DOF indices of the restrained set
    pub fn restrained_dofs(&self) -> &[usize] {
        &self.restrained
    }

    /// Reduce a global matrix to the free-free block
    pub fn reduce_matrix(&self, full: &Mat) -> Mat {
        let n = self.free.len();
        let mut reduced = Mat::zeros(n, n);
        for (i, &gi) in self.free.iter().enumerate() {
            for (j, &gj) in self.free.iter().enumerate() {
                reduced[(i, j)] = full[(gi, gj)];
            }
        }
        reduced
    }

    /// Reduce a global vector to the free rows
    pub fn reduce_vector(&self, full: &Vec) -> Vec {
        let mut reduced = Vec::zeros(self.free.len());
        for (i, &gi) in self.free.iter().enumerate() {
            reduced[i] = full[gi];
        }
        reduced
    }

    /// Expand a reduced solution back to full size, zero at restrained DOFs
    pub fn expand_vector(&self, reduced: &Vec) -> Vec {
        let mut full = Vec::zeros(self.n_dofs);
        for (i, &gi) in self.free.iter().enumerate() {
            full[gi] = reduced[i];
        }
        full
    }

    /// Map a reduced equation index back to its global DOF index
    pub fn global_dof(&self, reduced_index: usize) -> Option<usize> {
        self.free.get(reduced_index).copied()
    }

    /// Describe a global DOF as "node 'id' component" for diagnostics
    pub fn describe_dof(&self, global_dof: usize) -> String {
        for (id, &base) in &self.dof_map {
            if global_dof >= base && global_dof < base + DOFS_PER_NODE {
                return format!("node '{}' {}", id, DOF_COMPONENTS[global_dof - base]);
            }
        }
        format!("equation {}", global_dof)
    }

    /// Turn a kernel singularity into a model-level diagnostic
    pub fn diagnose_singularity(&self, err: SolverError) -> SolverError {
        match err {
            SolverError::SingularMatrix { dof } => {
                let location = self
                    .global_dof(dof)
                    .map(|g| self.describe_dof(g))
                    .unwrap_or_else(|| format!("equation {}", dof));
                SolverError::Unstable(format!(
                    "stiffness matrix is singular at {} - check supports and member connectivity",
                    location
                ))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, Material, Node, Section, Support};

    fn model() -> Model {
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(3.0, 0.0, 0.0)).unwrap();
        model
            .add_element(
                "E1",
                Element::new("N1", "N2", Material::steel(), Section::default()),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_partition_counts() {
        let partition = Partition::from_model(&model()).unwrap();
        assert_eq!(partition.free_count(), 6);
        assert_eq!(partition.restrained_count(), 6);
        assert_eq!(partition.free_dofs(), &[6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_reduce_expand_round_trip() {
        let partition = Partition::from_model(&model()).unwrap();

        let mut full = Vec::zeros(12);
        for i in 0..12 {
            full[i] = i as f64;
        }
        let reduced = partition.reduce_vector(&full);
        let expanded = partition.expand_vector(&reduced);

        for &dof in partition.free_dofs() {
            assert_eq!(expanded[dof], full[dof]);
        }
        for &dof in partition.restrained_dofs() {
            assert_eq!(expanded[dof], 0.0);
        }
    }

    #[test]
    fn test_all_restrained_rejected() {
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();

        assert!(matches!(
            Partition::from_model(&model),
            Err(SolverError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn test_describe_dof() {
        let partition = Partition::from_model(&model()).unwrap();
        assert_eq!(partition.describe_dof(7), "node 'N2' uy");
        assert_eq!(partition.describe_dof(3), "node 'N1' rx");
    }
}
