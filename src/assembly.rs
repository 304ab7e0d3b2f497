//! Global assembly - scatter-adds element matrices into the global system
//!
//! Each node owns six consecutive global DOFs in sorted node order. Every
//! element maps its 12 local DOFs to the two six-DOF blocks of its endpoints
//! and scatter-adds its global-frame matrix into the corresponding entries.

use std::collections::BTreeMap;

use crate::elements::Element;
use crate::error::{SolverError, SolverResult};
use crate::loads::{ElementLoadKind, LoadCase};
use crate::math::{self, Mat, Mat12, Vec, Vec12};
use crate::model::Model;

/// Number of DOFs per node (3 translations + 3 rotations)
pub const DOFS_PER_NODE: usize = 6;

/// Map each node id to its base global DOF index, in sorted node order
pub fn dof_map(model: &Model) -> BTreeMap<String, usize> {
    model
        .nodes
        .keys()
        .enumerate()
        .map(|(i, id)| (id.clone(), i * DOFS_PER_NODE))
        .collect()
}

/// Scatter-add a 12x12 element matrix into the global matrix
fn scatter_add(global: &mut Mat, local: &Mat12, i_dof: usize, j_dof: usize) {
    for a in 0..DOFS_PER_NODE {
        for b in 0..DOFS_PER_NODE {
            global[(i_dof + a, i_dof + b)] += local[(a, b)];
            global[(i_dof + a, j_dof + b)] += local[(a, b + 6)];
            global[(j_dof + a, i_dof + b)] += local[(a + 6, b)];
            global[(j_dof + a, j_dof + b)] += local[(a + 6, b + 6)];
        }
    }
}

fn element_endpoints(
    element: &Element,
    dofs: &BTreeMap<String, usize>,
) -> SolverResult<(usize, usize)> {
    let i_dof = *dofs
        .get(&element.i_node)
        .ok_or_else(|| SolverError::NodeNotFound(element.i_node.clone()))?;
    let j_dof = *dofs
        .get(&element.j_node)
        .ok_or_else(|| SolverError::NodeNotFound(element.j_node.clone()))?;
    Ok((i_dof, j_dof))
}

/// Element local stiffness with kind releases applied
pub(crate) fn element_local_stiffness(model: &Model, element: &Element) -> SolverResult<Mat12> {
    let length = model.element_length(element)?;
    let k_local = math::frame_local_stiffness(
        element.material.e,
        element.material.g,
        element.section.a,
        element.section.iy,
        element.section.iz,
        element.section.j,
        length,
    );
    Ok(math::apply_releases(&k_local, &element.kind.releases()))
}

/// Element local-to-global transformation matrix
pub(crate) fn element_transformation(model: &Model, element: &Element) -> SolverResult<Mat12> {
    let i_node = model
        .nodes
        .get(&element.i_node)
        .ok_or_else(|| SolverError::NodeNotFound(element.i_node.clone()))?;
    let j_node = model
        .nodes
        .get(&element.j_node)
        .ok_or_else(|| SolverError::NodeNotFound(element.j_node.clone()))?;
    Ok(math::frame_transformation_matrix(
        &i_node.coords(),
        &j_node.coords(),
        element.rotation,
    ))
}

/// Assemble the (6N)x(6N) global stiffness matrix
///
/// Symmetric before boundary conditions are applied.
pub fn assemble_stiffness(model: &Model) -> SolverResult<Mat> {
    let n_dofs = model.node_count() * DOFS_PER_NODE;
    let dofs = dof_map(model);
    let mut k_global = Mat::zeros(n_dofs, n_dofs);

    for element in model.elements.values() {
        let k_local = element_local_stiffness(model, element)?;
        let t = element_transformation(model, element)?;
        let k_element = t.transpose() * k_local * t;

        let (i_dof, j_dof) = element_endpoints(element, &dofs)?;
        scatter_add(&mut k_global, &k_element, i_dof, j_dof);
    }

    Ok(k_global)
}

/// Assemble the global geometric stiffness from per-element axial forces
///
/// `axial_forces` maps element id to axial force (positive = tension);
/// elements without an entry contribute nothing.
pub fn assemble_geometric_stiffness(
    model: &Model,
    axial_forces: &BTreeMap<String, f64>,
) -> SolverResult<Mat> {
    let n_dofs = model.node_count() * DOFS_PER_NODE;
    let dofs = dof_map(model);
    let mut kg_global = Mat::zeros(n_dofs, n_dofs);

    for (id, element) in &model.elements {
        let p = match axial_forces.get(id) {
            Some(&p) if p.abs() > 1e-10 => p,
            _ => continue,
        };

        let length = model.element_length(element)?;
        let kg_local = math::frame_geometric_stiffness(
            p,
            element.section.a,
            element.section.iy,
            element.section.iz,
            length,
        );
        let t = element_transformation(model, element)?;
        let kg_element = t.transpose() * kg_local * t;

        let (i_dof, j_dof) = element_endpoints(element, &dofs)?;
        scatter_add(&mut kg_global, &kg_element, i_dof, j_dof);
    }

    Ok(kg_global)
}

/// Assemble the (6N)x(6N) global consistent mass matrix
pub fn assemble_mass(model: &Model) -> SolverResult<Mat> {
    let n_dofs = model.node_count() * DOFS_PER_NODE;
    let dofs = dof_map(model);
    let mut m_global = Mat::zeros(n_dofs, n_dofs);

    for element in model.elements.values() {
        let length = model.element_length(element)?;
        let m_local = math::frame_consistent_mass(
            element.material.rho,
            element.section.a,
            element.section.iy,
            element.section.iz,
            length,
        );
        let t = element_transformation(model, element)?;
        let m_element = t.transpose() * m_local * t;

        let (i_dof, j_dof) = element_endpoints(element, &dofs)?;
        scatter_add(&mut m_global, &m_element, i_dof, j_dof);
    }

    Ok(m_global)
}

/// Sum of local fixed-end reactions for one element under a load case
///
/// Already scaled by the case factor and condensed for the element kind's
/// releases. Returns `None` when the case applies nothing to the element.
pub(crate) fn element_fixed_end_reactions(
    model: &Model,
    element_id: &str,
    element: &Element,
    case: &LoadCase,
) -> SolverResult<Option<Vec12>> {
    let loads = match case.element_loads.get(element_id) {
        Some(loads) if !loads.is_empty() => loads,
        _ => return Ok(None),
    };

    let length = model.element_length(element)?;
    let mut fer = Vec12::zeros();
    for load in loads {
        let magnitude = case.factor * load.magnitude;
        let axis = load.axis.index();
        fer += match load.kind {
            ElementLoadKind::Distributed => math::fer_uniform_load(magnitude, length, axis),
            ElementLoadKind::Point => {
                math::fer_point_load(magnitude, load.position * length, length, axis)
            }
            ElementLoadKind::Moment => {
                math::fer_point_moment(magnitude, load.position * length, length, axis)
            }
        };
    }

    let releases = element.kind.releases();
    if releases.iter().any(|&r| r) {
        let k_local = math::frame_local_stiffness(
            element.material.e,
            element.material.g,
            element.section.a,
            element.section.iy,
            element.section.iz,
            element.section.j,
            length,
        );
        fer = math::apply_fer_releases(&fer, &k_local, &releases);
    }

    Ok(Some(fer))
}

/// Assemble the (6N)x1 global load vector for one load case
///
/// Node loads (the case override wins over the node's base load) land at the
/// node's six rows; element loads are converted to statically equivalent
/// nodal loads through the fixed-end reaction tables first.
pub fn assemble_load_vector(model: &Model, case: &LoadCase) -> SolverResult<Vec> {
    let n_dofs = model.node_count() * DOFS_PER_NODE;
    let dofs = dof_map(model);
    let mut p = Vec::zeros(n_dofs);

    // Direct node loads
    for (id, node) in &model.nodes {
        let load = case.node_loads.get(id).unwrap_or(&node.load);
        if load.is_zero() {
            continue;
        }
        let base = dofs[id];
        let components = load.as_array();
        for (i, &value) in components.iter().enumerate() {
            p[base + i] += case.factor * value;
        }
    }

    // Element loads referencing unknown elements are caller bugs
    for element_id in case.element_loads.keys() {
        if !model.elements.contains_key(element_id) {
            return Err(SolverError::ElementNotFound(element_id.clone()));
        }
    }

    // Equivalent nodal loads: subtract the transformed fixed-end reactions
    for (element_id, element) in &model.elements {
        let fer_local = match element_fixed_end_reactions(model, element_id, element, case)? {
            Some(fer) => fer,
            None => continue,
        };

        let t = element_transformation(model, element)?;
        let fer_global = t.transpose() * fer_local;

        let (i_dof, j_dof) = element_endpoints(element, &dofs)?;
        for i in 0..DOFS_PER_NODE {
            p[i_dof + i] -= fer_global[i];
            p[j_dof + i] -= fer_global[i + 6];
        }
    }

    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Node, Section, Support};
    use crate::loads::{ElementLoad, LoadAxis, LoadCategory, NodeLoad};
    use approx::assert_relative_eq;

    fn cantilever_model() -> Model {
        let mut model = Model::new();
        model
            .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
            .unwrap();
        model.add_node("N2", Node::new(4.0, 0.0, 0.0)).unwrap();
        model
            .add_element(
                "E1",
                crate::elements::Element::new(
                    "N1",
                    "N2",
                    Material::steel(),
                    Section::rectangular(0.2, 0.4),
                ),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_stiffness_symmetric() {
        let model = cantilever_model();
        let k = assemble_stiffness(&model).unwrap();

        assert_eq!(k.nrows(), 12);
        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_mass_symmetric_and_positive_diagonal() {
        let model = cantilever_model();
        let m = assemble_mass(&model).unwrap();

        for i in 0..12 {
            assert!(m[(i, i)] > 0.0, "zero mass diagonal at {}", i);
            for j in 0..12 {
                assert_relative_eq!(m[(i, j)], m[(j, i)], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_load_vector_node_override() {
        let mut model = cantilever_model();
        // Base load on N2 that the case overrides
        let mut n2 = model.node("N2").unwrap();
        n2.load = NodeLoad::fy(-1.0);
        model.nodes.insert("N2".to_string(), n2);

        let case = crate::loads::LoadCase::new("Live", LoadCategory::Live)
            .with_factor(2.0)
            .with_node_load("N2", NodeLoad::fy(-1000.0));

        let p = assemble_load_vector(&model, &case).unwrap();
        // N2 is the second node: its fy row is 6 + 1
        assert_relative_eq!(p[7], -2000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_load_vector_distributed_totals() {
        let model = cantilever_model();
        let w = -5000.0;
        let case = crate::loads::LoadCase::new("Dead", LoadCategory::Dead)
            .with_element_load("E1", ElementLoad::distributed(w, LoadAxis::Y));

        let p = assemble_load_vector(&model, &case).unwrap();

        // Total applied force equals w*L (element along X, local y = global Y)
        let total: f64 = p[1] + p[7];
        assert_relative_eq!(total, w * 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_load_vector_unknown_element_rejected() {
        let model = cantilever_model();
        let case = crate::loads::LoadCase::new("Dead", LoadCategory::Dead)
            .with_element_load("E9", ElementLoad::distributed(-1.0, LoadAxis::Y));

        assert!(matches!(
            assemble_load_vector(&model, &case),
            Err(SolverError::ElementNotFound(_))
        ));
    }
}
