//! Force, stress, and reaction recovery from a solved displacement field

use std::collections::BTreeMap;

use crate::assembly::{self, DOFS_PER_NODE};
use crate::elements::{Element, Section};
use crate::error::SolverResult;
use crate::loads::LoadCase;
use crate::math::{Mat, Vec, Vec12};
use crate::model::Model;
use crate::results::{
    AnalysisResults, ElementForces, ElementStress, NodeDisplacement, Reaction,
};

/// Gather an element's 12 global displacement components from the full vector
fn gather_element_displacements(
    element: &Element,
    dofs: &BTreeMap<String, usize>,
    u_full: &Vec,
) -> Vec12 {
    let i_dof = dofs[&element.i_node];
    let j_dof = dofs[&element.j_node];

    let mut d = Vec12::zeros();
    for k in 0..DOFS_PER_NODE {
        d[k] = u_full[i_dof + k];
        d[k + 6] = u_full[j_dof + k];
    }
    d
}

/// Local end forces of one element: f = k_local * T * u + FER
pub(crate) fn element_local_forces(
    model: &Model,
    element_id: &str,
    element: &Element,
    dofs: &BTreeMap<String, usize>,
    u_full: &Vec,
    case: &LoadCase,
) -> SolverResult<Vec12> {
    let k_local = assembly::element_local_stiffness(model, element)?;
    let t = assembly::element_transformation(model, element)?;

    let d_global = gather_element_displacements(element, dofs, u_full);
    let d_local = t * d_global;
    let mut f_local = k_local * d_local;

    if let Some(fer) = assembly::element_fixed_end_reactions(model, element_id, element, case)? {
        f_local += fer;
    }

    Ok(f_local)
}

/// Tension-positive axial force of every element at the current displacements
///
/// Feeds the geometric stiffness of the nonlinear tangent.
pub(crate) fn element_axial_forces(
    model: &Model,
    u_full: &Vec,
    case: &LoadCase,
) -> SolverResult<BTreeMap<String, f64>> {
    let dofs = assembly::dof_map(model);
    let mut axial = BTreeMap::new();

    for (id, element) in &model.elements {
        let f_local = element_local_forces(model, id, element, &dofs, u_full, case)?;
        axial.insert(id.clone(), -f_local[0]);
    }

    Ok(axial)
}

/// Stresses from local end forces and the section
///
/// Torsional shear uses the polar radius of gyration as the effective fiber
/// distance, an approximation that is exact for circular sections. The
/// combined value is a von-Mises-like bound built from the worst-case normal
/// and shear components.
fn stress_from_forces(forces: &ElementForces, section: &Section) -> ElementStress {
    let axial = forces.i.axial / section.a;
    let shear_y = forces.max_of(|e| e.shear_y) / section.a;
    let shear_z = forces.max_of(|e| e.shear_z) / section.a;

    let r_polar = (section.ip() / section.a).sqrt();
    let torsion = forces.max_of(|e| e.torsion) * r_polar / section.j;

    let bending_y = forces.max_of(|e| e.moment_y) / section.sy;
    let bending_z = forces.max_of(|e| e.moment_z) / section.sz;

    let normal = axial.abs() + bending_y + bending_z;
    let shear = (shear_y.powi(2) + shear_z.powi(2)).sqrt() + torsion;
    let combined = (normal.powi(2) + 3.0 * shear.powi(2)).sqrt();

    ElementStress {
        axial,
        shear_y,
        shear_z,
        torsion,
        bending_y,
        bending_z,
        combined,
    }
}

/// Build the full result set from a solved displacement field
///
/// `k_global` and `f_global` are the unreduced system the displacements were
/// solved from; reactions are R = K·u - F at restrained DOFs.
pub(crate) fn recover_results(
    model: &Model,
    k_global: &Mat,
    f_global: &Vec,
    u_full: &Vec,
    case: &LoadCase,
    restrained_dofs: &[usize],
) -> SolverResult<AnalysisResults> {
    let dofs = assembly::dof_map(model);
    let mut results = AnalysisResults::default();

    for (id, &base) in &dofs {
        let mut components = [0.0; 6];
        for (k, slot) in components.iter_mut().enumerate() {
            *slot = u_full[base + k];
        }
        results
            .node_displacements
            .insert(id.clone(), NodeDisplacement::from_array(components));
    }

    for (id, element) in &model.elements {
        let f_local = element_local_forces(model, id, element, &dofs, u_full, case)?;

        let mut components = [0.0; 12];
        for (k, slot) in components.iter_mut().enumerate() {
            *slot = f_local[k];
        }
        let forces = ElementForces::from_local(&components);
        let stress = stress_from_forces(&forces, &element.section);

        results.element_forces.insert(id.clone(), forces);
        results.element_stresses.insert(id.clone(), stress);
    }

    // Reactions: residual of the full equilibrium at restrained DOFs
    let r_full = k_global * u_full - f_global;
    for (id, &base) in &dofs {
        let rows = base..base + DOFS_PER_NODE;
        if !restrained_dofs.iter().any(|&dof| rows.contains(&dof)) {
            continue;
        }
        let mut components = [0.0; 6];
        for &dof in restrained_dofs {
            if rows.contains(&dof) {
                components[dof - base] = r_full[dof];
            }
        }
        results
            .reactions
            .insert(id.clone(), Reaction::from_array(components));
    }

    Ok(results)
}
