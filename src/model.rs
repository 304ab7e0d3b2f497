//! Structural model - the in-memory graph of nodes, elements, and load cases
//!
//! The model is owned by the caller and mutated only before analysis; the
//! analysis drivers borrow it read-only and produce independent result
//! objects. Sorted maps give a deterministic DOF ordering, so repeated runs
//! on an unmodified model reproduce identical results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::elements::{Element, Node};
use crate::error::{SolverError, SolverResult};
use crate::loads::LoadCase;

/// Shortest element length accepted as non-degenerate, in model units
pub(crate) const MIN_ELEMENT_LENGTH: f64 = 1e-10;

/// The structural model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub(crate) nodes: BTreeMap<String, Node>,
    pub(crate) elements: BTreeMap<String, Element>,
    pub(crate) load_cases: BTreeMap<String, LoadCase>,
}

impl Model {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the model
    pub fn add_node(&mut self, id: &str, node: Node) -> SolverResult<()> {
        if self.nodes.contains_key(id) {
            return Err(SolverError::DuplicateName(id.to_string()));
        }
        self.nodes.insert(id.to_string(), node);
        Ok(())
    }

    /// Add an element to the model
    ///
    /// Fails without mutating the element collection if either endpoint is
    /// absent, the endpoints coincide, or the element has zero length.
    pub fn add_element(&mut self, id: &str, element: Element) -> SolverResult<()> {
        if self.elements.contains_key(id) {
            return Err(SolverError::DuplicateName(id.to_string()));
        }
        let i_node = self
            .nodes
            .get(&element.i_node)
            .ok_or_else(|| SolverError::NodeNotFound(element.i_node.clone()))?;
        let j_node = self
            .nodes
            .get(&element.j_node)
            .ok_or_else(|| SolverError::NodeNotFound(element.j_node.clone()))?;
        if element.i_node == element.j_node {
            return Err(SolverError::InvalidGeometry(format!(
                "element '{}' connects node '{}' to itself",
                id, element.i_node
            )));
        }
        if i_node.distance_to(j_node) < MIN_ELEMENT_LENGTH {
            return Err(SolverError::InvalidGeometry(format!(
                "element '{}' has zero length: i='{}', j='{}'",
                id, element.i_node, element.j_node
            )));
        }

        self.elements.insert(id.to_string(), element);
        Ok(())
    }

    /// Add a load case to the model
    pub fn add_load_case(&mut self, case: LoadCase) -> SolverResult<()> {
        if self.load_cases.contains_key(&case.name) {
            return Err(SolverError::DuplicateName(case.name.clone()));
        }
        self.load_cases.insert(case.name.clone(), case);
        Ok(())
    }

    /// Get a snapshot of a node
    pub fn node(&self, id: &str) -> Option<Node> {
        self.nodes.get(id).cloned()
    }

    /// Get a snapshot of an element
    pub fn element(&self, id: &str) -> Option<Element> {
        self.elements.get(id).cloned()
    }

    /// Get a snapshot of a load case
    pub fn load_case(&self, name: &str) -> Option<LoadCase> {
        self.load_cases.get(name).cloned()
    }

    /// Node ids in DOF order
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Element ids in sorted order
    pub fn element_ids(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }

    /// Load case names in sorted order
    pub fn load_case_names(&self) -> Vec<String> {
        self.load_cases.keys().cloned().collect()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Length of an element, from its endpoint snapshots
    pub(crate) fn element_length(&self, element: &Element) -> SolverResult<f64> {
        let i_node = self
            .nodes
            .get(&element.i_node)
            .ok_or_else(|| SolverError::NodeNotFound(element.i_node.clone()))?;
        let j_node = self
            .nodes
            .get(&element.j_node)
            .ok_or_else(|| SolverError::NodeNotFound(element.j_node.clone()))?;
        Ok(i_node.distance_to(j_node))
    }

    /// Validate referential integrity before analysis
    ///
    /// Every element's two node ids must exist, be distinct, and span a
    /// positive length. Runs before any matrix work begins.
    pub fn validate(&self) -> SolverResult<()> {
        if self.nodes.is_empty() {
            return Err(SolverError::AnalysisFailed("model has no nodes".to_string()));
        }
        for (id, element) in &self.elements {
            if !self.nodes.contains_key(&element.i_node) {
                return Err(SolverError::NodeNotFound(element.i_node.clone()));
            }
            if !self.nodes.contains_key(&element.j_node) {
                return Err(SolverError::NodeNotFound(element.j_node.clone()));
            }
            if element.i_node == element.j_node {
                return Err(SolverError::InvalidGeometry(format!(
                    "element '{}' connects node '{}' to itself",
                    id, element.i_node
                )));
            }
            if self.element_length(element)? < MIN_ELEMENT_LENGTH {
                return Err(SolverError::InvalidGeometry(format!(
                    "element '{}' has zero length",
                    id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Section, Support};
    use crate::loads::{LoadCase, LoadCategory};

    fn two_node_model() -> Model {
        let mut model = Model::new();
        model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node("N2", Node::new(5.0, 0.0, 0.0)).unwrap();
        model
    }

    #[test]
    fn test_add_element_missing_node_does_not_mutate() {
        let mut model = two_node_model();
        let element = Element::new("N1", "N9", Material::steel(), Section::default());

        let result = model.add_element("E1", element);
        assert!(matches!(result, Err(SolverError::NodeNotFound(ref n)) if n == "N9"));
        assert_eq!(model.element_count(), 0);
    }

    #[test]
    fn test_add_element_zero_length_rejected() {
        let mut model = two_node_model();
        model.add_node("N3", Node::new(0.0, 0.0, 0.0)).unwrap();

        let element = Element::new("N1", "N3", Material::steel(), Section::default());
        assert!(matches!(
            model.add_element("E1", element),
            Err(SolverError::InvalidGeometry(_))
        ));

        let element = Element::new("N1", "N1", Material::steel(), Section::default());
        assert!(matches!(
            model.add_element("E2", element),
            Err(SolverError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut model = two_node_model();
        assert!(matches!(
            model.add_node("N1", Node::new(1.0, 1.0, 1.0)),
            Err(SolverError::DuplicateName(_))
        ));

        model.add_load_case(LoadCase::dead()).unwrap();
        assert!(matches!(
            model.add_load_case(LoadCase::new("Dead", LoadCategory::Dead)),
            Err(SolverError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_snapshots_are_copies() {
        let model = two_node_model();
        let mut snapshot = model.node("N1").unwrap();
        snapshot.support = Support::fixed();

        // Mutating the snapshot leaves the model untouched
        assert!(!model.node("N1").unwrap().support.is_supported());
    }

    #[test]
    fn test_validate_ok() {
        let mut model = two_node_model();
        model
            .add_element(
                "E1",
                Element::new("N1", "N2", Material::steel(), Section::default()),
            )
            .unwrap();
        assert!(model.validate().is_ok());
    }
}
