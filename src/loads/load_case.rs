//! Load cases

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ElementLoad, NodeLoad};

/// Category of a load case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadCategory {
    Dead,
    Live,
    Wind,
    Seismic,
    Thermal,
    Construction,
}

/// A named, scaled set of applied loads representing one loading scenario
///
/// Each analysis run operates on exactly one load case; combinations are
/// constructed externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    /// Unique name of the load case
    pub name: String,
    /// Category tag
    pub category: LoadCategory,
    /// Scale factor applied to every load in the case
    pub factor: f64,
    /// Per-node load overrides (replace the node's base load for this case)
    pub node_loads: BTreeMap<String, NodeLoad>,
    /// Loads applied along elements
    pub element_loads: BTreeMap<String, Vec<ElementLoad>>,
}

impl LoadCase {
    /// Create a new load case with factor 1.0
    pub fn new(name: &str, category: LoadCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            factor: 1.0,
            node_loads: BTreeMap::new(),
            element_loads: BTreeMap::new(),
        }
    }

    /// Set the scale factor
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Override the load at a node for this case
    pub fn with_node_load(mut self, node_id: &str, load: NodeLoad) -> Self {
        self.node_loads.insert(node_id.to_string(), load);
        self
    }

    /// Add a load along an element for this case
    pub fn with_element_load(mut self, element_id: &str, load: ElementLoad) -> Self {
        self.element_loads
            .entry(element_id.to_string())
            .or_default()
            .push(load);
        self
    }

    /// Common load cases
    pub fn dead() -> Self {
        Self::new("Dead", LoadCategory::Dead)
    }

    pub fn live() -> Self {
        Self::new("Live", LoadCategory::Live)
    }

    pub fn wind() -> Self {
        Self::new("Wind", LoadCategory::Wind)
    }

    pub fn seismic() -> Self {
        Self::new("Seismic", LoadCategory::Seismic)
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::new("Case 1", LoadCategory::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadAxis;

    #[test]
    fn test_builder() {
        let case = LoadCase::new("Service", LoadCategory::Live)
            .with_factor(1.5)
            .with_node_load("N2", NodeLoad::fy(-10e3))
            .with_element_load("E1", ElementLoad::distributed(-5e3, LoadAxis::Y));

        assert_eq!(case.factor, 1.5);
        assert!(case.node_loads.contains_key("N2"));
        assert_eq!(case.element_loads["E1"].len(), 1);
    }
}
