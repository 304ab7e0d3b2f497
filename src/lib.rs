//! Frame Solver - a native Rust 3D frame analysis library
//!
//! Linear and nonlinear structural analysis of 3D frames by the direct
//! stiffness method:
//! - Frame elements (beams, columns, trusses, cables)
//! - Linear static analysis
//! - Nonlinear static analysis (Newton-Raphson, optional geometric stiffness)
//! - Modal analysis (generalized eigenvalue)
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = Model::new();
//!
//! // Nodes, with a fixed support at the base
//! model
//!     .add_node("N1", Node::new(0.0, 0.0, 0.0).with_support(Support::fixed()))
//!     .unwrap();
//! model.add_node("N2", Node::new(5.0, 0.0, 0.0)).unwrap();
//!
//! // A steel cantilever with a rectangular section
//! model
//!     .add_element(
//!         "E1",
//!         Element::new("N1", "N2", Material::steel(), Section::rectangular(0.2, 0.4)),
//!     )
//!     .unwrap();
//!
//! // A load case with a tip load
//! model
//!     .add_load_case(
//!         LoadCase::new("Live", LoadCategory::Live)
//!             .with_node_load("N2", NodeLoad::fy(-10_000.0)),
//!     )
//!     .unwrap();
//!
//! // Analyze
//! let mut analyzer = Analyzer::new(&model);
//! let results = analyzer.run_linear_static("Live").unwrap();
//!
//! let tip = results.node_displacements["N2"];
//! assert!(tip.dy < 0.0);
//! ```

pub mod analysis;
pub mod assembly;
pub mod boundary;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisState, Analyzer};
    pub use crate::elements::{
        Element, ElementKind, Material, MaterialClass, Node, Section, Support,
    };
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::loads::{ElementLoad, LoadAxis, LoadCase, LoadCategory, NodeLoad};
    pub use crate::model::Model;
    pub use crate::results::{
        AnalysisResults, ElementForces, ElementStress, NodeDisplacement, Reaction,
    };
}
