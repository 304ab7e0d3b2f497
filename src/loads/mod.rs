//! Load types and load cases

mod element_load;
mod load_case;
mod node_load;

pub use element_load::{ElementLoad, ElementLoadKind, LoadAxis};
pub use load_case::{LoadCase, LoadCategory};
pub use node_load::NodeLoad;
