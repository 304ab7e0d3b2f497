//! Error types for the frame solver

use thiserror::Error;

/// Main error type for solver operations
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Element '{0}' not found in model")]
    ElementNotFound(String),

    #[error("Load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Dimension mismatch in {op}: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Singular matrix: pivot vanished at equation {dof} - model may be unstable or have insufficient supports")]
    SingularMatrix { dof: usize },

    #[error("Model is unstable: {0}")]
    Unstable(String),

    #[error("Mass matrix is not positive definite - check element densities and areas")]
    IllConditionedMass,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
