/// Error types for geometry construction and mesh loading
use thiserror::Error;

/// Failures of the buckyball construction itself.
///
/// Both variants signal a defect in the algorithm, never bad input: the
/// generator takes no parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("structural invariant violated at {stage}: expected {expected}, got {actual}")]
    StructuralInvariantViolation {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("point {index} has zero norm and cannot be normalized")]
    DegenerateNormalization { index: usize },
}

/// Errors while reading STL data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooSmall(usize),

    #[error("unexpected end of file in facet {0}")]
    UnexpectedEof(usize),

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}
