//! Error type for sprs-colorings

use thiserror::Error;

/// Errors reported by the coloring, compression and decompression entry
/// points.
///
/// All of them are caused by the inputs of the offending call, retrying
/// with the same inputs yields the same error.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum ColoringError {
    /// The dimensions of a pattern are inconsistent with the request,
    /// eg a symmetric structure on a non-square matrix.
    #[error("invalid shape ({rows}, {cols}): {reason}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },
    #[error("invalid structure {0:?}, expected \"nonsymmetric\" or \"symmetric\"")]
    InvalidStructure(String),
    #[error("invalid partition {0:?}, expected \"column\" or \"row\"")]
    InvalidPartition(String),
    #[error("invalid order {0:?}")]
    InvalidOrder(String),
    /// Stored coloring data is inconsistent, eg colors out of range in a
    /// deserialized basis.
    #[error("invalid coloring data: {0}")]
    InvalidColoring(&'static str),
    /// Operand dimensions disagree in compress or decompress.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, ColoringError>;
