//! Error types for reach.

use thiserror::Error;

/// Result type alias using reach's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by matrix loading, graph generation, and the closure
/// engine's verification path.
///
/// Every variant is fatal to the operation that produced it: the inputs are
/// static and the computation is deterministic, so nothing here is worth
/// retrying.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("failed to read matrix input: {0}")]
    Io(#[from] std::io::Error),

    /// A token in the input was missing or not an integer.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number in the input text.
        line: usize,
        /// What went wrong with the token.
        reason: String,
    },

    /// The declared dimensions are not square.
    #[error("adjacency matrix must be square, got {rows}x{columns}")]
    NotSquare {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        columns: usize,
    },

    /// A zero-dimension matrix was declared or requested.
    #[error("adjacency matrix dimension must be at least 1")]
    EmptyMatrix,

    /// More edges were requested than a simple directed graph can hold.
    #[error("requested {requested} edges, but {vertices} vertices admit at most {max}")]
    TooManyEdges {
        /// Requested edge count.
        requested: usize,
        /// Requested vertex count.
        vertices: usize,
        /// Maximum edge count, `vertices * (vertices - 1)`.
        max: usize,
    },

    /// Two matrices being compared do not have the same dimension.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the left matrix.
        left: usize,
        /// Dimension of the right matrix.
        right: usize,
    },

    /// Two closure results disagree at a cell (verification path only).
    #[error("closure results disagree at ({row},{col}): {left} vs {right}")]
    ClosureMismatch {
        /// Row of the first disagreeing cell.
        row: usize,
        /// Column of the first disagreeing cell.
        col: usize,
        /// Value in the left matrix.
        left: u8,
        /// Value in the right matrix.
        right: u8,
    },

    /// The computation was cancelled between pivot rounds.
    #[error("closure computation cancelled after {completed_rounds} rounds")]
    Cancelled {
        /// Number of pivot rounds that had fully completed.
        completed_rounds: usize,
    },
}
