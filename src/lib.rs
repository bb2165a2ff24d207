//! # reach
//!
//! Transitive closure (reachability) kernels for dense directed graphs.
//!
//! The crate is intentionally small:
//! - [`AdjacencyMatrix`]: a square 0/1 matrix, loadable from a simple text
//!   format or built from edge lists.
//! - [`generate_simple_digraph`]: a seeded random simple-digraph generator
//!   (no loops, no duplicate edges).
//! - [`transitive_closure`] / `transitive_closure_parallel`: the Warshall
//!   closure with interchangeable sequential and data-parallel strategies,
//!   guaranteed bit-identical.
//! - [`first_mismatch`] / [`verify_equivalent`]: entrywise cross-checking of
//!   two results.
//!
//! ```
//! use reach::{transitive_closure, AdjacencyMatrix};
//!
//! // A path graph 0 -> 1 -> 2.
//! let adjacency = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]);
//! let closed = transitive_closure(&adjacency);
//! assert_eq!(closed.get(0, 2), 1);
//! assert_eq!(closed.get(2, 0), 0);
//! ```

pub mod closure;
pub mod error;
pub mod generate;
pub mod matrix;

#[cfg(feature = "parallel")]
pub use closure::transitive_closure_parallel;
pub use closure::{
    first_mismatch, transitive_closure, transitive_closure_cancellable, verify_equivalent,
    CellMismatch,
};
pub use error::{Error, Result};
pub use generate::{generate_simple_digraph, GraphConfig};
pub use matrix::AdjacencyMatrix;
