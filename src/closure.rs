//! Warshall transitive closure over dense adjacency matrices.
//!
//! Two interchangeable execution strategies with bit-identical results:
//! - [`transitive_closure`]: single-threaded triple loop.
//! - [`transitive_closure_parallel`]: each pivot round is one data-parallel
//!   pass over rows (feature `parallel`).
//!
//! The load-bearing invariant, either way:
//! - Pivot rounds are strictly ordered `k = 0..n`. Round `k + 1` must observe
//!   every update of round `k`. In the parallel strategy the join at the end
//!   of each rayon pass is that barrier.
//! - Within one round the `n x n` cell updates are independent: the update
//!   `a[i][j] |= a[i][k] & a[k][j]` never changes row `k` or column `k`
//!   during round `k`, so any evaluation order gives the same round result.
//!
//! Cells use one boolean representation throughout: `0`/`1` with `|` for OR
//! and `&` for AND. The diagonal is not forced to identity; the closure
//! starts from a copy of the input, so `(i, i)` is 1 only if the input says
//! so or a cycle through `i` exists.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::AdjacencyMatrix;

/// A single disagreeing cell between two matrices, as reported by
/// [`first_mismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMismatch {
    pub row: usize,
    pub col: usize,
    pub left: u8,
    pub right: u8,
}

/// Transitive closure of `adjacency`, sequential strategy.
///
/// Returns a new matrix; the input is untouched. Cell `(i, j)` of the result
/// is 1 iff `j` is reachable from `i` via one or more edges (or the input
/// already had `(i, j)` set).
pub fn transitive_closure(adjacency: &AdjacencyMatrix) -> AdjacencyMatrix {
    let n = adjacency.dim();
    debug!("transitive closure (sequential) over {n}x{n} matrix");

    let mut closed = adjacency.clone();
    for k in 0..n {
        closure_round(&mut closed, k);
    }
    closed
}

/// Sequential closure with cooperative cancellation.
///
/// The flag is checked between pivot rounds only, never inside one, so a
/// partially applied round is never observable. A cancelled computation
/// returns [`Error::Cancelled`] and discards the working matrix.
pub fn transitive_closure_cancellable(
    adjacency: &AdjacencyMatrix,
    cancel: &AtomicBool,
) -> Result<AdjacencyMatrix> {
    let n = adjacency.dim();
    debug!("transitive closure (sequential, cancellable) over {n}x{n} matrix");

    let mut closed = adjacency.clone();
    for k in 0..n {
        if cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled { completed_rounds: k });
        }
        closure_round(&mut closed, k);
    }
    Ok(closed)
}

/// One pivot round: `a[i][j] |= a[i][k] & a[k][j]` for all `(i, j)`.
pub(crate) fn closure_round(matrix: &mut AdjacencyMatrix, k: usize) {
    let n = matrix.dim();
    let cells = matrix.as_mut_slice();
    for i in 0..n {
        // Column k is stable within round k, so this hoist is exact: rows
        // with no path into the pivot cannot gain anything this round.
        if cells[i * n + k] == 0 {
            continue;
        }
        for j in 0..n {
            let akj = cells[k * n + j];
            cells[i * n + j] |= akj;
        }
    }
}

/// Transitive closure of `adjacency`, data-parallel strategy.
///
/// Bit-identical to [`transitive_closure`] for any input and any rayon pool
/// size. The initial copy and every pivot round are independent parallel
/// passes over rows; consecutive rounds are separated by the pass's implicit
/// join. The pivot row is snapshotted into a reused scratch buffer before
/// each round (row `k` does not change during round `k`, so the snapshot is
/// exact while keeping row borrows disjoint).
#[cfg(feature = "parallel")]
pub fn transitive_closure_parallel(adjacency: &AdjacencyMatrix) -> AdjacencyMatrix {
    use rayon::prelude::*;

    let n = adjacency.dim();
    debug!("transitive closure (parallel) over {n}x{n} matrix");
    if n == 0 {
        return adjacency.clone();
    }

    // Independent per-row copy pass.
    let mut closed = AdjacencyMatrix::zeros(n);
    closed
        .as_mut_slice()
        .par_chunks_mut(n)
        .zip(adjacency.as_slice().par_chunks(n))
        .for_each(|(dst, src)| dst.copy_from_slice(src));

    let mut pivot = vec![0u8; n];
    for k in 0..n {
        pivot.copy_from_slice(closed.row(k));
        closed.as_mut_slice().par_chunks_mut(n).for_each(|row| {
            if row[k] != 0 {
                for (cell, &p) in row.iter_mut().zip(&pivot) {
                    *cell |= p;
                }
            }
        });
        // The join above is the inter-round barrier: round k+1 starts only
        // once every row update of round k is visible.
    }
    closed
}

/// Entrywise comparison of two same-dimension matrices.
///
/// Returns the first disagreeing cell in row-major order, or `None` if the
/// matrices are equal. Panics if the dimensions differ; use
/// [`verify_equivalent`] to get that as an error instead.
pub fn first_mismatch(left: &AdjacencyMatrix, right: &AdjacencyMatrix) -> Option<CellMismatch> {
    assert_eq!(
        left.dim(),
        right.dim(),
        "first_mismatch requires same-dimension matrices"
    );
    let n = left.dim();
    left.as_slice()
        .iter()
        .zip(right.as_slice())
        .position(|(l, r)| l != r)
        .map(|idx| CellMismatch {
            row: idx / n,
            col: idx % n,
            left: left.as_slice()[idx],
            right: right.as_slice()[idx],
        })
}

/// Cross-strategy verification: error out with the first disagreeing cell.
///
/// Intended for validating one strategy against the other; a mismatch is a
/// correctness failure in a closure implementation, never a runtime fault of
/// the inputs.
pub fn verify_equivalent(left: &AdjacencyMatrix, right: &AdjacencyMatrix) -> Result<()> {
    if left.dim() != right.dim() {
        return Err(Error::DimensionMismatch { left: left.dim(), right: right.dim() });
    }
    match first_mismatch(left, right) {
        None => Ok(()),
        Some(m) => Err(Error::ClosureMismatch {
            row: m.row,
            col: m.col,
            left: m.left,
            right: m.right,
        }),
    }
}
