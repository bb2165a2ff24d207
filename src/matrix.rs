//! Dense adjacency matrices for directed graphs.
//!
//! Representation notes:
//! - Cells are `u8`, stored row-major in one contiguous allocation, and are
//!   always normalized to exactly `0` or `1` (nonzero input collapses to `1`).
//! - The matrix is always square; vertex indices range over `[0, n)`.
//! - The diagonal is ordinary data: self-loops are representable and nothing
//!   here forces reflexivity.
//!
//! The text format matches the one-shot input files consumed by the demos:
//! a `rows columns` header, then `rows * columns` whitespace-separated
//! integers in row-major order. Cell tokens may span lines arbitrarily.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// A square 0/1 matrix over vertex pairs: cell `(i, j)` is nonzero iff the
/// graph has the directed edge `i -> j`.
///
/// The same type carries both the input relation and the closure result;
/// a reachability matrix is just an adjacency matrix of the closed relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// An all-zero `n x n` matrix (no edges).
    pub fn zeros(n: usize) -> Self {
        Self { n, cells: vec![0u8; n * n] }
    }

    /// Build from nested rows, normalizing nonzero cells to 1.
    ///
    /// Fails with [`Error::NotSquare`] if any row's length differs from the
    /// row count.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::NotSquare { rows: n, columns: row.len() });
            }
            cells.extend(row.iter().map(|&c| u8::from(c != 0)));
        }
        Ok(Self { n, cells })
    }

    /// Build from a directed edge list.
    ///
    /// Out-of-range edges are ignored (callers should validate, but be
    /// robust). Duplicate edges collapse to a single 1 cell.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut m = Self::zeros(n);
        for &(u, v) in edges {
            if u >= n || v >= n {
                continue;
            }
            m.cells[u * n + v] = 1;
        }
        m
    }

    /// Matrix dimension (vertex count).
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of 1 cells.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Cell `(i, j)`: 1 iff the edge `i -> j` is present.
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        assert!(i < self.n && j < self.n, "cell ({i},{j}) out of range for dim {}", self.n);
        self.cells[i * self.n + j]
    }

    /// Set cell `(i, j)`, normalizing nonzero to 1.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: u8) {
        assert!(i < self.n && j < self.n, "cell ({i},{j}) out of range for dim {}", self.n);
        self.cells[i * self.n + j] = u8::from(value != 0);
    }

    /// Row `i` as a contiguous slice of length `dim()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[u8] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// The raw row-major cells, length `dim() * dim()`.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Parse the text format from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse the text format from any buffered reader.
    ///
    /// Square-ness is checked from the header alone; a non-square declaration
    /// fails before any cell token is consumed. Anything after the final cell
    /// is ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tokens = Tokens::new(reader);

        let rows = tokens.require_dim("rows")?;
        let columns = tokens.require_dim("columns")?;
        if rows != columns {
            return Err(Error::NotSquare { rows, columns });
        }
        if rows == 0 {
            return Err(Error::EmptyMatrix);
        }

        let n = rows;
        let mut cells = Vec::with_capacity(n * n);
        for _ in 0..n * n {
            let v = tokens.require_cell(cells.len(), n * n)?;
            cells.push(u8::from(v != 0));
        }
        Ok(Self { n, cells })
    }
}

/// Row-major pretty-print: space-separated cells, one row per line.
impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for (j, cell) in self.row(i).iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(feature = "petgraph")]
impl AdjacencyMatrix {
    /// Build the adjacency matrix of a directed petgraph graph, indexed by
    /// `NodeIndex::index()`.
    pub fn from_petgraph<N, E, Ix>(graph: &petgraph::Graph<N, E, petgraph::Directed, Ix>) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        let n = graph.node_count();
        let mut m = Self::zeros(n);
        for edge in graph.edge_indices() {
            let (a, b) = graph.edge_endpoints(edge).unwrap();
            m.set(a.index(), b.index(), 1);
        }
        m
    }
}

/// Whitespace-separated integer tokens over a buffered reader, tracking line
/// numbers for error context. Tokens may span lines, matching the stream
/// semantics of the input format.
struct Tokens<R> {
    reader: R,
    line: String,
    line_no: usize,
    pos: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0, pos: 0 }
    }

    /// Next integer token, or `None` at end of input.
    fn next_i64(&mut self, what: &str) -> Result<Option<i64>> {
        loop {
            let rest = &self.line[self.pos..];
            if let Some(off) = rest.find(|c: char| !c.is_whitespace()) {
                let start = self.pos + off;
                let end = self.line[start..]
                    .find(char::is_whitespace)
                    .map(|e| start + e)
                    .unwrap_or(self.line.len());
                let tok = &self.line[start..end];
                let v = tok.parse::<i64>().map_err(|e| Error::Parse {
                    line: self.line_no,
                    reason: format!("bad {what} '{tok}': {e}"),
                })?;
                self.pos = end;
                return Ok(Some(v));
            }
            self.line.clear();
            self.pos = 0;
            self.line_no += 1;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
        }
    }

    fn require_dim(&mut self, what: &str) -> Result<usize> {
        let v = self.next_i64(what)?.ok_or_else(|| Error::Parse {
            line: self.line_no,
            reason: format!("missing {what} in header"),
        })?;
        usize::try_from(v).map_err(|_| Error::Parse {
            line: self.line_no,
            reason: format!("{what} must be non-negative, got {v}"),
        })
    }

    fn require_cell(&mut self, have: usize, want: usize) -> Result<i64> {
        self.next_i64("cell")?.ok_or_else(|| Error::Parse {
            line: self.line_no,
            reason: format!("expected {want} cells, input ended after {have}"),
        })
    }
}
