//! Coordinate (triplet) form of a sparse matrix, stripped of values.

use crate::error::{Error, Result};
use crate::graph::Vertex;

/// A list of `(row, col)` pairs over `nvertices` vertices.
///
/// Pairs keep the order they were supplied in. Nothing is required of
/// them beyond equal-length index vectors: duplicates, self-loops and
/// unsorted input are all fine, and range checks are deferred to
/// [`compress`](crate::compress::compress).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateMatrix {
    nvertices: usize,
    rows: Vec<Vertex>,
    cols: Vec<Vertex>,
}

impl CoordinateMatrix {
    pub fn new(nvertices: usize, rows: Vec<Vertex>, cols: Vec<Vertex>) -> Result<Self> {
        if rows.len() != cols.len() {
            return Err(Error::LengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
            });
        }
        Ok(Self {
            nvertices,
            rows,
            cols,
        })
    }

    pub fn nvertices(&self) -> usize {
        self.nvertices
    }

    pub fn nedges(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vertex] {
        &self.rows
    }

    pub fn cols(&self) -> &[Vertex] {
        &self.cols
    }

    pub fn pairs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.rows.iter().copied().zip(self.cols.iter().copied())
    }
}
