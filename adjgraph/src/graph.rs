//! Compact graph data structure.

use itertools::Itertools;

pub type Vertex = u32;

/// A compact adjacency list intended for sparse graphs.
///
/// The space of vertices is a contiguous range of u32 ints
/// from [0, nvertices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    offsets: Vec<usize>,
    neighbors: Vec<Vertex>,
}

impl AdjacencyGraph {
    /// `offsets.len()` should be one greater than the number of vertices
    /// with `neighbors[offsets[i]..offsets[i+1]]` being the edges incident
    /// from `i`. The trailing offset must equal `neighbors.len()`.
    pub(crate) fn new(offsets: Vec<usize>, neighbors: Vec<Vertex>) -> Self {
        assert!(!offsets.is_empty());
        assert!(offsets.len() <= (1 << 32) + 1);
        debug_assert_eq!(offsets[0], 0);
        debug_assert_eq!(offsets[offsets.len() - 1], neighbors.len());
        debug_assert!(offsets.iter().tuple_windows().all(|(lo, hi)| lo <= hi));
        debug_assert!(neighbors
            .iter()
            .all(|&w| (w as usize) < offsets.len() - 1));
        Self { offsets, neighbors }
    }

    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        &self.neighbors[lo..hi]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        hi - lo
    }

    pub fn nvertices(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn nedges(&self) -> usize {
        self.neighbors.len()
    }

    /// Start of each vertex's slice, without the trailing `nedges` sentinel.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets[..self.nvertices()]
    }

    pub fn edges(&self) -> &[Vertex] {
        &self.neighbors
    }

    pub fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().tuple_windows().map(|(lo, hi)| hi - lo)
    }

    pub fn max_degree(&self) -> usize {
        self.degrees().max().unwrap_or(0)
    }
}
