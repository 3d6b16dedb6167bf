//! Coordinate list to compressed adjacency conversion.
//!
//! This is a two-pass counting sort keyed on the row index. The first
//! pass histograms out-degrees, a prefix sum turns the histogram into
//! offsets, and the second pass scatters destinations through a cursor
//! per vertex. Scattering in input order makes the sort stable: each
//! vertex's neighbors appear in the order their pairs were supplied.

use std::iter;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::coo::CoordinateMatrix;
use crate::error::{Axis, Error, Result};
use crate::graph::{AdjacencyGraph, Vertex};

/// Builds the adjacency graph for `coo`, rejecting any pair with an
/// endpoint outside `[0, nvertices)`.
pub fn compress(coo: &CoordinateMatrix) -> Result<AdjacencyGraph> {
    check_bounds(coo)?;

    let nvertices = coo.nvertices();
    let offsets = histogram(coo);
    debug_assert_eq!(offsets[nvertices], coo.nedges());

    // the cursor is its own buffer so that `offsets` stays the final answer
    let mut cursor = offsets[..nvertices].to_vec();
    let mut edges: Vec<Vertex> = vec![0; coo.nedges()];
    for (row, col) in coo.pairs() {
        let slot = &mut cursor[row as usize];
        edges[*slot] = col;
        *slot += 1;
    }
    debug_assert!(cursor
        .iter()
        .zip(offsets[1..].iter())
        .all(|(end, next)| end == next));

    Ok(AdjacencyGraph::new(offsets, edges))
}

/// Reports the lowest-numbered edge with an out-of-range endpoint.
fn check_bounds(coo: &CoordinateMatrix) -> Result<()> {
    let nvertices = coo.nvertices();
    let in_range = |v: Vertex| (v as usize) < nvertices;
    let bad = coo
        .rows()
        .par_iter()
        .zip(coo.cols().par_iter())
        .position_first(|(&r, &c)| !in_range(r) || !in_range(c));
    match bad {
        None => Ok(()),
        Some(edge) => {
            let (r, c) = (coo.rows()[edge], coo.cols()[edge]);
            let (axis, index) = if in_range(r) {
                (Axis::Col, c)
            } else {
                (Axis::Row, r)
            };
            Err(Error::IndexOutOfRange {
                edge,
                axis,
                index: i64::from(index),
                bound: nvertices,
            })
        }
    }
}

/// Returns `nvertices + 1` offsets, where `offsets[v]` counts the pairs
/// with a row below `v`. Rows must already be in range.
fn histogram(coo: &CoordinateMatrix) -> Vec<usize> {
    // counting is order-insensitive, so it can be split across threads;
    // the prefix sum below is the barrier before the ordered scatter
    let counts: Vec<_> = iter::repeat_with(|| AtomicUsize::new(0))
        .take(coo.nvertices() + 1)
        .collect();
    coo.rows().par_iter().for_each(|&r| {
        counts[1 + r as usize].fetch_add(1, Ordering::Relaxed);
    });

    let mut cumsum = 0;
    counts
        .into_iter()
        .map(|count| {
            cumsum += count.into_inner();
            cumsum
        })
        .collect()
}
