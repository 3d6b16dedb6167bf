//! Line-oriented rendering of an [`AdjacencyGraph`].
//!
//! The format is one token per line: the `AdjacencyGraph` tag, the vertex
//! count, the edge count, every offset, then every edge. The trailing
//! offset sentinel is not written.

use std::fmt;
use std::iter;

use crate::graph::AdjacencyGraph;

pub const HEADER: &str = "AdjacencyGraph";

/// A single line of output, without its newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Header,
    Int(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Header => f.write_str(HEADER),
            Line::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Lazily yields the `3 + nvertices + nedges` lines describing `graph`.
pub fn lines(graph: &AdjacencyGraph) -> impl Iterator<Item = Line> + '_ {
    iter::once(Line::Header)
        .chain(iter::once(Line::Int(graph.nvertices())))
        .chain(iter::once(Line::Int(graph.nedges())))
        .chain(graph.offsets().iter().map(|&o| Line::Int(o)))
        .chain(graph.edges().iter().map(|&e| Line::Int(e as usize)))
}
