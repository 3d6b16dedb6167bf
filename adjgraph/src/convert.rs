//! The end-to-end conversion: Matrix Market in, `AdjacencyGraph` out.

use std::path::Path;
use std::time::Instant;

use serde_json::json;

use crate::compress::compress;
use crate::error::Result;
use crate::{graphio, mtx, SummaryStats};

/// Shape of a converted graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub nvertices: usize,
    pub nedges: usize,
    pub max_degree: usize,
    pub degrees: Option<SummaryStats>,
}

/// Reads `input`, compresses it, and writes the result to `output`.
///
/// Progress is logged as one JSON object per line on stdout. On error
/// nothing is left at `output` beyond what was there before.
pub fn convert(input: &Path, output: &Path) -> Result<Summary> {
    let read_start = Instant::now();
    let coo = mtx::read(input)?;
    println!(
        "{}",
        json!({
            "input": input.display().to_string(),
            "nvertices": coo.nvertices(),
            "nedges": coo.nedges(),
            "read_time": format!("{:.0?}", Instant::now().duration_since(read_start)),
        })
    );

    let compress_start = Instant::now();
    let graph = compress(&coo)?;
    drop(coo);
    let compress_time = format!("{:.0?}", Instant::now().duration_since(compress_start));

    let summary = Summary {
        nvertices: graph.nvertices(),
        nedges: graph.nedges(),
        max_degree: graph.max_degree(),
        degrees: SummaryStats::from(graph.degrees().map(|d| d as f64)),
    };
    println!(
        "{}",
        json!({
            "compress_time": compress_time,
            "max_degree": summary.max_degree,
            "degree_stats": summary.degrees.as_ref().map(|s| s.to_map()),
        })
    );

    let write_start = Instant::now();
    graphio::write_file(&graph, output)?;
    println!(
        "{}",
        json!({
            "output": output.display().to_string(),
            "write_time": format!("{:.0?}", Instant::now().duration_since(write_start)),
        })
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::error::Error;

    #[test]
    fn converts_worked_example() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("m.mtx");
        let output = dir.path().join("m.adj");
        fs::write(
            &input,
            "%%MatrixMarket matrix coordinate real general\n\
             4 4 5\n1 2 1.0\n1 3 1.0\n3 4 1.0\n2 1 1.0\n3 2 1.0\n",
        )
        .unwrap();

        let summary = convert(&input, &output).unwrap();
        assert_eq!((summary.nvertices, summary.nedges), (4, 5));
        assert_eq!(summary.max_degree, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "AdjacencyGraph\n4\n5\n0\n2\n3\n5\n1\n2\n0\n3\n1\n"
        );
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wide.mtx");
        let output = dir.path().join("wide.adj");
        fs::write(
            &input,
            "%%MatrixMarket matrix coordinate pattern general\n2 3 1\n1 3\n",
        )
        .unwrap();

        let err = convert(&input, &output).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(matches!(err, Error::IndexOutOfRange { bound: 2, .. }));
        assert!(!output.exists());
    }

    #[test]
    fn empty_graph_has_no_degree_stats() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("e.mtx");
        let output = dir.path().join("e.adj");
        fs::write(&input, "%%MatrixMarket matrix coordinate pattern general\n0 0 0\n").unwrap();

        let summary = convert(&input, &output).unwrap();
        assert!(summary.degrees.is_none());
        assert_eq!(fs::read_to_string(&output).unwrap(), "AdjacencyGraph\n0\n0\n");
    }
}
