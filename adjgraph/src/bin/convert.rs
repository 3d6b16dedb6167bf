//! Converts a Matrix Market coordinate file into a plaintext
//! `AdjacencyGraph` file.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use serde_json::json;
use structopt::StructOpt;

/// Reads a sparse matrix in Matrix Market coordinate format and writes
/// its sparsity pattern as an adjacency graph.
///
/// Row `i` becomes vertex `i`, and each stored entry `(i, j)` an edge
/// from `i` to `j`. Symmetric storage is expanded and values are dropped.
#[derive(Debug, StructOpt)]
#[structopt(name = "convert", about = "Convert a Matrix Market file to an AdjacencyGraph.")]
struct Opt {
    /// Matrix Market coordinate input file.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Destination for the AdjacencyGraph text.
    #[structopt(parse(from_os_str))]
    output: PathBuf,
}

fn main() {
    let opt = Opt::from_args();

    let start = Instant::now();
    match adjgraph::convert(&opt.input, &opt.output) {
        Ok(summary) => println!(
            "{}",
            json!({
                "nvertices": summary.nvertices,
                "nedges": summary.nedges,
                "total_duration": format!("{:.0?}", Instant::now().duration_since(start)),
            })
        ),
        Err(e) => {
            eprintln!(
                "{}",
                json!({
                    "error": e.to_string(),
                    "malformed_input": e.is_malformed_input(),
                })
            );
            process::exit(1);
        }
    }
}
