//! # `adjgraph` - sparse matrix to adjacency graph conversion
//!
//! Reads a Matrix Market coordinate file, compresses its sparsity pattern
//! into a CSR-style adjacency list and writes it out in the plaintext
//! `AdjacencyGraph` format, one integer per line.

use std::collections::HashMap;

use ordered_float::NotNan;

pub mod compress;
pub mod convert;
pub mod coo;
pub mod emit;
pub mod error;
pub mod graph;
pub mod graphio;
pub mod mtx;
mod scanner;

pub use compress::compress;
pub use convert::convert;
pub use coo::CoordinateMatrix;
pub use error::{Error, Result};
pub use graph::{AdjacencyGraph, Vertex};
pub use scanner::Scanner;

const NSTAT_PERCENTILES: usize = 11;
const STAT_PERCENTILES: [f64; NSTAT_PERCENTILES] = [
    0.0, 0.001, 0.01, 0.05, 0.10, 0.50, 0.90, 0.95, 0.99, 0.999, 1.0,
];

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    mean: f64,
    percentiles: [f64; NSTAT_PERCENTILES],
}

impl SummaryStats {
    /// Summarizes the non-NaN values of `it`, or `None` if there are none.
    pub fn from(it: impl Iterator<Item = f64>) -> Option<Self> {
        let mut v: Vec<NotNan<f64>> = it.filter_map(|f| NotNan::new(f).ok()).collect();
        if v.is_empty() {
            return None;
        }
        v.sort_unstable();
        let mut stats = SummaryStats {
            mean: v.iter().map(|f| f.into_inner()).sum::<f64>() / v.len() as f64,
            percentiles: Default::default(),
        };
        STAT_PERCENTILES
            .iter()
            .copied()
            .map(|f| v[((v.len() - 1) as f64 * f) as usize].into_inner())
            .zip(stats.percentiles.iter_mut())
            .for_each(|(val, p)| *p = val);
        Some(stats)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        let mut map: HashMap<_, _> = STAT_PERCENTILES
            .iter()
            .map(|f| format!("p{:.3}", f))
            .zip(self.percentiles.iter().copied())
            .collect();
        map.insert("mean".to_string(), self.mean);
        map
    }
}
