//! Errors surfaced while converting a coordinate matrix.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which coordinate of an edge an out-of-range index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// An edge endpoint outside `[0, bound)`. `index` is zero-based,
    /// so a one-based index of 0 in the source shows up as -1.
    #[error("edge {edge}: {axis} index {index} out of range [0, {bound})")]
    IndexOutOfRange {
        edge: usize,
        axis: Axis,
        index: i64,
        bound: usize,
    },

    #[error("row indices ({rows}) and column indices ({cols}) differ in length")]
    LengthMismatch { rows: usize, cols: usize },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {msg}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    #[error("{}: unsupported matrix market variant: {what}", path.display())]
    Unsupported { path: PathBuf, what: String },
}

impl Error {
    /// True for errors in the coordinate data itself, as opposed to
    /// failures reading or writing files.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. } | Error::LengthMismatch { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            msg: msg.into(),
        }
    }
}
