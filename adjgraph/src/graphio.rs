//! Reading and writing graphs in the `AdjacencyGraph` text format.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::emit::{self, HEADER};
use crate::error::{Error, Result};
use crate::graph::{AdjacencyGraph, Vertex};
use crate::scanner::{self, Scanner, BUFSIZE};

/// Streams `graph` to `writer`, one token per line.
pub fn write<W: Write>(graph: &AdjacencyGraph, mut writer: W) -> io::Result<()> {
    for line in emit::lines(graph) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Writes `graph` to `path`.
///
/// Output goes to a uniquely named temporary file in the same directory,
/// which is persisted over `path` only once fully flushed and synced, so
/// `path` is never left holding a truncated graph. The temporary file is
/// removed on failure.
pub fn write_file(graph: &AdjacencyGraph, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;

    let mut writer = BufWriter::with_capacity(BUFSIZE, tmp.as_file_mut());
    let written = write(graph, &mut writer);
    drop(writer);
    written
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| Error::io(path, e.into()))?;
    Ok(())
}

/// Reads a graph previously written by [`write_file`].
pub fn read(path: &Path) -> Result<AdjacencyGraph> {
    let scanner = Scanner::new(path);
    scanner
        .try_fold(Parser::new(path), |mut parser, n, line| {
            parser.line(n, line)?;
            Ok(parser)
        })?
        .finish()
}

/// Like [`read`], over an already-open reader. `path` only labels errors.
pub fn parse<R: BufRead>(path: &Path, reader: R) -> Result<AdjacencyGraph> {
    scanner::fold_lines(path, reader, Parser::new(path), |mut parser, n, line| {
        parser.line(n, line)?;
        Ok(parser)
    })?
    .finish()
}

/// Validates the text line by line as it arrives.
struct Parser<'p> {
    path: &'p Path,
    nvertices: Option<usize>,
    nedges: Option<usize>,
    offsets: Vec<usize>,
    neighbors: Vec<Vertex>,
    nlines: usize,
}

impl<'p> Parser<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            nvertices: None,
            nedges: None,
            offsets: Vec::new(),
            neighbors: Vec::new(),
            nlines: 0,
        }
    }

    fn line(&mut self, n: usize, line: &[u8]) -> Result<()> {
        self.nlines = n;
        if n == 1 {
            if line != HEADER.as_bytes() {
                return Err(self.error(n, format!("expected {} header", HEADER)));
            }
            return Ok(());
        }

        let value: usize = scanner::parse_word(line)
            .ok_or_else(|| self.error(n, "expected a non-negative integer"))?;
        match (self.nvertices, self.nedges) {
            (None, _) => {
                if value >= (1 << 32) {
                    return Err(self.error(n, "2^32 or more vertices"));
                }
                self.nvertices = Some(value);
            }
            (Some(_), None) => self.nedges = Some(value),
            (Some(nvertices), Some(nedges)) => {
                if self.offsets.len() < nvertices {
                    let prev = self.offsets.last().copied().unwrap_or(0);
                    if self.offsets.is_empty() && value != 0 {
                        return Err(self.error(n, "first offset must be 0"));
                    }
                    if value < prev || value > nedges {
                        return Err(self.error(
                            n,
                            format!("offset {} outside [{}, {}]", value, prev, nedges),
                        ));
                    }
                    self.offsets.push(value);
                } else if self.neighbors.len() < nedges {
                    if value >= nvertices {
                        return Err(self.error(
                            n,
                            format!("edge {} outside [0, {})", value, nvertices),
                        ));
                    }
                    self.neighbors.push(value as Vertex);
                } else {
                    return Err(self.error(n, "trailing data"));
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<AdjacencyGraph> {
        let (nvertices, nedges) = match (self.nvertices, self.nedges) {
            (Some(nvertices), Some(nedges)) => (nvertices, nedges),
            _ => return Err(self.error(self.nlines, "truncated preamble")),
        };
        if self.offsets.len() != nvertices || self.neighbors.len() != nedges {
            let expected = 3 + nvertices + nedges;
            return Err(self.error(
                self.nlines,
                format!("expected {} lines, found {}", expected, self.nlines),
            ));
        }
        if nvertices == 0 && nedges > 0 {
            return Err(self.error(self.nlines, "edges without vertices"));
        }
        let mut offsets = self.offsets;
        offsets.push(nedges);
        Ok(AdjacencyGraph::new(offsets, self.neighbors))
    }

    fn error(&self, n: usize, msg: impl Into<String>) -> Error {
        Error::parse(self.path, n, msg)
    }
}
