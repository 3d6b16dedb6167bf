//! Reader for sparse matrices in Matrix Market coordinate format, i.e.,
//!
//! ```text
//! %%MatrixMarket matrix coordinate <field> <symmetry>
//! % comments
//! <rows> <cols> <entries>
//! <i> <j> [values...]
//! ```
//!
//! where `i` and `j` are 1-based. Only the sparsity pattern is kept;
//! values are checked for count and then dropped.

use std::io::BufRead;
use std::path::Path;

use bstr::ByteSlice;

use crate::coo::CoordinateMatrix;
use crate::error::{Axis, Error, Result};
use crate::graph::Vertex;
use crate::scanner::{self, Scanner};

const BANNER: &[u8] = b"%%MatrixMarket";

/// Upper bound on entries reserved up front from an untrusted size line.
const MAX_RESERVE: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Complex,
    Pattern,
}

impl Field {
    /// Number of value words following the indices of each entry.
    fn nvalues(self) -> usize {
        match self {
            Field::Real | Field::Integer => 1,
            Field::Complex => 2,
            Field::Pattern => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

impl Symmetry {
    /// Whether only one triangle is stored and the other must be mirrored.
    fn is_mirrored(self) -> bool {
        self != Symmetry::General
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    field: Field,
    symmetry: Symmetry,
}

/// Reads the coordinate matrix stored at `path`.
///
/// Symmetric storage is expanded: the stored entries come first in file
/// order, followed by the mirror image of every off-diagonal entry, also
/// in file order. The vertex count is the number of rows.
pub fn read(path: &Path) -> Result<CoordinateMatrix> {
    let scanner = Scanner::new(path);
    scanner
        .try_fold(Body::new(path), |mut body, n, line| {
            body.line(n, line)?;
            Ok(body)
        })?
        .finish()
}

/// Like [`read`], over an already-open reader. `path` only labels errors.
pub fn parse<R: BufRead>(path: &Path, reader: R) -> Result<CoordinateMatrix> {
    scanner::fold_lines(path, reader, Body::new(path), |mut body, n, line| {
        body.line(n, line)?;
        Ok(body)
    })?
    .finish()
}

fn parse_header(path: &Path, n: usize, line: &[u8]) -> Result<Header> {
    let mut words = scanner::words(line);
    let bad = |msg: &str| Error::parse(path, n, msg);
    let unsupported = |what: &[u8]| Error::Unsupported {
        path: path.to_owned(),
        what: String::from_utf8_lossy(what).into_owned(),
    };

    match words.next() {
        Some(w) if w == BANNER => {}
        _ => return Err(bad("missing %%MatrixMarket banner")),
    }
    let object = words.next().ok_or_else(|| bad("missing object"))?;
    if !object.eq_ignore_ascii_case(b"matrix") {
        return Err(unsupported(object));
    }
    let format = words.next().ok_or_else(|| bad("missing format"))?;
    if !format.eq_ignore_ascii_case(b"coordinate") {
        return Err(unsupported(format));
    }

    let field = words.next().ok_or_else(|| bad("missing field"))?;
    let field = match field.to_ascii_lowercase().as_slice() {
        b"real" | b"double" => Field::Real,
        b"integer" => Field::Integer,
        b"complex" => Field::Complex,
        b"pattern" => Field::Pattern,
        _ => return Err(unsupported(field)),
    };

    let symmetry = words.next().ok_or_else(|| bad("missing symmetry"))?;
    let symmetry = match symmetry.to_ascii_lowercase().as_slice() {
        b"general" => Symmetry::General,
        b"symmetric" => Symmetry::Symmetric,
        b"skew-symmetric" => Symmetry::SkewSymmetric,
        b"hermitian" => Symmetry::Hermitian,
        _ => return Err(unsupported(symmetry)),
    };

    Ok(Header { field, symmetry })
}

#[derive(Clone, Copy)]
struct Size {
    nrows: usize,
    ncols: usize,
    nentries: usize,
}

/// Incremental parse state, fed one line at a time.
struct Body<'p> {
    path: &'p Path,
    header: Option<Header>,
    size: Option<Size>,
    rows: Vec<Vertex>,
    cols: Vec<Vertex>,
    last_line: usize,
}

impl<'p> Body<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            header: None,
            size: None,
            rows: Vec::new(),
            cols: Vec::new(),
            last_line: 0,
        }
    }

    fn line(&mut self, n: usize, line: &[u8]) -> Result<()> {
        self.last_line = n;
        let header = match self.header {
            None => {
                self.header = Some(parse_header(self.path, n, line)?);
                return Ok(());
            }
            Some(header) => header,
        };

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed[0] == b'%' {
            return Ok(());
        }

        let size = match self.size {
            None => {
                let size = self.parse_size(n, line)?;
                let reserve = size.nentries.min(MAX_RESERVE);
                self.rows.reserve(reserve);
                self.cols.reserve(reserve);
                self.size = Some(size);
                return Ok(());
            }
            Some(size) => size,
        };

        if self.rows.len() == size.nentries {
            return Err(Error::parse(
                self.path,
                n,
                format!("more than the {} declared entries", size.nentries),
            ));
        }
        let (i, j) = self.parse_entry(n, line, header.field, size)?;
        self.rows.push(i);
        self.cols.push(j);
        Ok(())
    }

    fn parse_size(&self, n: usize, line: &[u8]) -> Result<Size> {
        let dims: Vec<usize> = scanner::words(line)
            .map(scanner::parse_word::<usize>)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::parse(self.path, n, "size line must be integers"))?;
        if dims.len() != 3 {
            return Err(Error::parse(
                self.path,
                n,
                "size line must be <rows> <cols> <entries>",
            ));
        }
        let max_dim = 1usize << 32;
        if dims[0] >= max_dim || dims[1] >= max_dim {
            return Err(Error::Unsupported {
                path: self.path.to_owned(),
                what: format!("{}x{} needs 2^32 or more vertices", dims[0], dims[1]),
            });
        }
        Ok(Size {
            nrows: dims[0],
            ncols: dims[1],
            nentries: dims[2],
        })
    }

    fn parse_entry(
        &self,
        n: usize,
        line: &[u8],
        field: Field,
        size: Size,
    ) -> Result<(Vertex, Vertex)> {
        let mut words = scanner::words(line);
        let mut index = |axis: Axis, bound: usize| -> Result<Vertex> {
            let word = words
                .next()
                .ok_or_else(|| Error::parse(self.path, n, format!("missing {} index", axis)))?;
            let one_based: i64 = scanner::parse_word(word).ok_or_else(|| {
                Error::parse(self.path, n, format!("bad {} index {:?}", axis, word.to_str_lossy()))
            })?;
            let zero_based = one_based - 1;
            if zero_based < 0 || zero_based as u64 >= bound as u64 {
                return Err(Error::IndexOutOfRange {
                    edge: self.rows.len(),
                    axis,
                    index: zero_based,
                    bound,
                });
            }
            Ok(zero_based as Vertex)
        };
        let i = index(Axis::Row, size.nrows)?;
        let j = index(Axis::Col, size.ncols)?;

        let nvalues = words.count();
        if nvalues != field.nvalues() {
            return Err(Error::parse(
                self.path,
                n,
                format!("expected {} values, found {}", field.nvalues(), nvalues),
            ));
        }
        Ok((i, j))
    }

    fn finish(self) -> Result<CoordinateMatrix> {
        let Body {
            path,
            header,
            size,
            mut rows,
            mut cols,
            last_line,
        } = self;
        let header = header.ok_or_else(|| Error::parse(path, 1, "empty file"))?;
        let size = size.ok_or_else(|| Error::parse(path, last_line, "missing size line"))?;
        if rows.len() != size.nentries {
            return Err(Error::parse(
                path,
                last_line,
                format!("expected {} entries, found {}", size.nentries, rows.len()),
            ));
        }

        if header.symmetry.is_mirrored() {
            let stored = rows.len();
            for e in 0..stored {
                let (i, j) = (rows[e], cols[e]);
                if i != j {
                    rows.push(j);
                    cols.push(i);
                }
            }
        }

        CoordinateMatrix::new(size.nrows, rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn parse_str(text: &str) -> Result<CoordinateMatrix> {
        parse(Path::new("test.mtx"), Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn general_real() {
        let coo = parse_str(
            "%%MatrixMarket matrix coordinate real general\n\
             % a comment\n\
             %\n\
             4 4 5\n\
             1 2 0.5\n\
             1 3 1e3\n\
             3 4 -2\n\
             2 1 7\n\
             3 2 0\n",
        )
        .unwrap();
        assert_eq!(coo.nvertices(), 4);
        assert_eq!(coo.rows(), &[0, 0, 2, 1, 2]);
        assert_eq!(coo.cols(), &[1, 2, 3, 0, 1]);
    }

    #[test]
    fn symmetric_pattern_is_mirrored_after_stored_entries() {
        let coo = parse_str(
            "%%MatrixMarket matrix coordinate pattern symmetric\n\
             3 3 3\n\
             2 1\n\
             3 3\n\
             3 1\n",
        )
        .unwrap();
        assert_eq!(coo.nedges(), 5);
        assert_eq!(coo.rows(), &[1, 2, 2, 0, 0]);
        assert_eq!(coo.cols(), &[0, 2, 0, 1, 2]);
    }

    #[test]
    fn header_is_case_insensitive_and_tolerates_crlf() {
        let coo = parse_str(
            "%%MatrixMarket MATRIX Coordinate Integer Skew-Symmetric\r\n\
             2 2 1\r\n\
             \r\n\
             2 1 4\r\n",
        )
        .unwrap();
        assert_eq!(coo.pairs().collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn complex_values_take_two_words() {
        let coo = parse_str(
            "%%MatrixMarket matrix coordinate complex hermitian\n\
             2 2 2\n\
             1 1 1.0 0.0\n\
             2 1 0.5 -0.5\n",
        )
        .unwrap();
        assert_eq!(coo.pairs().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (0, 1)]);

        let err = parse_str(
            "%%MatrixMarket matrix coordinate complex general\n\
             2 2 1\n\
             1 1 1.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn non_square_keeps_row_count() {
        let coo = parse_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             2 5 1\n\
             1 5\n",
        )
        .unwrap();
        assert_eq!(coo.nvertices(), 2);
        assert_eq!(coo.cols(), &[4]);
    }

    #[test]
    fn zero_index_is_malformed() {
        let err = parse_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             3 3 2\n\
             1 2\n\
             0 1\n",
        )
        .unwrap_err();
        assert!(err.is_malformed_input());
        match err {
            Error::IndexOutOfRange {
                edge, axis, index, ..
            } => assert_eq!((edge, axis, index), (1, Axis::Row, -1)),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn index_past_dimension_is_malformed() {
        let err = parse_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             3 3 1\n\
             1 4\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                axis: Axis::Col,
                index: 3,
                bound: 3,
                ..
            }
        ));
    }

    #[test]
    fn entry_count_must_match() {
        let short = parse_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             3 3 2\n\
             1 2\n",
        )
        .unwrap_err();
        assert!(matches!(short, Error::Parse { line: 3, .. }));

        let long = parse_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             3 3 1\n\
             1 2\n\
             2 2\n",
        )
        .unwrap_err();
        assert!(matches!(long, Error::Parse { line: 4, .. }));
    }

    #[test]
    fn rejects_bad_headers() {
        let err = parse_str("3 3 1\n1 1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = parse_str("").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        let err = parse_str("%%MatrixMarket matrix array real general\n2 2\n1\n2\n3\n4\n")
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));

        let err = parse_str("%%MatrixMarket matrix coordinate quaternion general\n")
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));

        let err = parse_str("%%MatrixMarket matrix coordinate real\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_size_lines() {
        let err = parse_str("%%MatrixMarket matrix coordinate real general\n3 3\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_str("%%MatrixMarket matrix coordinate real general\n3 x 1\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_str("%%MatrixMarket matrix coordinate real general\n% only comments\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn vertex_count_must_fit_u32() {
        let coo = parse_str("%%MatrixMarket matrix coordinate pattern general\n4294967295 1 0\n")
            .unwrap();
        assert_eq!(coo.nvertices(), 4294967295);

        let err = parse_str("%%MatrixMarket matrix coordinate pattern general\n4294967296 1 0\n")
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));

        let err = parse_str("%%MatrixMarket matrix coordinate pattern general\n1 4294967296 0\n")
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn empty_matrix() {
        let coo = parse_str("%%MatrixMarket matrix coordinate pattern symmetric\n0 0 0\n")
            .unwrap();
        assert_eq!(coo.nvertices(), 0);
        assert_eq!(coo.nedges(), 0);
    }
}
