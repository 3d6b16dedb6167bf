//! This module helps us efficiently read text files line by line
//! as whitespace-separated words, without decoding whole lines as utf8.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bstr::ByteSlice;

use crate::error::{Error, Result};

pub(crate) const BUFSIZE: usize = 64 * 1024;

/// A `Scanner` provides line-level access to an underlying file of
/// whitespace-delimited words.
pub struct Scanner {
    path: PathBuf,
}

impl Scanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Fold over the lines of the file, stopping at the first error.
    ///
    /// `fold` receives the 1-based line number and the raw line, with any
    /// trailing `\r` removed.
    pub fn try_fold<U, Fold>(&self, init: U, fold: Fold) -> Result<U>
    where
        Fold: FnMut(U, usize, &[u8]) -> Result<U>,
    {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        fold_lines(&self.path, BufReader::with_capacity(BUFSIZE, file), init, fold)
    }
}

/// Same as [`Scanner::try_fold`] over an arbitrary reader; `path` only
/// labels errors.
pub(crate) fn fold_lines<R, U, Fold>(path: &Path, reader: R, init: U, mut fold: Fold) -> Result<U>
where
    R: BufRead,
    Fold: FnMut(U, usize, &[u8]) -> Result<U>,
{
    let mut acc = init;
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        acc = fold(acc, i + 1, line)?;
    }
    Ok(acc)
}

/// Parses a word as a base-10 integer.
pub(crate) fn parse_word<T: std::str::FromStr>(word: &[u8]) -> Option<T> {
    word.to_str().ok()?.parse().ok()
}

/// Iterates over the whitespace-separated words of a line.
pub(crate) fn words<'a>(line: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    line.fields()
}
