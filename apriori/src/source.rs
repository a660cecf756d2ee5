//! Transaction sources.
//!
//! The text format carries one transaction per line: a leading count token
//! followed by whitespace-separated item identifiers, e.g. `3 1 2 5`.

use crate::config::MalformedLinePolicy;
use crate::error::{MiningError, Result};
use crate::storage::Item;
use ndarray::ArrayView2;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Yields transactions one at a time.
pub trait DataSource {
    /// Next transaction, or `None` once the source is exhausted.
    fn next_transaction(&mut self) -> Result<Option<Vec<Item>>>;
}

impl<S: DataSource + ?Sized> DataSource for &mut S {
    fn next_transaction(&mut self) -> Result<Option<Vec<Item>>> {
        (**self).next_transaction()
    }
}

impl DataSource for std::vec::IntoIter<Vec<Item>> {
    fn next_transaction(&mut self) -> Result<Option<Vec<Item>>> {
        Ok(self.next())
    }
}

/// Parses one line of the text format.
///
/// Returns `Ok(None)` for blank lines. `line_no` is 1-based and only used
/// for error reporting.
pub fn parse_transaction_line(line: &str, line_no: usize) -> Result<Option<Vec<Item>>> {
    let mut tokens = line.split_whitespace();
    let Some(count_token) = tokens.next() else {
        return Ok(None);
    };
    let declared: usize = count_token.parse().map_err(|_| {
        MiningError::parse(line_no, count_token, "is not a valid item count")
    })?;

    let items = tokens
        .map(|token| {
            token
                .parse::<Item>()
                .map_err(|_| MiningError::parse(line_no, token, "is not a valid item identifier"))
        })
        .collect::<Result<Vec<Item>>>()?;

    if declared != items.len() {
        debug!(
            line = line_no,
            declared,
            actual = items.len(),
            "item count token does not match the number of items"
        );
    }

    Ok(Some(items))
}

/// Reads transactions from a line-oriented text stream.
pub struct TextSource<R> {
    reader: R,
    policy: MalformedLinePolicy,
    line_no: usize,
    skipped: usize,
    buf: Vec<u8>,
}

impl TextSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| MiningError::io(format!("opening {}", path.display()), e))?;
        Ok(Self::new(BufReader::new(file), policy))
    }
}

impl<R: BufRead> TextSource<R> {
    pub fn new(reader: R, policy: MalformedLinePolicy) -> Self {
        Self {
            reader,
            policy,
            line_no: 0,
            skipped: 0,
            buf: Vec::new(),
        }
    }

    /// Number of malformed lines dropped under [`MalformedLinePolicy::Skip`].
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> DataSource for TextSource<R> {
    fn next_transaction(&mut self) -> Result<Option<Vec<Item>>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| MiningError::io(format!("reading line {}", self.line_no + 1), e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let parsed = match std::str::from_utf8(&self.buf) {
                Ok(line) => parse_transaction_line(line, self.line_no),
                Err(_) => Err(MiningError::parse(
                    self.line_no,
                    String::from_utf8_lossy(&self.buf).trim_end(),
                    "is not valid UTF-8",
                )),
            };

            match parsed {
                Ok(Some(items)) => return Ok(Some(items)),
                Ok(None) => continue,
                Err(err) => match self.policy {
                    MalformedLinePolicy::Abort => return Err(err),
                    MalformedLinePolicy::Skip => {
                        warn!(%err, "skipping malformed line");
                        self.skipped += 1;
                    }
                },
            }
        }
    }
}

/// Reads a dense one-hot matrix: rows are transactions, a non-zero entry in
/// column `j` means item `j` is present.
pub struct MatrixSource<'a> {
    matrix: ArrayView2<'a, i32>,
    row: usize,
}

impl<'a> MatrixSource<'a> {
    pub fn new(matrix: ArrayView2<'a, i32>) -> Self {
        Self { matrix, row: 0 }
    }
}

impl DataSource for MatrixSource<'_> {
    fn next_transaction(&mut self) -> Result<Option<Vec<Item>>> {
        if self.row >= self.matrix.nrows() {
            return Ok(None);
        }
        let row = self.matrix.row(self.row);
        self.row += 1;

        let mut items = Vec::new();
        for (item, &value) in row.iter().enumerate() {
            match value {
                0 => {}
                1 => items.push(item),
                other => {
                    return Err(MiningError::invalid_matrix(format!(
                        "row {} column {item} holds {other}, expected 0 or 1",
                        self.row - 1
                    )));
                }
            }
        }
        Ok(Some(items))
    }
}
