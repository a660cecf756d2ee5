//! Result sinks.
//!
//! The text format writes one itemset per line as `[i1 i2 ... ik] support`.

use crate::error::{MiningError, Result};
use crate::storage::{FrequentItemsets, Item};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Consumes frequent itemsets with their supports.
pub trait ResultSink {
    fn write_itemset(&mut self, itemset: &[Item], support: usize) -> Result<()>;

    /// Called once after the last itemset.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ResultSink for Vec<(Vec<Item>, usize)> {
    fn write_itemset(&mut self, itemset: &[Item], support: usize) -> Result<()> {
        self.push((itemset.to_vec(), support));
        Ok(())
    }
}

/// Formats an itemset line without the trailing newline.
pub fn format_itemset(itemset: &[Item], support: usize) -> String {
    let mut line = String::with_capacity(itemset.len() * 4 + 8);
    line.push('[');
    for (idx, item) in itemset.iter().enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{item}");
    }
    let _ = write!(line, "] {support}");
    line
}

/// Writes itemsets in the text format.
pub struct TextSink<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl TextSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| MiningError::io(format!("creating {}", path.display()), e))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| MiningError::io("flushing results", e.into_error()))
    }
}

impl<W: Write> ResultSink for TextSink<W> {
    fn write_itemset(&mut self, itemset: &[Item], support: usize) -> Result<()> {
        writeln!(self.writer, "{}", format_itemset(itemset, support))
            .map_err(|e| MiningError::io("writing results", e))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| MiningError::io("flushing results", e))
    }
}

/// Hands every itemset to `sink`, level by level, then finishes it.
pub fn write_results<S: ResultSink + ?Sized>(
    itemsets: &FrequentItemsets,
    sink: &mut S,
) -> Result<()> {
    for (itemset, support) in itemsets.iter() {
        sink.write_itemset(itemset, support)?;
    }
    sink.finish()
}
