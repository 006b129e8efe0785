//! # Column Text Format
//!
//! Reading pileup columns and writing their pruned distributions.
//!
//! ## Input
//! One column per line: the observed variant count `K`, a tab, then the
//! per-base error probabilities separated by commas.
//!
//! ```text
//! # K   error probabilities
//! 1	0.001,0.0005,0.02
//! 0	0.01,0.01
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.
//!
//! ## Output
//! `index<TAB>N<TAB>K<TAB>d0,d1,...,dK` with natural-log values printed in
//! shortest round-trip form.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{PbTailError, Result};
use crate::model::pruned::check_probabilities;

/// One pileup column: observed count and per-base error probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Observed number of variant bases
    pub k: usize,

    /// Error probability of each base in the column
    pub error_probs: Vec<f64>,
}

impl Column {
    pub fn new(k: usize, error_probs: Vec<f64>) -> Self {
        Self { k, error_probs }
    }

    /// Number of bases (N)
    #[inline]
    pub fn n(&self) -> usize {
        self.error_probs.len()
    }
}

/// Parse a single non-comment line
pub fn parse_line(line: &str, line_no: usize) -> Result<Column> {
    let (k_field, probs_field) = line
        .split_once('\t')
        .ok_or_else(|| PbTailError::parse(line_no, "expected K<TAB>probabilities"))?;

    let k: usize = k_field
        .trim()
        .parse()
        .map_err(|e| PbTailError::parse(line_no, format!("invalid K '{}': {}", k_field.trim(), e)))?;

    let error_probs = probs_field
        .trim()
        .split(',')
        .map(|field| {
            field.trim().parse::<f64>().map_err(|e| {
                PbTailError::parse(line_no, format!("invalid probability '{}': {}", field.trim(), e))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if k > error_probs.len() {
        return Err(PbTailError::parse(
            line_no,
            format!("K ({}) exceeds the number of bases ({})", k, error_probs.len()),
        ));
    }
    check_probabilities(&error_probs).map_err(|e| PbTailError::parse(line_no, e.to_string()))?;

    Ok(Column::new(k, error_probs))
}

/// Streaming reader over the column text format
pub struct ColumnReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl ColumnReader<BufReader<File>> {
    /// Open a column file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ColumnReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Read every remaining column
    pub fn read_all(self) -> Result<Vec<Column>> {
        self.collect()
    }

    /// Read up to `max_columns` columns, `None` once the input is exhausted
    pub fn next_chunk(&mut self, max_columns: usize) -> Result<Option<Vec<Column>>> {
        let chunk = self
            .by_ref()
            .take(max_columns.max(1))
            .collect::<Result<Vec<Column>>>()?;
        Ok(if chunk.is_empty() { None } else { Some(chunk) })
    }
}

impl<R: BufRead> Iterator for ColumnReader<R> {
    type Item = Result<Column>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.line_no += 1;
                    return Some(Err(PbTailError::parse(self.line_no, e.to_string())));
                }
            }
            self.line_no += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(parse_line(line, self.line_no));
        }
    }
}

/// Writes one result line per column
pub struct DistributionWriter<W: Write> {
    writer: W,
}

impl<W: Write> DistributionWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, index: usize, column: &Column, distribution: &[f64]) -> Result<()> {
        write!(self.writer, "{}\t{}\t{}\t", index, column.n(), column.k)?;
        for (i, value) in distribution.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            write!(self.writer, "{}", value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
