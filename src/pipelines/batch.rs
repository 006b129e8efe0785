//! # Batch Pipeline
//!
//! ## Role
//! Evaluate the pruned distribution for many independent pileup columns.
//!
//! ## Algorithm Overview
//! 1. **Distribute:** columns are spread over the rayon pool
//! 2. **Per worker:** one [`PrunedWorkspace`] is created lazily and reused for
//!    every column that worker handles
//! 3. **Collect:** results come back in input order; the first failing column
//!    aborts the batch
//!
//! [`BatchPipeline::run_stream`] repeats this per chunk of a column reader so
//! only one chunk of columns and distributions is held in memory.

use std::io::{BufRead, Write};

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::instrument;

use crate::error::Result;
use crate::io::columns::{Column, ColumnReader, DistributionWriter};
use crate::model::pruned::{ExecPolicy, PrunedCalculator};
use crate::utils::workspace::PrunedWorkspace;

/// Parallel evaluator over a slice of columns
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchPipeline {
    calculator: PrunedCalculator,
}

impl BatchPipeline {
    pub fn new(policy: ExecPolicy) -> Self {
        Self {
            calculator: PrunedCalculator::new(policy),
        }
    }

    /// Distributions for every column, in input order
    #[instrument(skip_all, fields(n_columns = columns.len()))]
    pub fn run(&self, columns: &[Column]) -> Result<Vec<Vec<f64>>> {
        let n_bases: usize = columns.iter().map(Column::n).sum();
        let max_k = columns.iter().map(|c| c.k).max().unwrap_or(0);
        tracing::debug!(n_bases, max_k, "evaluating columns");

        let calculator = self.calculator;
        columns
            .par_iter()
            .map_init(PrunedWorkspace::default, |ws, column| {
                calculator.column(&column.error_probs, column.k, ws)
            })
            .collect()
    }

    /// Read, evaluate and write `chunk_columns` columns at a time.
    ///
    /// Each chunk is evaluated inside `pool`; reading and writing stay on the
    /// calling thread. Output indices run over the whole stream. Returns the
    /// number of columns written; a failing column stops the stream after the
    /// chunks before it have been written.
    #[instrument(skip_all, fields(chunk_columns = chunk_columns))]
    pub fn run_stream<R: BufRead, W: Write>(
        &self,
        pool: &ThreadPool,
        reader: &mut ColumnReader<R>,
        writer: &mut DistributionWriter<W>,
        chunk_columns: usize,
    ) -> Result<usize> {
        let mut n_written = 0;
        let mut chunk_count = 0;

        while let Some(columns) = reader.next_chunk(chunk_columns)? {
            chunk_count += 1;
            let dists = pool.install(|| self.run(&columns))?;
            for (column, dist) in columns.iter().zip(&dists) {
                writer.write(n_written, column, dist)?;
                n_written += 1;
            }
            tracing::debug!(chunk_count, n_written, "chunk written");
        }

        Ok(n_written)
    }

    /// Sequential variant sharing a single workspace
    pub fn run_sequential(&self, columns: &[Column]) -> Result<Vec<Vec<f64>>> {
        let mut ws = PrunedWorkspace::default();
        columns
            .iter()
            .map(|column| self.calculator.column(&column.error_probs, column.k, &mut ws))
            .collect()
    }
}
