//! # Configuration Logic
//!
//! ## Role
//! CLI argument parsing and validation.
//!
//! ## Validation
//! - Input file must exist unless reading stdin (`-`)
//! - `--chunk` and `--chunk-columns` must be positive
//!
//! ## Example CLI
//! ```bash
//! pbtail --input columns.tsv --out dists.tsv --nthreads 8
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{PbTailError, Result};
use crate::model::pruned::ExecPolicy;
use crate::utils::threading::resolve_threads;

/// Pruned Poisson-binomial distributions for pileup columns
#[derive(Parser, Debug, Clone)]
#[command(name = "pbtail", version, about)]
pub struct Config {
    /// Column file (K<TAB>p0,p1,...), or `-` for stdin
    #[arg(long, short = 'i', default_value = "-")]
    pub input: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Number of worker threads (default: all cores)
    #[arg(long)]
    pub nthreads: Option<usize>,

    /// Split a single step across threads once K + 1 reaches this size
    #[arg(long, default_value_t = 1 << 15)]
    pub min_parallel_states: usize,

    /// Vector entries per task when a step is split
    #[arg(long, default_value_t = 4096)]
    pub chunk: usize,

    /// Columns read and evaluated together before their results are written
    #[arg(long, default_value_t = 4096)]
    pub chunk_columns: usize,

    /// Print span timings to stderr
    #[arg(long)]
    pub profile: bool,
}

impl Config {
    /// Parse command line arguments and validate them
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk == 0 {
            return Err(PbTailError::config("--chunk must be positive"));
        }
        if self.chunk_columns == 0 {
            return Err(PbTailError::config("--chunk-columns must be positive"));
        }
        if !self.reads_stdin() && !self.input.exists() {
            return Err(PbTailError::config(format!(
                "input file not found: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// True when columns come from stdin
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new("-")
    }

    pub fn nthreads(&self) -> usize {
        resolve_threads(self.nthreads)
    }

    pub fn exec_policy(&self) -> ExecPolicy {
        ExecPolicy {
            min_parallel_states: self.min_parallel_states,
            chunk: self.chunk,
        }
    }
}
