//! # pbtail Library
//!
//! Pruned Poisson-binomial distributions for variant significance testing.
//!
//! Given one pileup column of `N` bases, each with its own error probability,
//! and the observed number `K` of variant bases, computes in log space
//! `ln P(X = k)` for `k < K` and `ln P(X >= K)`, where `X` is the number of
//! bases showing the variant purely by error.
//!
//! ## Modules
//! - `config`: CLI argument parsing and validation
//! - `error`: Error types and result aliases
//! - `io`: Column text format reading/writing
//! - `model`: Log-space primitives, recurrence step, phase orchestrator
//! - `pipelines`: Parallel evaluation of many columns
//! - `utils`: Workspace buffers and threading
//!
//! ## Example
//! ```
//! let dist = pbtail::pruned_prob_dist(&[0.2, 0.3, 0.4], 1, 1).unwrap();
//! assert!((dist[0] - 0.8f64.ln()).abs() < 1e-12);
//! assert!((dist[1] - 0.2f64.ln()).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipelines;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PbTailError, Result};
pub use io::columns::{Column, ColumnReader, DistributionWriter};
pub use model::logspace::{log_sum_exp, LogPair, LOGZERO};
pub use model::pruned::{pruned_prob_dist, ExecPolicy, Phase, PrunedCalculator};
pub use pipelines::BatchPipeline;
pub use utils::workspace::PrunedWorkspace;
