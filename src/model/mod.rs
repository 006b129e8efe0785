//! # Model Module
//!
//! The pruned Poisson-binomial computation for one column of aligned bases.
//!
//! ## Core Algorithms
//! - `logspace`: `LOGZERO`, stable log-sum-exp, per-base log transform
//! - `recurrence`: one DP transition over a (read, write) vector pair
//! - `pruned`: phase state machine (Below / Boundary / Above) and entry point
//!
//! ## Why Prune at K
//! The caller only asks how surprising `K` observed variant bases are, i.e.
//! `P(X >= K)`. Tracking states `0..=K` with `K` as an absorbing ceiling gives
//! that tail exactly while keeping memory at `K + 1` entries and work at
//! `O(N * K)` instead of `O(N^2)`.

pub mod logspace;
pub mod pruned;
pub mod recurrence;

pub use logspace::{log_sum_exp, LogPair, LOGZERO};
pub use pruned::{pruned_prob_dist, ExecPolicy, Phase, PrunedCalculator};
pub use recurrence::PrunedUpdater;
