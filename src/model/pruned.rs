//! # Pruned Distribution Orchestrator
//!
//! Drives the recurrence over a column of per-base error probabilities and
//! returns the `K + 1` pruned log-probabilities.
//!
//! ## Phases
//! Step `n` (1-based) consumes base `n - 1`.
//!
//! | Phase      | Steps          | Extra work                                         |
//! |------------|----------------|----------------------------------------------------|
//! | `Below`    | `1 <= n < K`   | mark the unreached state `n` as `LOGZERO` first    |
//! | `Boundary` | `n == K`       | `out[K] = in[K-1] + ln(p)`, the single all-events path |
//! | `Above`    | `K < n <= N`   | none                                               |
//! | `Done`     |                | copy the readable vector out                       |
//!
//! `K == 0` goes straight to `Done`: the only tracked state is the ceiling
//! `P(X >= 0) = 1`.
//!
//! ## Output
//! `distribution[k] = ln P(X = k)` for `k < K` and `distribution[K] = ln P(X >= K)`,
//! where `X` counts qualifying bases among the `N` consumed.

use crate::error::{PbTailError, Result};
use crate::model::logspace::{LogPair, LOGZERO};
use crate::model::recurrence::PrunedUpdater;
use crate::utils::workspace::PrunedWorkspace;

/// Phase of the orchestrator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Below,
    Boundary,
    Above,
    Done,
}

impl Phase {
    /// Entry phase for ceiling `k`
    pub fn initial(k: usize) -> Self {
        match k {
            0 => Phase::Done,
            1 => Phase::Boundary,
            _ => Phase::Below,
        }
    }

    /// Phase that follows a completed step `step`
    pub fn after(self, step: usize, n: usize, k: usize) -> Self {
        match self {
            Phase::Below if step + 1 == k => Phase::Boundary,
            Phase::Below => Phase::Below,
            Phase::Boundary | Phase::Above if step >= n => Phase::Done,
            Phase::Boundary | Phase::Above => Phase::Above,
            Phase::Done => Phase::Done,
        }
    }
}

/// How a single step is executed. All settings give identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecPolicy {
    /// Split the interior across rayon workers once `K + 1` reaches this size
    pub min_parallel_states: usize,

    /// Entries per rayon task when splitting
    pub chunk: usize,
}

impl ExecPolicy {
    /// Never split a step across threads
    pub fn sequential() -> Self {
        Self {
            min_parallel_states: usize::MAX,
            chunk: 4096,
        }
    }
}

impl Default for ExecPolicy {
    fn default() -> Self {
        Self {
            min_parallel_states: 1 << 15,
            chunk: 4096,
        }
    }
}

/// Check the kernel entry-point preconditions.
///
/// Requires `n >= 1`, `k <= n`, at least `n + 2` probabilities (two lookahead
/// slots past the consumed bases) and every one of those in `[0, 1]`.
pub fn validate(err_probs: &[f64], n: usize, k: usize) -> Result<()> {
    if n == 0 {
        return Err(PbTailError::invalid_argument("N must be at least 1"));
    }
    if k > n {
        return Err(PbTailError::invalid_argument(format!(
            "K ({}) exceeds N ({})",
            k, n
        )));
    }
    if err_probs.len() < n + 2 {
        return Err(PbTailError::invalid_argument(format!(
            "error probability array has {} entries, need at least N + 2 = {}",
            err_probs.len(),
            n + 2
        )));
    }
    check_probabilities(&err_probs[..n + 2])
}

/// Reject NaN and values outside `[0, 1]`
pub fn check_probabilities(probs: &[f64]) -> Result<()> {
    match probs.iter().position(|p| !(0.0..=1.0).contains(p)) {
        Some(i) => Err(PbTailError::invalid_argument(format!(
            "error probability at index {} is {}, expected a value in [0, 1]",
            i, probs[i]
        ))),
        None => Ok(()),
    }
}

/// Pruned distribution for `n` bases and ceiling `k`.
///
/// `err_probs` must hold at least `n + 2` probabilities; only the first `n`
/// contribute. Fails fast on precondition violations instead of reading out
/// of bounds.
pub fn pruned_prob_dist(err_probs: &[f64], n: usize, k: usize) -> Result<Vec<f64>> {
    validate(err_probs, n, k)?;
    let mut ws = PrunedWorkspace::new(k);
    Ok(PrunedCalculator::default().run(&err_probs[..n], k, &mut ws))
}

/// Runs the phase state machine over a workspace
#[derive(Debug, Clone, Copy, Default)]
pub struct PrunedCalculator {
    policy: ExecPolicy,
}

impl PrunedCalculator {
    pub fn new(policy: ExecPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ExecPolicy {
        self.policy
    }

    /// Distribution over exactly the bases in `probs`.
    ///
    /// Same preconditions as [`pruned_prob_dist`] (`N >= 1`, `K <= N`,
    /// probabilities in `[0, 1]`) without the two trailing lookahead slots.
    pub fn column(&self, probs: &[f64], k: usize, ws: &mut PrunedWorkspace) -> Result<Vec<f64>> {
        if probs.is_empty() {
            return Err(PbTailError::invalid_argument("N must be at least 1"));
        }
        if k > probs.len() {
            return Err(PbTailError::invalid_argument(format!(
                "K ({}) exceeds the number of bases ({})",
                k,
                probs.len()
            )));
        }
        check_probabilities(probs)?;
        Ok(self.run(probs, k, ws))
    }

    /// Core loop. Caller guarantees `k <= bases.len()` and probabilities in
    /// `[0, 1]`; every base in `bases` is consumed.
    pub(crate) fn run(&self, bases: &[f64], k: usize, ws: &mut PrunedWorkspace) -> Vec<f64> {
        let n = bases.len();
        debug_assert!(k <= n, "K ({}) exceeds the number of bases ({})", k, n);
        ws.reset(k);

        let mut phase = Phase::initial(k);
        let mut step = 1;
        tracing::trace!(n, k, ?phase, "pruned column start");

        loop {
            match phase {
                Phase::Done => break,
                Phase::Below => {
                    ws.current_mut()[step] = LOGZERO;
                    self.apply(LogPair::from_prob(bases[step - 1]), ws);
                }
                Phase::Boundary => {
                    let pair = LogPair::from_prob(bases[step - 1]);
                    self.apply(pair, ws);
                    // Only path to the ceiling at this step: every base so far qualified
                    let (read, write) = ws.split();
                    write[k] = read[k - 1] + pair.log_p;
                }
                Phase::Above => self.apply(LogPair::from_prob(bases[step - 1]), ws),
            }
            ws.flip();

            let next = phase.after(step, n, k);
            if next != phase {
                tracing::trace!(step, from = ?phase, to = ?next, "phase transition");
            }
            phase = next;
            step += 1;
        }

        ws.to_distribution()
    }

    #[inline]
    fn apply(&self, pair: LogPair, ws: &mut PrunedWorkspace) {
        let parallel = ws.n_states() >= self.policy.min_parallel_states;
        let (read, write) = ws.split();
        if parallel {
            PrunedUpdater::step_parallel(pair, read, write, self.policy.chunk);
        } else {
            PrunedUpdater::step(pair, read, write);
        }
    }
}
