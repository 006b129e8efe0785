//! # Workspace Pattern for Pruned Vectors
//!
//! Pre-allocated buffers for the pruned recurrence to avoid repeated
//! allocations when many columns are evaluated back to back.
//!
//! ## Design Philosophy
//! Step `n` reads entry `k - 1` of the vector produced by step `n - 1` while
//! writing entry `k`, so the update cannot happen in place. The workspace owns
//! two same-shape vectors plus a parity flag and hands out one shared (read)
//! and one exclusive (write) slice per step. The borrow checker then
//! guarantees the two are never aliased.

use crate::model::logspace::LOGZERO;

/// Double-buffered pruned log-probability vectors.
#[derive(Debug, Clone)]
pub struct PrunedWorkspace {
    /// First slot
    probvec: Vec<f64>,

    /// Second slot. Holds the seed, so it is the read side of the first step.
    probvec_prev: Vec<f64>,

    /// Role flag: when set, `probvec_prev` is read and `probvec` is written
    use_prev: bool,

    /// Number of tracked states (K + 1)
    n_states: usize,
}

impl PrunedWorkspace {
    /// Create a workspace seeded for ceiling `k`
    pub fn new(k: usize) -> Self {
        let mut ws = Self::minimal();
        ws.reset(k);
        ws
    }

    /// Create an empty workspace; call [`reset`](Self::reset) before use
    pub fn minimal() -> Self {
        Self {
            probvec: Vec::new(),
            probvec_prev: Vec::new(),
            use_prev: true,
            n_states: 0,
        }
    }

    /// Resize for ceiling `k` and seed "zero events with certainty".
    ///
    /// Every entry other than index 0 is set to [`LOGZERO`] so nothing from a
    /// previous column survives.
    pub fn reset(&mut self, k: usize) {
        let n_states = k + 1;
        self.probvec.clear();
        self.probvec.resize(n_states, LOGZERO);
        self.probvec_prev.clear();
        self.probvec_prev.resize(n_states, LOGZERO);
        self.probvec_prev[0] = 0.0;
        self.use_prev = true;
        self.n_states = n_states;
    }

    /// Number of tracked states (K + 1)
    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Current parity of the role flag
    #[inline]
    pub fn use_prev(&self) -> bool {
        self.use_prev
    }

    /// The readable vector
    #[inline]
    pub fn current(&self) -> &[f64] {
        if self.use_prev {
            &self.probvec_prev
        } else {
            &self.probvec
        }
    }

    /// The readable vector, mutably. Only used to mark unreached states.
    #[inline]
    pub fn current_mut(&mut self) -> &mut [f64] {
        if self.use_prev {
            &mut self.probvec_prev
        } else {
            &mut self.probvec
        }
    }

    /// Split into (read, write) for one step
    #[inline]
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        if self.use_prev {
            (self.probvec_prev.as_slice(), self.probvec.as_mut_slice())
        } else {
            (self.probvec.as_slice(), self.probvec_prev.as_mut_slice())
        }
    }

    /// Swap read and write roles. Called exactly once per consumed base.
    #[inline]
    pub fn flip(&mut self) {
        self.use_prev = !self.use_prev;
    }

    /// Copy the readable vector out
    pub fn to_distribution(&self) -> Vec<f64> {
        self.current().to_vec()
    }
}

impl Default for PrunedWorkspace {
    fn default() -> Self {
        Self::minimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state() {
        let ws = PrunedWorkspace::new(3);
        assert_eq!(ws.n_states(), 4);
        assert!(ws.use_prev());
        assert_eq!(ws.current(), &[0.0, LOGZERO, LOGZERO, LOGZERO]);
    }

    #[test]
    fn test_split_roles_follow_flag() {
        let mut ws = PrunedWorkspace::new(1);
        {
            let (read, write) = ws.split();
            assert_eq!(read[0], 0.0);
            write[0] = -1.5;
            write[1] = -2.5;
        }
        ws.flip();
        assert!(!ws.use_prev());
        assert_eq!(ws.current(), &[-1.5, -2.5]);

        {
            let (read, write) = ws.split();
            assert_eq!(read, &[-1.5, -2.5]);
            // Other slot still holds the seed
            assert_eq!(write[0], 0.0);
        }
        ws.flip();
        assert_eq!(ws.current()[0], 0.0);
    }

    #[test]
    fn test_reset_discards_previous_column() {
        let mut ws = PrunedWorkspace::new(2);
        ws.current_mut()[1] = -0.1;
        ws.flip();
        ws.current_mut()[2] = -0.2;

        ws.reset(4);
        assert!(ws.use_prev());
        assert_eq!(ws.n_states(), 5);
        assert_eq!(ws.current(), &[0.0, LOGZERO, LOGZERO, LOGZERO, LOGZERO]);
        ws.flip();
        assert!(ws.current().iter().all(|&v| v == LOGZERO));
    }

    #[test]
    fn test_default_is_empty() {
        let ws = PrunedWorkspace::default();
        assert_eq!(ws.n_states(), 0);
        assert!(ws.current().is_empty());
    }
}
