//! # Pruned Recurrence Step
//!
//! One transition of the pruned Poisson-binomial DP: consume a single base's
//! log-probability pair, read the frozen vector from the previous step and
//! fully overwrite the other vector.
//!
//! ```text
//! out[0] = in[0] + ln(1-p)
//! out[k] = LSE(in[k] + ln(1-p), in[k-1] + ln(p))     1 <= k < K
//! out[K] = LSE(in[K],           in[K-1] + ln(p))     ceiling absorbs
//! ```
//!
//! The ceiling entry carries no `ln(1-p)` term: once a column has reached
//! `K` qualifying bases it stays there, so `out[K]` accumulates `P(X >= K)`.
//!
//! Interior updates are independent given `in`, so they are computed four
//! lanes at a time with `wide::f64x4` and, for very wide vectors, split across
//! rayon workers over disjoint `k` ranges. Every path performs the same IEEE
//! operations per entry and produces bit-identical results.

use rayon::prelude::*;
use wide::f64x4;

use crate::model::logspace::{log_sum_exp, LogPair};

/// SIMD lane count for the interior update
pub const LANES: usize = 4;

/// Static update functions over (read, write) vector pairs
pub struct PrunedUpdater;

impl PrunedUpdater {
    /// General transition using the vectorized interior.
    ///
    /// `input` and `output` must both have length `K + 1`.
    #[inline]
    pub fn step(pair: LogPair, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), output.len());
        let k_max = output.len() - 1;
        if k_max == 0 {
            output[0] = input[0];
            return;
        }

        output[0] = input[0] + pair.log_1mp;
        Self::interior(pair, input, &mut output[1..k_max], 1);
        output[k_max] = Self::ceiling(pair, input, k_max);
    }

    /// Same transition with the interior split across rayon workers.
    ///
    /// `chunk` is the number of entries handed to each task.
    pub fn step_parallel(pair: LogPair, input: &[f64], output: &mut [f64], chunk: usize) {
        debug_assert_eq!(input.len(), output.len());
        let k_max = output.len() - 1;
        if k_max == 0 {
            output[0] = input[0];
            return;
        }

        let chunk = chunk.max(LANES);
        let (head, rest) = output.split_at_mut(1);
        let (interior, ceiling) = rest.split_at_mut(k_max - 1);

        head[0] = input[0] + pair.log_1mp;
        interior
            .par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(c, block)| Self::interior(pair, input, block, 1 + c * chunk));
        ceiling[0] = Self::ceiling(pair, input, k_max);
    }

    /// Plain per-entry transition. Reference for the vectorized paths.
    pub fn step_scalar(pair: LogPair, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), output.len());
        let k_max = output.len() - 1;
        if k_max == 0 {
            output[0] = input[0];
            return;
        }

        output[0] = input[0] + pair.log_1mp;
        for k in 1..k_max {
            output[k] = log_sum_exp(input[k] + pair.log_1mp, input[k - 1] + pair.log_p);
        }
        output[k_max] = Self::ceiling(pair, input, k_max);
    }

    #[inline]
    fn ceiling(pair: LogPair, input: &[f64], k_max: usize) -> f64 {
        log_sum_exp(input[k_max], input[k_max - 1] + pair.log_p)
    }

    /// Interior entries `out[i]` for `k = start + i`; every such `k` must
    /// satisfy `1 <= k < K`.
    #[inline]
    fn interior(pair: LogPair, input: &[f64], out: &mut [f64], start: usize) {
        let stay_add = f64x4::splat(pair.log_1mp);
        let enter_add = f64x4::splat(pair.log_p);
        let len = out.len();

        let mut i = 0;
        while i + LANES <= len {
            let k = start + i;

            let mut stay_arr = [0.0f64; LANES];
            stay_arr.copy_from_slice(&input[k..k + LANES]);
            let mut enter_arr = [0.0f64; LANES];
            enter_arr.copy_from_slice(&input[k - 1..k - 1 + LANES]);

            let stay = f64x4::from(stay_arr) + stay_add;
            let enter = f64x4::from(enter_arr) + enter_add;
            let hi = stay.max(enter);
            let delta = stay.min(enter) - hi;

            // exp/ln_1p per lane keeps results identical to the scalar path
            let hi_arr = hi.to_array();
            let delta_arr = delta.to_array();
            for lane in 0..LANES {
                out[i + lane] = hi_arr[lane] + delta_arr[lane].exp().ln_1p();
            }
            i += LANES;
        }

        // Scalar tail
        for (j, slot) in out.iter_mut().enumerate().skip(i) {
            let k = start + j;
            *slot = log_sum_exp(input[k] + pair.log_1mp, input[k - 1] + pair.log_p);
        }
    }
}
