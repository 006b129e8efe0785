//! # Log-Space Primitives
//!
//! Scalar building blocks shared by every step of the pruned recurrence:
//! the "effectively impossible" sentinel, the stable log-sum-exp and the
//! per-base log transform with its degenerate-input clamp.

/// Finite stand-in for `ln(0)`.
///
/// Far below any attainable log-probability (a column of 10^6 bases at
/// `f64::EPSILON` each only reaches about -3.6e7), and adding any real
/// log-probability to it leaves it unchanged.
pub const LOGZERO: f64 = -1e100;

/// `ln(f64::EPSILON)`, the clamp used for probabilities at exactly 0 or 1.
#[inline]
pub fn ln_epsilon() -> f64 {
    f64::EPSILON.ln()
}

/// Stable `ln(exp(log_a) + exp(log_b))`.
///
/// Only ever exponentiates a non-positive difference, so it cannot overflow,
/// and `log_sum_exp(x, LOGZERO) == x` exactly for any realistic `x`.
#[inline]
pub fn log_sum_exp(log_a: f64, log_b: f64) -> f64 {
    let hi = log_a.max(log_b);
    let lo = log_a.min(log_b);
    hi + (lo - hi).exp().ln_1p()
}

/// Log-probability pair for one base: `ln(p)` and `ln(1 - p)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogPair {
    /// ln(p): the base shows the event
    pub log_p: f64,
    /// ln(1 - p): the base does not
    pub log_1mp: f64,
}

impl LogPair {
    /// Transform a probability, clamping values within epsilon of 0 or 1.
    ///
    /// Always finite; exact certainties become `ln(f64::EPSILON)`.
    #[inline]
    pub fn from_prob(p: f64) -> Self {
        let log_p = if p.abs() < f64::EPSILON {
            ln_epsilon()
        } else {
            p.ln()
        };
        let log_1mp = if (p - 1.0).abs() < f64::EPSILON {
            ln_epsilon()
        } else {
            (1.0 - p).ln()
        };
        Self { log_p, log_1mp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_log_sum_exp_known_value() {
        let got = log_sum_exp(0.3f64.ln(), 0.4f64.ln());
        assert!((got - 0.7f64.ln()).abs() < TOL, "got {}", got);
        assert!((got - (-0.356675)).abs() < 1e-6);
    }

    #[test]
    fn test_log_sum_exp_symmetric() {
        let values = [-1e3, -745.0, -20.5, -1.0, -1e-12, 0.0, 3.5, LOGZERO];
        for &a in &values {
            for &b in &values {
                assert_eq!(log_sum_exp(a, b).to_bits(), log_sum_exp(b, a).to_bits());
            }
        }
    }

    #[test]
    fn test_log_sum_exp_sentinel_is_inert() {
        for &a in &[0.0, -0.5, -36.04, -1e4, -3.6e7] {
            assert_eq!(log_sum_exp(a, LOGZERO), a);
            assert_eq!(log_sum_exp(LOGZERO, a), a);
        }
        // Two sentinels stay finite
        let z = log_sum_exp(LOGZERO, LOGZERO);
        assert!(z.is_finite());
        assert!(z <= LOGZERO + 1.0);
    }

    #[test]
    fn test_log_sum_exp_round_trip() {
        let pairs = [(1e-6, 2e-6), (0.01, 0.3), (0.25, 0.25), (0.49, 0.5), (1e-300, 0.1)];
        for &(x, y) in &pairs {
            let got = log_sum_exp(f64::ln(x), f64::ln(y)).exp();
            assert!((got - (x + y)).abs() < TOL, "{} + {} gave {}", x, y, got);
        }
    }

    #[test]
    fn test_log_sum_exp_no_overflow() {
        let got = log_sum_exp(800.0, 799.0);
        assert!(got.is_finite());
        assert!((got - (800.0 + (-1.0f64).exp().ln_1p())).abs() < TOL);
    }

    #[test]
    fn test_log_pair_regular() {
        let pair = LogPair::from_prob(0.2);
        assert!((pair.log_p - 0.2f64.ln()).abs() < TOL);
        assert!((pair.log_1mp - 0.8f64.ln()).abs() < TOL);
    }

    #[test]
    fn test_log_pair_clamps_zero_and_one() {
        let zero = LogPair::from_prob(0.0);
        assert_eq!(zero.log_p, ln_epsilon());
        assert_eq!(zero.log_1mp, 0.0);

        let one = LogPair::from_prob(1.0);
        assert_eq!(one.log_p, 0.0);
        assert_eq!(one.log_1mp, ln_epsilon());

        for pair in [zero, one] {
            assert!(pair.log_p.is_finite());
            assert!(pair.log_1mp.is_finite());
        }
    }

    #[test]
    fn test_log_pair_just_outside_epsilon_is_exact() {
        let p = 4.0 * f64::EPSILON;
        let pair = LogPair::from_prob(p);
        assert_eq!(pair.log_p, p.ln());
    }
}
