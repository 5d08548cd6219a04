//! Binomial tail estimate: how surprising is a success count?
//!
//! Terms are summed in log space; `C(2500, 1250)·p^1250` overflows `f64`
//! long before the products cancel.

use anyhow::{ensure, Result};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BinomialTail {
    pub trials: u64,
    pub successes: u64,
    pub p: f64,
    /// `P(X >= successes)`.
    pub tail: f64,
    /// `P(X < successes)`, summed separately so small values keep precision.
    pub complement: f64,
}

/// `ln P(X = i)` for `i` in `0..=n`.
fn log_terms(n: u64, p: f64) -> Vec<f64> {
    let (ln_p, ln_q) = (p.ln(), (1.0 - p).ln());
    let mut ln_choose = 0.0;
    (0..=n)
        .map(|i| {
            if i > 0 {
                ln_choose += ((n - i + 1) as f64).ln() - (i as f64).ln();
            }
            let (a, b) = (i as f64, (n - i) as f64);
            // 0·ln 0 = 0 at the endpoints p = 0, p = 1.
            let success = if i == 0 { 0.0 } else { a * ln_p };
            let failure = if i == n { 0.0 } else { b * ln_q };
            ln_choose + success + failure
        })
        .collect()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

pub fn binomial_tail(trials: u64, successes: u64, p: f64) -> Result<BinomialTail> {
    ensure!((0.0..=1.0).contains(&p), "p must lie in [0, 1], got {p}");
    ensure!(
        successes <= trials,
        "successes ({successes}) exceed trials ({trials})"
    );
    let terms = log_terms(trials, p);
    let k = successes as usize;
    let tail = log_sum_exp(&terms[k..]).exp();
    let complement = log_sum_exp(&terms[..k]).exp();
    tracing::debug!(trials, successes, p, tail, "binomial tail");
    Ok(BinomialTail {
        trials,
        successes,
        p,
        tail,
        complement,
    })
}
