// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Deterministic synthetic inputs shared by the benchmarks.

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// Piecewise-constant count series: `n` unit-spaced bins, rate switching every
/// `n / regimes` bins, with bounded pseudo-random jitter.
pub fn piecewise_counts(n: usize, regimes: usize) -> (Vec<f64>, Vec<f64>) {
    let regime_len = (n / regimes.max(1)).max(1);
    let mut state = 0xfeed_f00d_dead_beef_u64;
    let times = (0..n).map(|idx| idx as f64).collect();
    let values = (0..n)
        .map(|idx| {
            let base = if (idx / regime_len) % 2 == 0 { 4.0 } else { 20.0 };
            base + (lcg_next(&mut state) % 5) as f64
        })
        .collect();
    (times, values)
}

/// Sorted event times with repeats, drawn from a two-rate process.
pub fn clustered_events(count: usize) -> Vec<f64> {
    let mut state = 0x1234_5678_9abc_def0_u64;
    let mut t = 0.0;
    let mut out = Vec::with_capacity(count);
    for idx in 0..count {
        let step = if (idx / 500) % 2 == 0 { 8 } else { 1 };
        t += ((lcg_next(&mut state) % step) as f64) * 0.01;
        out.push(t);
    }
    out
}
