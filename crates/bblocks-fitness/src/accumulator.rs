// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::fitness::FitnessKind;
use bblocks_core::UniqueTimeSeries;

/// Per-point quantities from which every block aggregate is built.
///
/// `precisions[i] = 1/sigma_i^2`, `weighted[i] = x_i * precisions[i]`, and
/// `block_lengths[j]` is the time from edge `j` to the end of the window.
#[derive(Clone, Debug, PartialEq)]
pub struct SufficientStatistics {
    values: Vec<f64>,
    precisions: Vec<f64>,
    weighted: Vec<f64>,
    block_lengths: Vec<f64>,
}

impl SufficientStatistics {
    pub fn new(series: &UniqueTimeSeries) -> Self {
        let values = series.values().to_vec();
        let precisions: Vec<f64> = series
            .uncertainties()
            .iter()
            .map(|sigma| 1.0 / (sigma * sigma))
            .collect();
        let weighted = values
            .iter()
            .zip(&precisions)
            .map(|(value, precision)| value * precision)
            .collect();

        Self {
            values,
            precisions,
            weighted,
            block_lengths: series.edges().block_lengths(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn block_lengths(&self) -> &[f64] {
        &self.block_lengths
    }

    /// Aggregates every candidate block `[start, right]`, `start in 0..=right`,
    /// into `scratch` with a single reverse pass.
    ///
    /// Only the aggregates `kind` consumes are written: counts and exposures
    /// for `events`, halved precision sums and negated weighted sums for
    /// `measures`.
    pub fn accumulate(&self, right: usize, kind: FitnessKind, scratch: &mut BlockScratch) {
        debug_assert!(
            right < self.len(),
            "accumulate right endpoint out of bounds: right={right}, n={}",
            self.len()
        );
        scratch.reset(right + 1);

        match kind {
            FitnessKind::Events => {
                let tail = self.block_lengths[right + 1];
                let mut count = 0.0;
                for start in (0..=right).rev() {
                    count += self.values[start];
                    scratch.counts[start] = count;
                    scratch.exposures[start] = self.block_lengths[start] - tail;
                }
            }
            FitnessKind::Measures => {
                let mut precision_sum = 0.0;
                let mut weighted_sum = 0.0;
                for start in (0..=right).rev() {
                    precision_sum += self.precisions[start];
                    weighted_sum += self.weighted[start];
                    scratch.a_sums[start] = 0.5 * precision_sum;
                    scratch.b_sums[start] = -weighted_sum;
                }
            }
        }
    }
}

/// Borrowed aggregates for the active candidates of one right endpoint.
#[derive(Clone, Copy, Debug)]
pub struct BlockStats<'a> {
    pub counts: &'a [f64],
    pub exposures: &'a [f64],
    pub a_sums: &'a [f64],
    pub b_sums: &'a [f64],
}

/// Reusable per-right-endpoint buffers, indexed by candidate block start.
///
/// One instance serves a whole forward pass; only the first `candidates`
/// entries of each buffer are meaningful after an [`SufficientStatistics::accumulate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockScratch {
    counts: Vec<f64>,
    exposures: Vec<f64>,
    a_sums: Vec<f64>,
    b_sums: Vec<f64>,
    fitness: Vec<f64>,
    candidates: usize,
}

impl BlockScratch {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            counts: vec![0.0; n],
            exposures: vec![0.0; n],
            a_sums: vec![0.0; n],
            b_sums: vec![0.0; n],
            fitness: vec![0.0; n],
            candidates: 0,
        }
    }

    fn reset(&mut self, candidates: usize) {
        if candidates > self.fitness.len() {
            for buffer in [
                &mut self.counts,
                &mut self.exposures,
                &mut self.a_sums,
                &mut self.b_sums,
                &mut self.fitness,
            ] {
                buffer.resize(candidates, 0.0);
            }
        }
        self.candidates = candidates;
    }

    pub fn capacity(&self) -> usize {
        self.fitness.len()
    }

    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts[..self.candidates]
    }

    pub fn exposures(&self) -> &[f64] {
        &self.exposures[..self.candidates]
    }

    pub fn a_sums(&self) -> &[f64] {
        &self.a_sums[..self.candidates]
    }

    pub fn b_sums(&self) -> &[f64] {
        &self.b_sums[..self.candidates]
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness[..self.candidates]
    }

    pub(crate) fn split_for_evaluation(&mut self) -> (BlockStats<'_>, &mut [f64]) {
        let n = self.candidates;
        (
            BlockStats {
                counts: &self.counts[..n],
                exposures: &self.exposures[..n],
                a_sums: &self.a_sums[..n],
                b_sums: &self.b_sums[..n],
            },
            &mut self.fitness[..n],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockScratch, SufficientStatistics};
    use crate::FitnessKind;
    use bblocks_core::UniqueTimeSeries;

    fn series() -> UniqueTimeSeries {
        UniqueTimeSeries::new(
            &[1.0, 2.0, 4.0, 5.0],
            &[3.0, 1.0, 0.0, 2.0],
            &[1.0, 2.0, 0.5, 1.0],
        )
        .expect("valid series")
    }

    #[test]
    fn new_derives_precision_weighted_terms() {
        let stats = SufficientStatistics::new(&series());
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.precisions, vec![1.0, 0.25, 4.0, 1.0]);
        assert_eq!(stats.weighted, vec![3.0, 0.25, 0.0, 2.0]);
        // edges: [1, 1.5, 3, 4.5, 5]
        assert_eq!(stats.block_lengths(), &[4.0, 3.5, 2.0, 0.5, 0.0]);
    }

    #[test]
    fn events_aggregates_match_direct_sums() {
        let series = series();
        let stats = SufficientStatistics::new(&series);
        let mut scratch = BlockScratch::with_capacity(series.len());

        for right in 0..series.len() {
            stats.accumulate(right, FitnessKind::Events, &mut scratch);
            assert_eq!(scratch.candidates(), right + 1);
            for start in 0..=right {
                let direct: f64 = series.values()[start..=right].iter().sum();
                assert_eq!(scratch.counts()[start], direct);
                let exposure = stats.block_lengths()[start] - stats.block_lengths()[right + 1];
                assert_eq!(scratch.exposures()[start], exposure);
            }
        }
    }

    #[test]
    fn exposure_spans_block_edges() {
        let series = series();
        let stats = SufficientStatistics::new(&series);
        let mut scratch = BlockScratch::with_capacity(series.len());
        stats.accumulate(2, FitnessKind::Events, &mut scratch);
        // Blocks ending at index 2 close at edge 3 = 4.5.
        assert_eq!(scratch.exposures(), &[3.5, 3.0, 1.5]);
    }

    #[test]
    fn measures_aggregates_are_halved_and_negated() {
        let series = series();
        let stats = SufficientStatistics::new(&series);
        let mut scratch = BlockScratch::with_capacity(series.len());
        stats.accumulate(3, FitnessKind::Measures, &mut scratch);
        assert_eq!(scratch.a_sums(), &[3.125, 2.625, 2.5, 0.5]);
        assert_eq!(scratch.b_sums(), &[-5.25, -2.25, -2.0, -2.0]);
    }

    #[test]
    fn scratch_is_reused_and_grows_on_demand() {
        let series = series();
        let stats = SufficientStatistics::new(&series);
        let mut scratch = BlockScratch::default();
        assert_eq!(scratch.capacity(), 0);

        stats.accumulate(3, FitnessKind::Events, &mut scratch);
        assert_eq!(scratch.capacity(), 4);
        stats.accumulate(1, FitnessKind::Events, &mut scratch);
        assert_eq!(scratch.capacity(), 4);
        assert_eq!(scratch.counts(), &[4.0, 1.0]);
    }
}
