// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::BlocksConfig;
use bblocks_core::BlocksError;
use bblocks_fitness::{BlockScratch, FitnessKind, Prior, SufficientStatistics};

/// Best score and back-pointer for every right endpoint `R in 0..N`.
///
/// `best[R]` is the optimal total score of a partition of points `0..=R`;
/// `last[R]` is the start index of the final block in that partition.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionTable {
    best: Vec<f64>,
    last: Vec<usize>,
}

impl PartitionTable {
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn best(&self) -> &[f64] {
        &self.best
    }

    pub fn last(&self) -> &[usize] {
        &self.last
    }

    /// Score of the optimal partition of the whole series.
    pub fn objective(&self) -> Option<f64> {
        self.best.last().copied()
    }

    /// Follows back-pointers from `N` down to 0 and returns ascending edge
    /// indices, always starting at 0 and ending at `N`.
    pub fn backtrack(&self) -> Result<Vec<usize>, BlocksError> {
        let n = self.last.len();
        if n == 0 {
            return Err(BlocksError::invalid_input(
                "cannot backtrack an empty partition table",
            ));
        }

        let mut reverse = Vec::new();
        let mut cursor = n;
        loop {
            if reverse.len() > n {
                return Err(BlocksError::invalid_input(
                    "invalid partition backtrack state: cycle detected",
                ));
            }
            reverse.push(cursor);
            if cursor == 0 {
                break;
            }
            let start = self.last[cursor - 1];
            if start >= cursor {
                return Err(BlocksError::invalid_input(format!(
                    "invalid partition backtrack state: start={start} is not < cursor={cursor}"
                )));
            }
            cursor = start;
        }

        reverse.reverse();
        Ok(reverse)
    }
}

/// Counters gathered during one forward pass.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeStats {
    pub candidates_evaluated: usize,
    pub degenerate_candidates: usize,
}

/// Exact optimal-partition dynamic program over candidate blocks.
///
/// Stateless across calls: every invocation allocates its own table and
/// scratch, so a single engine can be shared freely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentationEngine {
    fitness: FitnessKind,
    prior: Prior,
}

impl SegmentationEngine {
    pub fn new(config: &BlocksConfig) -> Result<Self, BlocksError> {
        config.validate()?;
        Ok(Self::from_validated(*config))
    }

    pub(crate) fn from_validated(config: BlocksConfig) -> Self {
        Self {
            fitness: config.fitness,
            prior: config.prior,
        }
    }

    pub fn fitness(&self) -> FitnessKind {
        self.fitness
    }

    pub fn prior(&self) -> Prior {
        self.prior
    }

    /// Builds the partition table in one forward pass.
    ///
    /// Non-finite candidate fitness scores as `-inf`. The argmax starts at
    /// candidate 0 and moves only on a strictly greater score, so ties keep the
    /// earliest block start.
    pub fn forward(&self, stats: &SufficientStatistics) -> (PartitionTable, RuntimeStats) {
        let n = stats.len();
        let mut best = Vec::with_capacity(n);
        let mut last = Vec::with_capacity(n);
        let mut scratch = BlockScratch::with_capacity(n);
        let mut runtime = RuntimeStats::default();

        for right in 0..n {
            stats.accumulate(right, self.fitness, &mut scratch);
            self.fitness.evaluate(&mut scratch);
            let penalty = self.prior.penalty(right + 1, n);

            let mut best_start = 0usize;
            let mut best_score = f64::NEG_INFINITY;
            for (start, &raw_fitness) in scratch.fitness().iter().enumerate() {
                let fitness = if raw_fitness.is_finite() {
                    raw_fitness
                } else {
                    runtime.degenerate_candidates += 1;
                    f64::NEG_INFINITY
                };

                let mut score = fitness - penalty;
                if start > 0 {
                    score += best[start - 1];
                }
                if start == 0 || score > best_score {
                    best_start = start;
                    best_score = score;
                }
            }
            runtime.candidates_evaluated += right + 1;

            tracing::trace!(
                right,
                best_start,
                best_score,
                penalty,
                "bayesian blocks forward row"
            );
            best.push(best_score);
            last.push(best_start);
        }

        (PartitionTable { best, last }, runtime)
    }

    /// Runs the forward pass and backtracks to ascending edge indices.
    pub fn segment(
        &self,
        stats: &SufficientStatistics,
    ) -> Result<(Vec<usize>, PartitionTable, RuntimeStats), BlocksError> {
        if stats.is_empty() {
            return Err(BlocksError::invalid_input(
                "segmentation requires at least one point; got n=0",
            ));
        }
        let (table, runtime) = self.forward(stats);
        let change_indices = table.backtrack()?;
        Ok((change_indices, table, runtime))
    }
}
