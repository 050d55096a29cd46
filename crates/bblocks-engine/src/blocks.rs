// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::BlocksConfig;
use crate::engine::{RuntimeStats, SegmentationEngine};
use bblocks_core::{
    BlockSummary, BlocksError, BlocksResult, Diagnostics, EdgeSet, UniqueTimeSeries,
};
use bblocks_fitness::{FitnessKind, SufficientStatistics};
use std::borrow::Cow;
use std::time::Instant;

/// The three accepted input shapes, each reducible to a [`UniqueTimeSeries`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequenceInput<'a> {
    /// Unbinned event times; repeats become occurrence counts.
    Events { times: &'a [f64] },
    /// Binned values with unit uncertainties.
    Binned {
        times: &'a [f64],
        values: &'a [f64],
    },
    /// Binned values with explicit uncertainties.
    Measured {
        times: &'a [f64],
        values: &'a [f64],
        uncertainties: &'a [f64],
    },
}

impl SequenceInput<'_> {
    pub fn normalize(&self) -> Result<UniqueTimeSeries, BlocksError> {
        match *self {
            Self::Events { times } => UniqueTimeSeries::from_events(times),
            Self::Binned { times, values } => {
                UniqueTimeSeries::with_unit_uncertainties(times, values)
            }
            Self::Measured {
                times,
                values,
                uncertainties,
            } => UniqueTimeSeries::new(times, values, uncertainties),
        }
    }
}

/// Bayesian Blocks segmentation: optimal partition of a time-ordered series
/// into contiguous blocks under the configured fitness and prior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BayesianBlocks {
    config: BlocksConfig,
    engine: SegmentationEngine,
}

impl Default for BayesianBlocks {
    fn default() -> Self {
        let config = BlocksConfig::default();
        Self {
            config,
            engine: SegmentationEngine::from_validated(config),
        }
    }
}

impl BayesianBlocks {
    pub fn new(config: BlocksConfig) -> Result<Self, BlocksError> {
        let engine = SegmentationEngine::new(&config)?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &BlocksConfig {
        &self.config
    }

    /// Edges for unbinned event times.
    pub fn calculate_bins_events(&self, times: &[f64]) -> Result<Vec<f64>, BlocksError> {
        Ok(self.fit_events(times)?.edges)
    }

    /// Edges for binned values; every uncertainty is one.
    pub fn calculate_bins_binned(
        &self,
        times: &[f64],
        values: &[f64],
    ) -> Result<Vec<f64>, BlocksError> {
        Ok(self.fit_binned(times, values)?.edges)
    }

    /// Edges for binned values with explicit uncertainties.
    pub fn calculate_bins(
        &self,
        times: &[f64],
        values: &[f64],
        uncertainties: &[f64],
    ) -> Result<Vec<f64>, BlocksError> {
        Ok(self.fit(times, values, uncertainties)?.edges)
    }

    pub fn fit_events(&self, times: &[f64]) -> Result<BlocksResult, BlocksError> {
        self.fit_input(&SequenceInput::Events { times })
    }

    pub fn fit_binned(&self, times: &[f64], values: &[f64]) -> Result<BlocksResult, BlocksError> {
        self.fit_input(&SequenceInput::Binned { times, values })
    }

    pub fn fit(
        &self,
        times: &[f64],
        values: &[f64],
        uncertainties: &[f64],
    ) -> Result<BlocksResult, BlocksError> {
        self.fit_input(&SequenceInput::Measured {
            times,
            values,
            uncertainties,
        })
    }

    pub fn fit_input(&self, input: &SequenceInput<'_>) -> Result<BlocksResult, BlocksError> {
        self.fit_series(&input.normalize()?)
    }

    /// Segments an already-normalized series.
    pub fn fit_series(&self, series: &UniqueTimeSeries) -> Result<BlocksResult, BlocksError> {
        let fitness = self.engine.fitness();
        let prior = self.engine.prior();
        fitness.validate_series(series)?;

        let started_at = Instant::now();
        let n = series.len();
        tracing::debug!(
            n,
            fitness = fitness.name(),
            prior = prior.name(),
            "bayesian blocks run started"
        );

        let stats = SufficientStatistics::new(series);
        let (change_indices, table, runtime) = self.engine.segment(&stats)?;
        let edge_set = series.edges();
        let edges = edge_set.select(&change_indices)?;
        let blocks = summarize_blocks(series, &edge_set, &change_indices, fitness);
        let objective = table
            .objective()
            .ok_or_else(|| BlocksError::invalid_input("partition table is empty"))?;

        let runtime_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(
            n,
            block_count = blocks.len(),
            objective,
            runtime_ms,
            degenerate_candidates = runtime.degenerate_candidates,
            "bayesian blocks run finished"
        );

        let diagnostics = self.diagnostics(n, blocks.len(), objective, runtime_ms, runtime);
        let objective = objective.is_finite().then_some(objective);
        BlocksResult::new(n, change_indices, edges, blocks, objective, diagnostics)
    }

    fn diagnostics(
        &self,
        n: usize,
        block_count: usize,
        objective: f64,
        runtime_ms: u64,
        runtime: RuntimeStats,
    ) -> Diagnostics {
        let mut warnings = vec![];
        if runtime.degenerate_candidates > 0 {
            warnings.push(format!(
                "{} candidate blocks had non-finite fitness (zero count or zero exposure) and scored as -inf",
                runtime.degenerate_candidates
            ));
        }

        Diagnostics {
            n,
            runtime_ms: Some(runtime_ms),
            notes: vec![format!(
                "final_objective={objective}, block_count={block_count}"
            )],
            warnings,
            algorithm: Cow::Borrowed("bayesian_blocks"),
            fitness: Cow::Borrowed(self.config.fitness.name()),
            prior: Cow::Borrowed(self.config.prior.name()),
            candidates_evaluated: runtime.candidates_evaluated,
            degenerate_candidates: runtime.degenerate_candidates,
            #[cfg(feature = "serde")]
            params_json: serde_json::to_value(self.config).ok(),
            ..Diagnostics::default()
        }
    }
}

fn summarize_blocks(
    series: &UniqueTimeSeries,
    edge_set: &EdgeSet,
    change_indices: &[usize],
    fitness: FitnessKind,
) -> Vec<BlockSummary> {
    let edges = edge_set.as_slice();
    change_indices
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let values = &series.values()[start..end];
            let value_sum: f64 = values.iter().sum();
            let (left_edge, right_edge) = (edges[start], edges[end]);
            let estimate = match fitness {
                FitnessKind::Events => value_sum / (right_edge - left_edge),
                FitnessKind::Measures => {
                    let (weighted, precision) = values
                        .iter()
                        .zip(&series.uncertainties()[start..end])
                        .fold((0.0, 0.0), |(w, p), (x, sigma)| {
                            let precision = 1.0 / (sigma * sigma);
                            (w + x * precision, p + precision)
                        });
                    weighted / precision
                }
            };
            let estimate = estimate.is_finite().then_some(estimate);
            BlockSummary {
                start,
                end,
                left_edge,
                right_edge,
                value_sum,
                estimate,
            }
        })
        .collect()
}
