// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::accumulator::BlockScratch;
use bblocks_core::{BlocksError, UniqueTimeSeries};
use std::fmt;
use std::str::FromStr;

/// Block fitness model, selected by name tag.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitnessKind {
    /// Poisson counts with a constant local rate.
    #[default]
    Events,
    /// Gaussian point measurements with known uncertainties.
    Measures,
}

/// Maximized Poisson log-likelihood `N (ln N - ln T)`.
///
/// Zero count yields NaN and zero exposure yields `+inf`; callers decide how
/// to score those.
pub fn events_fitness(count: f64, exposure: f64) -> f64 {
    count * (count.ln() - exposure.ln())
}

/// Maximized Gaussian log-likelihood `b^2 / (4a)` for `a = sum(1/sigma^2)/2`
/// and `b = -sum(x/sigma^2)`.
pub fn measures_fitness(a_sum: f64, b_sum: f64) -> f64 {
    b_sum * b_sum / (4.0 * a_sum)
}

impl FitnessKind {
    pub const ALL: [FitnessKind; 2] = [FitnessKind::Events, FitnessKind::Measures];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Measures => "measures",
        }
    }

    /// Checks the value domain this model requires.
    pub fn validate_series(&self, series: &UniqueTimeSeries) -> Result<(), BlocksError> {
        match self {
            Self::Events => {
                if let Some((idx, value)) = series
                    .values()
                    .iter()
                    .copied()
                    .enumerate()
                    .find(|(_, v)| *v < 0.0)
                {
                    return Err(BlocksError::invalid_input(format!(
                        "events fitness requires non-negative values; got value={value} at index {idx}"
                    )));
                }
                Ok(())
            }
            Self::Measures => Ok(()),
        }
    }

    /// Fills `scratch` fitness for every candidate start `0..=right` from the
    /// statistics already accumulated for that right endpoint.
    pub fn evaluate(&self, scratch: &mut BlockScratch) {
        let (stats, fitness) = scratch.split_for_evaluation();
        match self {
            Self::Events => {
                for ((out, &count), &exposure) in
                    fitness.iter_mut().zip(stats.counts).zip(stats.exposures)
                {
                    *out = events_fitness(count, exposure);
                }
            }
            Self::Measures => {
                for ((out, &a_sum), &b_sum) in
                    fitness.iter_mut().zip(stats.a_sums).zip(stats.b_sums)
                {
                    *out = measures_fitness(a_sum, b_sum);
                }
            }
        }
    }
}

impl fmt::Display for FitnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitnessKind {
    type Err = BlocksError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == tag)
            .ok_or_else(|| {
                BlocksError::configuration(format!(
                    "unknown fitness '{tag}'; expected one of: events, measures"
                ))
            })
    }
}
