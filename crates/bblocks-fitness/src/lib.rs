// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Scoring building blocks for Bayesian Blocks: block fitness models,
//! block-count priors, and the reverse-cumulative statistics accumulator.

pub mod accumulator;
pub mod fitness;
pub mod prior;

pub use accumulator::{BlockScratch, BlockStats, SufficientStatistics};
pub use fitness::{FitnessKind, events_fitness, measures_fitness};
pub use prior::{Prior, gamma_log_prior};
