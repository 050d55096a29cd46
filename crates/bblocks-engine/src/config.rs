// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bblocks_core::BlocksError;
use bblocks_fitness::{FitnessKind, Prior};

/// Configuration for [`crate::BayesianBlocks`] and [`crate::SegmentationEngine`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlocksConfig {
    pub fitness: FitnessKind,
    pub prior: Prior,
}

impl BlocksConfig {
    pub fn new(fitness: FitnessKind, prior: Prior) -> Result<Self, BlocksError> {
        let config = Self { fitness, prior };
        config.validate()?;
        Ok(config)
    }

    /// Selects the fitness model by its name tag (`"events"` or `"measures"`).
    pub fn from_tag(fitness: &str, prior: Prior) -> Result<Self, BlocksError> {
        Self::new(fitness.parse()?, prior)
    }

    pub fn validate(&self) -> Result<(), BlocksError> {
        self.prior.validate()
    }
}
