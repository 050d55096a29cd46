// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Bayesian Blocks optimal segmentation.
//!
//! ```
//! use bblocks_engine::{BayesianBlocks, BlocksConfig};
//! use bblocks_fitness::{FitnessKind, Prior};
//!
//! let config = BlocksConfig::new(FitnessKind::Events, Prior::p0(0.01)?)?;
//! let times = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
//! let values = [1.0, 3.0, 5.0, 100.0, 97.0, 8.0, 7.0, 6.0, 5.0];
//! let edges = BayesianBlocks::new(config)?.calculate_bins_binned(&times, &values)?;
//! assert_eq!(edges, vec![1.0, 3.5, 5.5, 9.0]);
//! # Ok::<(), bblocks_core::BlocksError>(())
//! ```

pub mod blocks;
pub mod config;
pub mod engine;
#[cfg(feature = "serde")]
pub mod schema_migration;

pub use blocks::{BayesianBlocks, SequenceInput};
pub use config::BlocksConfig;
pub use engine::{PartitionTable, RuntimeStats, SegmentationEngine};
#[cfg(feature = "serde")]
pub use schema_migration::{BlocksConfigWire, CURRENT_SCHEMA_VERSION, UnknownFields};
