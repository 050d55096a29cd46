// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Core shared types for Bayesian Blocks segmentation: validated input
//! series, block edges, errors, and run results.

pub mod diagnostics;
pub mod error;
pub mod result;
pub mod series;

pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, Diagnostics};
pub use error::BlocksError;
pub use result::{BlockSummary, BlocksResult, validate_change_indices};
pub use series::{EdgeSet, UniqueTimeSeries, aggregate_events};
