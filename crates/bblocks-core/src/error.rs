// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::fmt;

/// Error taxonomy shared by every Bayesian Blocks crate.
///
/// All variants are fatal: a run either completes or fails before any
/// partition table is built. Non-finite block fitness is not an error; it is
/// scored as `-inf` by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum BlocksError {
    /// Unknown fitness tag or out-of-range prior/config parameter.
    Configuration(String),
    /// Repeated timestamp in the canonical `(times, values, uncertainties)` form.
    DuplicateInput { index: usize, time: f64 },
    /// Malformed input shape or value domain.
    InvalidInput(String),
}

impl BlocksError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn duplicate_input(index: usize, time: f64) -> Self {
        Self::DuplicateInput { index, time }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::DuplicateInput { .. } => "duplicate_input",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

impl fmt::Display for BlocksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::DuplicateInput { index, time } => write!(
                f,
                "duplicate input: time={time} at index {index} repeats the previous timestamp"
            ),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for BlocksError {}
