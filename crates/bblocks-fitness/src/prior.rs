// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bblocks_core::BlocksError;

/// Block-count penalty subtracted once per candidate block.
///
/// Every variant is a pure function of `(n, n_total)`, where `n` is the trial
/// block count handed in by the engine and `n_total` the number of unique
/// points in the series.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prior {
    /// Geometric prior over block count, `gamma` in `(0, 1)`.
    /// Smaller `gamma` penalizes each block more. The penalty depends on the
    /// trial block count, so lowering `gamma` usually but not always yields
    /// fewer blocks; use [`Prior::Constant`] when that must hold strictly.
    Gamma { gamma: f64 },
    /// Empirical false-positive-rate calibration, `p0` in `(0, 1)`.
    P0 { p0: f64 },
    /// Calibration for point measurements.
    Point,
    /// Fixed penalty per block, `beta >= 0`.
    Constant { beta: f64 },
}

impl Default for Prior {
    fn default() -> Self {
        Self::P0 { p0: 0.05 }
    }
}

fn check_open_unit(name: &str, value: f64) -> Result<(), BlocksError> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(BlocksError::configuration(format!(
            "{name} must lie in (0, 1); got {name}={value}"
        )));
    }
    Ok(())
}

/// Log prior probability of `n` blocks under a geometric prior truncated at
/// `n_total` points.
pub fn gamma_log_prior(gamma: f64, n: usize, n_total: usize) -> f64 {
    let truncation = gamma.powf(n_total as f64 + 1.0);
    (1.0 - gamma).ln() - (1.0 - truncation).ln() + n as f64 * gamma.ln()
}

impl Prior {
    pub fn gamma(gamma: f64) -> Result<Self, BlocksError> {
        let prior = Self::Gamma { gamma };
        prior.validate()?;
        Ok(prior)
    }

    pub fn p0(p0: f64) -> Result<Self, BlocksError> {
        let prior = Self::P0 { p0 };
        prior.validate()?;
        Ok(prior)
    }

    pub fn point() -> Self {
        Self::Point
    }

    pub fn constant(beta: f64) -> Result<Self, BlocksError> {
        let prior = Self::Constant { beta };
        prior.validate()?;
        Ok(prior)
    }

    pub fn validate(&self) -> Result<(), BlocksError> {
        match *self {
            Self::Gamma { gamma } => check_open_unit("gamma", gamma),
            Self::P0 { p0 } => check_open_unit("p0", p0),
            Self::Point => Ok(()),
            Self::Constant { beta } => {
                if !beta.is_finite() || beta < 0.0 {
                    return Err(BlocksError::configuration(format!(
                        "constant prior beta must be finite and >= 0.0; got beta={beta}"
                    )));
                }
                Ok(())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gamma { .. } => "gamma",
            Self::P0 { .. } => "p0",
            Self::Point => "point",
            Self::Constant { .. } => "constant",
        }
    }

    /// Penalty for a trial block count `n >= 1` out of `n_total` points.
    ///
    /// The gamma variant returns the negated log prior, so a less probable
    /// configuration costs more.
    pub fn penalty(&self, n: usize, n_total: usize) -> f64 {
        match *self {
            Self::Gamma { gamma } => -gamma_log_prior(gamma, n, n_total),
            Self::P0 { p0 } => 4.0 - (73.53 * p0 * (n as f64).powf(-0.478)).ln(),
            Self::Point => 1.32 + 0.577 * (n as f64).log10(),
            Self::Constant { beta } => beta,
        }
    }
}
