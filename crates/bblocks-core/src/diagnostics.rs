// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::borrow::Cow;

/// Diagnostics schema version for segmentation run metadata.
pub const DIAGNOSTICS_SCHEMA_VERSION: u32 = 1;

/// Structured diagnostics captured from a segmentation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub n: usize,
    pub schema_version: u32,
    pub engine_version: Option<String>,
    pub runtime_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
    pub algorithm: Cow<'static, str>,
    pub fitness: Cow<'static, str>,
    pub prior: Cow<'static, str>,
    /// Candidate blocks scored during the forward pass, `N(N+1)/2`.
    pub candidates_evaluated: usize,
    /// Candidates whose raw fitness was non-finite and scored as `-inf`.
    pub degenerate_candidates: usize,
    #[cfg(feature = "serde")]
    pub params_json: Option<serde_json::Value>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            schema_version: DIAGNOSTICS_SCHEMA_VERSION,
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            runtime_ms: None,
            notes: vec![],
            warnings: vec![],
            algorithm: Cow::Borrowed(""),
            fitness: Cow::Borrowed(""),
            prior: Cow::Borrowed(""),
            candidates_evaluated: 0,
            degenerate_candidates: 0,
            #[cfg(feature = "serde")]
            params_json: None,
        }
    }
}
