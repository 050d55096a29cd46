// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{BlocksError, Diagnostics};

/// One optimal block: unique points `[start, end)` spanning `[left_edge, right_edge]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSummary {
    pub start: usize,
    pub end: usize,
    pub left_edge: f64,
    pub right_edge: f64,
    /// Sum of member values (event counts for `events` fitness).
    pub value_sum: f64,
    /// Count rate for `events`, precision-weighted mean for `measures`.
    /// `None` when the value is not finite, e.g. the rate of a zero-width block.
    pub estimate: Option<f64>,
}

impl BlockSummary {
    pub fn width(&self) -> f64 {
        self.right_edge - self.left_edge
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Checks the change-index contract: starts at 0, ends at `n`, strictly increasing.
pub fn validate_change_indices(n: usize, change_indices: &[usize]) -> Result<(), BlocksError> {
    if change_indices.len() < 2 {
        return Err(BlocksError::invalid_input(format!(
            "change indices must hold at least 2 entries; got {}",
            change_indices.len()
        )));
    }
    if change_indices[0] != 0 {
        return Err(BlocksError::invalid_input(format!(
            "change indices must start at 0; got {}",
            change_indices[0]
        )));
    }
    if change_indices[change_indices.len() - 1] != n {
        return Err(BlocksError::invalid_input(format!(
            "change indices must end at n={n}; got {}",
            change_indices[change_indices.len() - 1]
        )));
    }
    if let Some(pair) = change_indices.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(BlocksError::invalid_input(format!(
            "change indices must be strictly increasing; found {} then {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Segmentation output: boundary coordinates plus the blocks they delimit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BlocksResult {
    /// Indices into the `N + 1` edge set, from 0 to `N`.
    pub change_indices: Vec<usize>,
    /// Boundary coordinates in the input time domain.
    pub edges: Vec<f64>,
    pub blocks: Vec<BlockSummary>,
    /// Best total score `best[N - 1]`; `None` when every candidate partition
    /// scored `-inf`.
    pub objective: Option<f64>,
    pub diagnostics: Diagnostics,
}

impl BlocksResult {
    pub fn new(
        n: usize,
        change_indices: Vec<usize>,
        edges: Vec<f64>,
        blocks: Vec<BlockSummary>,
        objective: Option<f64>,
        diagnostics: Diagnostics,
    ) -> Result<Self, BlocksError> {
        validate_change_indices(n, &change_indices)?;
        if edges.len() != change_indices.len() {
            return Err(BlocksError::invalid_input(format!(
                "edges length {} does not match change indices length {}",
                edges.len(),
                change_indices.len()
            )));
        }
        if blocks.len() + 1 != change_indices.len() {
            return Err(BlocksError::invalid_input(format!(
                "expected {} blocks for {} change indices; got {}",
                change_indices.len() - 1,
                change_indices.len(),
                blocks.len()
            )));
        }

        Ok(Self {
            change_indices,
            edges,
            blocks,
            objective,
            diagnostics,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Interior boundaries only; excludes the first and last edge.
    pub fn interior_edges(&self) -> &[f64] {
        &self.edges[1..self.edges.len() - 1]
    }
}
