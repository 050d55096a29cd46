// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::BlocksError;

/// Canonical `(time, value, uncertainty)` triples with strictly increasing times.
///
/// Every entry point reduces its input to this form before segmentation.
#[derive(Clone, Debug, PartialEq)]
pub struct UniqueTimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
    uncertainties: Vec<f64>,
}

impl UniqueTimeSeries {
    /// Constructs a validated series from parallel slices.
    ///
    /// Times must be finite and strictly increasing. An exact repeat of the
    /// previous timestamp is reported as [`BlocksError::DuplicateInput`]; a
    /// decrease is reported as [`BlocksError::InvalidInput`]. Uncertainties
    /// must be finite and `> 0`.
    pub fn new(times: &[f64], values: &[f64], uncertainties: &[f64]) -> Result<Self, BlocksError> {
        let n = times.len();
        if n == 0 {
            return Err(BlocksError::invalid_input("times must be non-empty; got n=0"));
        }
        if values.len() != n {
            return Err(BlocksError::invalid_input(format!(
                "values length mismatch: got {}, expected n={n}",
                values.len()
            )));
        }
        if uncertainties.len() != n {
            return Err(BlocksError::invalid_input(format!(
                "uncertainties length mismatch: got {}, expected n={n}",
                uncertainties.len()
            )));
        }

        for (idx, &t) in times.iter().enumerate() {
            if !t.is_finite() {
                return Err(BlocksError::invalid_input(format!(
                    "times must be finite; got time={t} at index {idx}"
                )));
            }
            if idx > 0 {
                let prev = times[idx - 1];
                if t == prev {
                    return Err(BlocksError::duplicate_input(idx, t));
                }
                if t < prev {
                    return Err(BlocksError::invalid_input(format!(
                        "times must be sorted ascending; time={t} at index {idx} precedes previous time={prev}"
                    )));
                }
                let edge = midpoint(prev, t);
                if edge <= prev || edge >= t {
                    return Err(BlocksError::invalid_input(format!(
                        "times at index {} and {idx} are too close to separate with a block edge; got {prev} and {t}",
                        idx - 1
                    )));
                }
            }
        }

        let span = times[n - 1] - times[0];
        if !span.is_finite() {
            return Err(BlocksError::invalid_input(format!(
                "time span must be finite; got first={} last={}",
                times[0],
                times[n - 1]
            )));
        }

        if let Some((idx, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(BlocksError::invalid_input(format!(
                "values must be finite; got value={value} at index {idx}"
            )));
        }

        if let Some((idx, sigma)) = uncertainties
            .iter()
            .copied()
            .enumerate()
            .find(|(_, s)| !s.is_finite() || *s <= 0.0)
        {
            return Err(BlocksError::invalid_input(format!(
                "uncertainties must be finite and > 0.0; got uncertainty={sigma} at index {idx}"
            )));
        }

        Ok(Self {
            times: times.to_vec(),
            values: values.to_vec(),
            uncertainties: uncertainties.to_vec(),
        })
    }

    /// Binned values with every uncertainty set to one.
    pub fn with_unit_uncertainties(times: &[f64], values: &[f64]) -> Result<Self, BlocksError> {
        let ones = vec![1.0; times.len()];
        Self::new(times, values, &ones)
    }

    /// Unbinned events: consecutive repeats collapse into one entry whose value
    /// is the occurrence count. Uncertainties are one.
    pub fn from_events(times: &[f64]) -> Result<Self, BlocksError> {
        let (unique, counts) = aggregate_events(times)?;
        Self::with_unit_uncertainties(&unique, &counts)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a constructed series; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn uncertainties(&self) -> &[f64] {
        &self.uncertainties
    }

    pub fn first_time(&self) -> f64 {
        self.times[0]
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Builds the `N + 1` block edges for this series.
    pub fn edges(&self) -> EdgeSet {
        EdgeSet::from_times(&self.times)
    }
}

// Halves before adding so large finite times cannot overflow.
fn midpoint(left: f64, right: f64) -> f64 {
    0.5 * left + 0.5 * right
}

/// Collapses consecutive duplicate timestamps into `(unique_times, counts)`.
///
/// Only adjacent repeats merge; callers are expected to pass sorted input.
/// Non-adjacent repeats survive and are rejected later by
/// [`UniqueTimeSeries::new`].
pub fn aggregate_events(times: &[f64]) -> Result<(Vec<f64>, Vec<f64>), BlocksError> {
    if times.is_empty() {
        return Err(BlocksError::invalid_input("times must be non-empty; got n=0"));
    }

    let mut unique = Vec::with_capacity(times.len());
    let mut counts: Vec<f64> = Vec::with_capacity(times.len());
    for (idx, &t) in times.iter().enumerate() {
        if !t.is_finite() {
            return Err(BlocksError::invalid_input(format!(
                "event times must be finite; got time={t} at index {idx}"
            )));
        }
        match (unique.last(), counts.last_mut()) {
            (Some(&prev), Some(count)) if prev == t => *count += 1.0,
            _ => {
                unique.push(t);
                counts.push(1.0);
            }
        }
    }

    Ok((unique, counts))
}

/// `N + 1` block boundaries, strictly increasing whenever `N >= 2`.
///
/// `edges[0]` is the first time, `edges[N]` the last time, and each interior
/// edge is the midpoint of the neighbouring unique times. A single point gives
/// two equal edges. [`UniqueTimeSeries::new`] rejects neighbours with no
/// representable midpoint strictly between them.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSet {
    edges: Vec<f64>,
}

impl EdgeSet {
    fn from_times(times: &[f64]) -> Self {
        let n = times.len();
        let mut edges = Vec::with_capacity(n + 1);
        edges.push(times[0]);
        for j in 1..n {
            edges.push(midpoint(times[j - 1], times[j]));
        }
        edges.push(times[n - 1]);
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.edges.get(idx).copied()
    }

    /// Elapsed time from each edge to the end of the observation window.
    pub fn block_lengths(&self) -> Vec<f64> {
        let end = self.edges[self.edges.len() - 1];
        self.edges.iter().map(|edge| end - edge).collect()
    }

    /// Maps ascending edge indices to coordinates.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<f64>, BlocksError> {
        indices
            .iter()
            .map(|&idx| {
                self.get(idx).ok_or_else(|| {
                    BlocksError::invalid_input(format!(
                        "edge index {idx} out of bounds for {} edges",
                        self.edges.len()
                    ))
                })
            })
            .collect()
    }
}
