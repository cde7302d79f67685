use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// An ordered sequence of per-hour request counts (req/min), index =
/// hour-of-day.
///
/// The canonical series covers a full day, hours 0-23. Operations that can
/// work on shorter slices accept them; see [`AnalysisError`] for the ones
/// that cannot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlySeries {
    counts: Vec<u64>,
}

impl HourlySeries {
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Iterate `(hour, value)` pairs in hour order.
    pub fn hours(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

/// Mean and population standard deviation of a series.
///
/// Computed once per series; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Compute the arithmetic mean and the population standard deviation
    /// (sum of squared deviations divided by n, not n-1).
    pub fn compute(series: &HourlySeries) -> Result<Self, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let n = series.len() as f64;
        let mean = series.counts().iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = series
            .counts()
            .iter()
            .map(|&v| {
                let diff = v as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;

        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
