use serde::{Deserialize, Serialize};

use super::stats::{HourlySeries, SeriesStats};
use super::Z_SCORE_THRESHOLD;

/// A single hour flagged as anomalous. Transient: produced for the report,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Hour-of-day index (0-23 for a canonical series).
    pub hour: usize,
    /// Observed aggregate rate for that hour (req/min).
    pub value: u64,
    /// Z-score, rounded to one decimal place.
    pub z_score: f64,
}

/// Flag every hour whose z-score exceeds [`Z_SCORE_THRESHOLD`].
///
/// `z = (value - mean) / max(std, 1)`. The `max(std, 1)` guard keeps a
/// near-constant series from amplifying tiny deviations into anomalies.
/// Flagging uses the unrounded score; the reported score is rounded to one
/// decimal. Output is ordered by hour ascending.
pub fn detect(series: &HourlySeries, stats: &SeriesStats) -> Vec<AnomalyRecord> {
    let divisor = stats.std_dev.max(1.0);

    series
        .hours()
        .filter_map(|(hour, value)| {
            let z = (value as f64 - stats.mean) / divisor;
            if z > Z_SCORE_THRESHOLD {
                Some(AnomalyRecord {
                    hour,
                    value,
                    z_score: round_1dp(z),
                })
            } else {
                None
            }
        })
        .collect()
}

fn round_1dp(z: f64) -> f64 {
    (z * 10.0).round() / 10.0
}
