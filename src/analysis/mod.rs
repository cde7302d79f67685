//! Statistical traffic analysis -- series statistics, z-score anomaly
//! detection, and per-user rate-limit recommendation.

pub mod anomaly;
pub mod limits;
pub mod stats;

pub use anomaly::AnomalyRecord;
pub use limits::RateLimitPlan;
pub use stats::{HourlySeries, SeriesStats};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hourly buckets in a canonical day-long series.
pub const HOURS_PER_DAY: usize = 24;

/// Z-score above which an hour is flagged as anomalous.
pub const Z_SCORE_THRESHOLD: f64 = 2.5;

/// Hours `0..BASELINE_WINDOW_HOURS` form the baseline window used for the
/// limit plan. Caller contract: upstream traffic shaping keeps abusive
/// bursts out of those hours. Nothing here verifies that.
pub const BASELINE_WINDOW_HOURS: usize = 14;

/// Multipliers applied to the baseline-window peak.
pub const RECOMMENDED_MULTIPLIER: f64 = 1.5;
pub const STRICT_MULTIPLIER: f64 = 1.0;

/// Lower clamps for the derived limits (req/min per user).
pub const RECOMMENDED_FLOOR: u64 = 15;
pub const STRICT_FLOOR: u64 = 10;

/// Invalid input to the analyzer -- the only failure kind. The analysis
/// itself performs no I/O and cannot fail partially.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("series is empty: statistics are undefined")]
    EmptySeries,

    #[error("series too short: need {needed} hourly entries for the baseline window, have {have}")]
    InsufficientWindow { needed: usize, have: usize },
}

/// Full analyzer output: statistics, flagged hours, and the limit plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficReport {
    pub stats: SeriesStats,
    pub anomalies: Vec<AnomalyRecord>,
    pub limits: RateLimitPlan,
}

impl TrafficReport {
    /// Flagged hours, ascending.
    pub fn anomaly_hours(&self) -> Vec<usize> {
        self.anomalies.iter().map(|a| a.hour).collect()
    }
}

/// Analyze a 24-hour request-rate series: mean and population standard
/// deviation, hours whose z-score crosses the threshold, and per-user rate
/// limits derived from the baseline-window peak.
///
/// Pure function of its input: same series, same report. Safe to call
/// concurrently on independent inputs.
pub fn analyze(series: &HourlySeries) -> Result<TrafficReport, AnalysisError> {
    let stats = SeriesStats::compute(series)?;
    let anomalies = anomaly::detect(series, &stats);
    let limits = limits::recommend(series)?;

    Ok(TrafficReport {
        stats,
        anomalies,
        limits,
    })
}
