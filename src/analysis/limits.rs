use serde::{Deserialize, Serialize};

use super::stats::HourlySeries;
use super::{
    AnalysisError, BASELINE_WINDOW_HOURS, RECOMMENDED_FLOOR, RECOMMENDED_MULTIPLIER, STRICT_FLOOR,
    STRICT_MULTIPLIER,
};

/// Per-user rate limits derived from the baseline-window peak, in req/min.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPlan {
    /// Headroom limit: 1.5x the normal peak, never below 15.
    pub recommended: u64,
    /// Tight limit: 1.0x the normal peak, never below 10.
    pub strict: u64,
}

/// Maximum observed rate inside the baseline window (hours 0-13).
///
/// The window is a caller contract, not an inferred property: upstream
/// traffic shaping is expected to keep abusive bursts out of it.
pub fn normal_peak(series: &HourlySeries) -> Result<u64, AnalysisError> {
    if series.len() < BASELINE_WINDOW_HOURS {
        return Err(AnalysisError::InsufficientWindow {
            needed: BASELINE_WINDOW_HOURS,
            have: series.len(),
        });
    }

    Ok(series.counts()[..BASELINE_WINDOW_HOURS]
        .iter()
        .copied()
        .max()
        .unwrap_or(0))
}

/// Recommend per-user rate limits from the baseline-window peak.
pub fn recommend(series: &HourlySeries) -> Result<RateLimitPlan, AnalysisError> {
    let peak = normal_peak(series)?;

    Ok(RateLimitPlan {
        recommended: clamp_limit(peak, RECOMMENDED_MULTIPLIER, RECOMMENDED_FLOOR),
        strict: clamp_limit(peak, STRICT_MULTIPLIER, STRICT_FLOOR),
    })
}

fn clamp_limit(peak: u64, multiplier: f64, floor: u64) -> u64 {
    ((peak as f64 * multiplier).round() as u64).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_from_business_hours_peak() {
        // Normal window peaks at 62 (hour 12); the 300+ burst hours sit
        // outside the window and must not move the plan.
        let series = HourlySeries::new(vec![
            8, 5, 4, 3, 3, 4, 12, 28, 45, 52, 48, 55, 62, 58, 300, 320, 310,
            290, 54, 48, 45, 42, 38, 30,
        ]);
        assert_eq!(normal_peak(&series).unwrap(), 62);

        let plan = recommend(&series).unwrap();
        assert_eq!(plan.recommended, 93);
        assert_eq!(plan.strict, 62);
    }

    #[test]
    fn test_floors_hold_for_idle_traffic() {
        let plan = recommend(&HourlySeries::new(vec![0; 24])).unwrap();
        assert_eq!(plan.recommended, 15);
        assert_eq!(plan.strict, 10);
    }

    #[test]
    fn test_recommended_rounds_half_up() {
        // Peak 21 -> 21 * 1.5 = 31.5 -> 32
        let mut counts = vec![1; 24];
        counts[5] = 21;
        let plan = recommend(&HourlySeries::new(counts)).unwrap();
        assert_eq!(plan.recommended, 32);
        assert_eq!(plan.strict, 21);
    }

    #[test]
    fn test_recommended_never_below_strict() {
        for peak in [0u64, 1, 9, 10, 14, 15, 30, 62, 1000] {
            let mut counts = vec![0; 24];
            counts[0] = peak;
            let plan = recommend(&HourlySeries::new(counts)).unwrap();
            assert!(plan.recommended >= plan.strict);
        }
    }

    #[test]
    fn test_short_series_is_rejected() {
        let err = recommend(&HourlySeries::new(vec![5; 13])).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientWindow {
                needed: 14,
                have: 13
            }
        ));
    }

    #[test]
    fn test_fourteen_entries_is_the_minimum() {
        let plan = recommend(&HourlySeries::new(vec![20; 14])).unwrap();
        assert_eq!(plan.recommended, 30);
        assert_eq!(plan.strict, 20);
    }
}
