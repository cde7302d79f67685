//! Deterministic traffic generator: a diurnal baseline, a handful of
//! well-behaved clients, and one flooding client.

use std::collections::BTreeMap;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

use crate::analysis::HOURS_PER_DAY;

use super::TrafficHistory;

/// Aggregate req/min shape over a day, peaking at business hours.
pub const BASELINE_SHAPE: [u64; HOURS_PER_DAY] = [
    8, 5, 4, 3, 3, 4, 12, 28, 45, 52, 48, 55, 62, 58, 54, 48, 45, 42, 38, 30, 24, 18, 14, 10,
];

/// Well-behaved clients: label, share of the baseline, gaussian jitter.
const NORMAL_USERS: [(&str, f64, f64); 5] = [
    ("alice@example.com", 0.25, 2.0),
    ("bob@example.com", 0.20, 1.0),
    ("carol@example.com", 0.15, 1.0),
    ("dan@example.com", 0.12, 1.0),
    ("metrics-bot@example.com", 0.10, 1.0),
];

/// The flooding client and the hours it hammers the API.
pub const BURST_USER: &str = "unknown@flood.example";
pub const BURST_HOURS: Range<usize> = 14..18;

const BURST_RATE: (u64, u64) = (280, 450);
const IDLE_RATE: (u64, u64) = (0, 2);

/// Generate one deterministic day of traffic.
///
/// The same seed always yields the same history. The burst window falls
/// entirely outside hours 0-13, so limits derived from the aggregate stay
/// grounded in normal load.
pub fn simulate(seed: u64) -> TrafficHistory {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut users = BTreeMap::new();

    for (label, share, jitter) in NORMAL_USERS {
        let noise = Normal::new(0.0, jitter).expect("jitter is positive");
        let row = BASELINE_SHAPE
            .iter()
            .map(|&b| clamp_count(b as f64 * share + rng.sample(noise)))
            .collect();
        users.insert(label.to_string(), row);
    }

    let burst_row = (0..HOURS_PER_DAY)
        .map(|hour| {
            let (low, high) = if BURST_HOURS.contains(&hour) {
                BURST_RATE
            } else {
                IDLE_RATE
            };
            rng.gen_range(low..=high)
        })
        .collect();
    users.insert(BURST_USER.to_string(), burst_row);

    let history = TrafficHistory::from_users(users);
    debug!(
        seed,
        users = history.users().len(),
        total = history.grand_total(),
        "generated traffic history"
    );
    history
}

/// Negative jitter clamps to zero; fractional counts truncate.
fn clamp_count(value: f64) -> u64 {
    value.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_yields_identical_history() {
        assert_eq!(simulate(42), simulate(42));
    }

    #[test]
    fn test_different_seeds_diverge() {
        assert_ne!(simulate(1), simulate(2));
    }

    #[test]
    fn test_history_shape() {
        let history = simulate(7);
        assert_eq!(history.users().len(), NORMAL_USERS.len() + 1);
        for row in history.users().values() {
            assert_eq!(row.len(), HOURS_PER_DAY);
        }

        let sums: Vec<u64> = (0..HOURS_PER_DAY)
            .map(|h| history.users().values().map(|row| row[h]).sum())
            .collect();
        assert_eq!(history.total_series().counts(), sums.as_slice());
    }

    #[test]
    fn test_burst_user_stays_inside_its_envelope() {
        let history = simulate(42);
        let row = &history.users()[BURST_USER];
        for (hour, &count) in row.iter().enumerate() {
            if BURST_HOURS.contains(&hour) {
                assert!(
                    (BURST_RATE.0..=BURST_RATE.1).contains(&count),
                    "hour {hour}: {count} outside burst envelope"
                );
            } else {
                assert!(count <= IDLE_RATE.1, "hour {hour}: {count} while idle");
            }
        }
    }

    #[test]
    fn test_aggregate_peaks_during_the_flood() {
        // Burst hours carry at least 280 req/min from the flooding client
        // alone; honest clients top out near 51 req/min combined.
        let (hour, value) = simulate(42).peak().unwrap();
        assert!(BURST_HOURS.contains(&hour));
        assert!(value >= BURST_RATE.0);
    }

    #[test]
    fn test_clamp_count_truncates_and_floors() {
        assert_eq!(clamp_count(-3.2), 0);
        assert_eq!(clamp_count(0.9), 0);
        assert_eq!(clamp_count(12.7), 12);
    }
}
