//! Synthetic 24-hour traffic histories -- per-user request series plus the
//! hourly aggregate the analyzer consumes.

pub mod simulate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::HourlySeries;

pub use simulate::simulate;

/// A day of per-user request rates and their hourly aggregate.
///
/// `users` maps a request label (API key owner, service account) to its
/// per-hour req/min row; `total[h]` is the sum across users at hour `h`.
/// Aggregate sums saturate at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficHistory {
    users: BTreeMap<String, Vec<u64>>,
    total: Vec<u64>,
}

impl TrafficHistory {
    /// Build a history from per-user rows, deriving the aggregate.
    ///
    /// Rows shorter than the longest one count as zero for the missing hours.
    pub fn from_users(users: BTreeMap<String, Vec<u64>>) -> Self {
        let hours = users.values().map(Vec::len).max().unwrap_or(0);
        let total = (0..hours)
            .map(|h| {
                users.values().fold(0u64, |acc, row| {
                    acc.saturating_add(row.get(h).copied().unwrap_or(0))
                })
            })
            .collect();
        Self { users, total }
    }

    /// Per-user rows, label-ordered.
    pub fn users(&self) -> &BTreeMap<String, Vec<u64>> {
        &self.users
    }

    /// The aggregate row as an analyzable series.
    pub fn total_series(&self) -> HourlySeries {
        HourlySeries::new(self.total.clone())
    }

    /// Hour and value of the aggregate peak; `None` for an empty history.
    /// Ties resolve to the earliest hour.
    pub fn peak(&self) -> Option<(usize, u64)> {
        let max = self.total.iter().copied().max()?;
        let hour = self.total.iter().position(|&v| v == max)?;
        Some((hour, max))
    }

    /// Per-user day totals, busiest first. Equal totals keep label order.
    pub fn user_totals(&self) -> Vec<(String, u64)> {
        let mut totals: Vec<(String, u64)> = self
            .users
            .iter()
            .map(|(label, row)| {
                let sum = row.iter().fold(0u64, |acc, &v| acc.saturating_add(v));
                (label.clone(), sum)
            })
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }

    /// Sum of every request in the history.
    pub fn grand_total(&self) -> u64 {
        self.total.iter().fold(0, |acc, &v| acc.saturating_add(v))
    }
}
