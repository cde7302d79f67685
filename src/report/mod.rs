//! Report rendering -- plain text for humans, `key=value` lines for
//! downstream automation.

use crate::analysis::{TrafficReport, Z_SCORE_THRESHOLD};
use crate::traffic::TrafficHistory;

/// Format a report as a one-line human-readable summary.
pub fn format_summary(report: &TrafficReport) -> String {
    let mut summary = format!(
        "mean {:.1} req/min, std {:.1}, {} anomalous hour{}",
        report.stats.mean,
        report.stats.std_dev,
        report.anomalies.len(),
        if report.anomalies.len() == 1 { "" } else { "s" },
    );

    if !report.anomalies.is_empty() {
        let hours: Vec<String> = report
            .anomalies
            .iter()
            .map(|a| format!("{:02}:00", a.hour))
            .collect();
        summary.push_str(&format!(" ({})", hours.join(", ")));
    }
    summary.push_str(&format!(
        ", recommended limit {} req/min/user",
        report.limits.recommended
    ));

    summary
}

/// Render a report as an aligned plain-text block: stats line, one row per
/// flagged hour, then the limit plan.
pub fn render_text(report: &TrafficReport) -> String {
    let mut out = format!(
        "24-hour traffic analysis: mean {:.1} req/min, std {:.1}\n\n",
        report.stats.mean, report.stats.std_dev
    );

    if report.anomalies.is_empty() {
        out.push_str(&format!(
            "No anomalous hours (z-score threshold {}).\n",
            Z_SCORE_THRESHOLD
        ));
    } else {
        out.push_str(&format!(
            "{:<5} | {:>7} | {:>7}\n",
            "Hour", "req/min", "Z-score"
        ));
        out.push_str(&format!("{:-<5}-|-{:-<7}-|-{:-<7}\n", "", "", ""));
        for anomaly in &report.anomalies {
            out.push_str(&format!(
                "{:02}:00 | {:>7} | {:>7.1}\n",
                anomaly.hour, anomaly.value, anomaly.z_score
            ));
        }
    }

    out.push_str(&format!(
        "\nRecommended limit: {} req/min per user\n",
        report.limits.recommended
    ));
    out.push_str(&format!(
        "Strict limit:      {} req/min per user\n",
        report.limits.strict
    ));

    out
}

/// Render a report as `key=value` lines.
///
/// Keys and their order are a contract with downstream tooling; `mean` and
/// `std` carry one decimal, `anomaly_hours` is comma-joined and empty when
/// nothing was flagged.
pub fn render_key_values(report: &TrafficReport) -> String {
    let hours: Vec<String> = report
        .anomalies
        .iter()
        .map(|a| a.hour.to_string())
        .collect();

    let mut out = String::new();
    out.push_str(&format!("anomaly_count={}\n", report.anomalies.len()));
    out.push_str(&format!("mean={:.1}\n", report.stats.mean));
    out.push_str(&format!("std={:.1}\n", report.stats.std_dev));
    out.push_str(&format!(
        "recommended_limit={}\n",
        report.limits.recommended
    ));
    out.push_str(&format!("strict_limit={}\n", report.limits.strict));
    out.push_str(&format!("anomaly_hours={}\n", hours.join(",")));
    out
}

/// Render per-user day totals as an aligned table, busiest first.
pub fn render_user_table(history: &TrafficHistory) -> String {
    let grand_total = history.grand_total();

    let mut out = format!(
        "{:<4} | {:<25} | {:>8} | {:>12}\n",
        "Rank", "User", "Requests", "% of traffic"
    );
    out.push_str(&format!(
        "{:-<4}-|-{:-<25}-|-{:-<8}-|-{:-<12}\n",
        "", "", "", ""
    ));

    for (rank, (user, requests)) in history.user_totals().into_iter().enumerate() {
        let share = if grand_total == 0 {
            0.0
        } else {
            requests as f64 / grand_total as f64 * 100.0
        };
        out.push_str(&format!(
            "{:<4} | {:<25} | {:>8} | {:>11.1}%\n",
            rank + 1,
            user,
            requests,
            share
        ));
    }

    out
}
