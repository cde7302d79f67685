//! TrafficWarden -- anomaly analysis and rate-limit planning for 24-hour
//! API request-rate series.
//!
//! This crate provides the core library for series statistics, z-score
//! anomaly detection, rate-limit recommendation, synthetic traffic
//! generation, and report rendering.

pub mod analysis;
pub mod report;
pub mod traffic;
