//! Derived scalar metrics: point-in-time ratios and blended segment views

pub mod calculator;
mod blended;
mod snapshot;

pub use blended::BlendedMetrics;
pub use snapshot::MetricsSnapshot;
