//! Startup Metrics - projection and derived-metrics engine for early-stage companies
//!
//! This library provides:
//! - Point-in-time financial metrics (burn rate, runway, MoM growth, LTV/CAC)
//! - Revenue trajectories under fixed, linear, or exponential growth
//! - Per-segment customer flow simulation (new, churned, total)
//! - Multi-scenario cash projections from named multiplier sets
//! - Blended two-segment customer metrics (weighted CAC, churn, ARPU, LTV)
//!
//! Every operation is a pure function of its arguments: trajectories are
//! produced fresh per call, validated up front, and indexed by period with
//! period 0 as the current state. Rendering period indices as calendar
//! dates and persisting inputs are left to callers.

pub mod company;
pub mod error;
pub mod metrics;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use company::{CompanyFinancials, CustomerSegment, SegmentKind};
pub use error::MetricsError;
pub use metrics::{BlendedMetrics, MetricsSnapshot};
pub use projection::{CustomerFlowResult, GrowthModel, ProjectionSeries};
pub use scenario::{Scenario, ScenarioEngine, ScenarioProjection};
