//! Blended customer metrics across the two segments
//!
//! Aggregation is a plain weighted sum over segment totals; no segment gets
//! special treatment. The blended churn feeds the expected-lifetime formula,
//! which in turn drives LTV and the LTV/CAC ratio.

use serde::{Deserialize, Serialize};

use super::calculator;
use crate::company::CustomerSegment;
use crate::error::{check_amount, MetricsError};

/// Weighted aggregation of two customer segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedMetrics {
    /// Combined customer count across both segments
    pub total_customers: u64,

    /// Combined new-customer count across both segments
    pub new_customers: u64,

    /// CAC weighted by segment totals, 0 when there are no customers
    pub weighted_cac: f64,

    /// Churn percentage weighted by segment totals, 0 when there are no
    /// customers
    pub weighted_churn: f64,

    /// Expected customer lifetime in months from the weighted churn;
    /// +infinity when blended churn is 0
    pub avg_lifetime_months: f64,

    /// Average revenue per customer per month
    pub arpu: f64,

    /// Lifetime value: ARPU times expected lifetime
    pub ltv: f64,

    /// LTV over weighted CAC, 0 when CAC is 0
    pub ltv_cac_ratio: f64,

    /// New customers as a percentage of the combined total
    pub conversion_rate: f64,
}

impl BlendedMetrics {
    /// Aggregate two segment snapshots against the current monthly revenue
    ///
    /// Both segments are validated first; nothing is computed if either is
    /// in an invalid state.
    pub fn from_segments(
        a: &CustomerSegment,
        b: &CustomerSegment,
        monthly_revenue: f64,
    ) -> Result<Self, MetricsError> {
        a.validate()?;
        b.validate()?;
        check_amount("monthly_revenue", monthly_revenue)?;

        let total_customers = a.total + b.total;
        let new_customers = a.new + b.new;

        let (weighted_cac, weighted_churn, arpu, conversion_rate) = if total_customers == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let total = total_customers as f64;
            (
                (a.cac * a.total as f64 + b.cac * b.total as f64) / total,
                (a.churn_rate * a.total as f64 + b.churn_rate * b.total as f64) / total,
                monthly_revenue / total,
                new_customers as f64 / total * 100.0,
            )
        };

        let avg_lifetime_months = calculator::lifetime_from_churn(weighted_churn)?;

        // 0 * infinity is indeterminate; a customer base producing no revenue
        // has zero lifetime value even when churn is zero
        let ltv = if arpu == 0.0 {
            0.0
        } else {
            arpu * avg_lifetime_months
        };

        let ltv_cac_ratio = calculator::ltv_cac_ratio(ltv, weighted_cac)?;

        Ok(Self {
            total_customers,
            new_customers,
            weighted_cac,
            weighted_churn,
            avg_lifetime_months,
            arpu,
            ltv,
            ltv_cac_ratio,
            conversion_rate,
        })
    }
}
