//! Flat snapshot of named scalar metrics for one evaluation

use serde::{Deserialize, Serialize};

use super::{calculator, BlendedMetrics};
use crate::company::{CompanyFinancials, CustomerSegment};
use crate::error::MetricsError;

/// All point-in-time metrics computed once per evaluation
///
/// Derived purely from the current-period inputs, independent of any
/// trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub burn_rate: f64,
    pub runway_months: f64,
    pub mom_growth_pct: f64,
    pub arpu: f64,
    pub ltv: f64,
    pub cac: f64,
    pub ltv_cac_ratio: f64,
    pub weighted_churn: f64,
    pub conversion_rate: f64,
}

impl MetricsSnapshot {
    /// Compute the full snapshot from the financial position and the two
    /// segment snapshots
    ///
    /// All inputs are validated up front; no metric is produced if any
    /// input is invalid.
    pub fn compute(
        financials: &CompanyFinancials,
        b2b: &CustomerSegment,
        b2c: &CustomerSegment,
    ) -> Result<Self, MetricsError> {
        financials.validate()?;

        let blended = BlendedMetrics::from_segments(b2b, b2c, financials.monthly_revenue)?;
        let burn_rate =
            calculator::burn_rate(financials.monthly_revenue, financials.monthly_expenses)?;
        let runway_months = calculator::runway(financials.cash_balance, burn_rate)?;
        let mom_growth_pct = calculator::mom_growth(
            financials.monthly_revenue,
            financials.previous_month_revenue,
        )?;

        Ok(Self {
            burn_rate,
            runway_months,
            mom_growth_pct,
            arpu: blended.arpu,
            ltv: blended.ltv,
            cac: blended.weighted_cac,
            ltv_cac_ratio: blended.ltv_cac_ratio,
            weighted_churn: blended.weighted_churn,
            conversion_rate: blended.conversion_rate,
        })
    }

    /// Named (metric, value) pairs in a stable order, for table rendering
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("burn_rate", self.burn_rate),
            ("runway_months", self.runway_months),
            ("mom_growth_pct", self.mom_growth_pct),
            ("arpu", self.arpu),
            ("ltv", self.ltv),
            ("cac", self.cac),
            ("ltv_cac_ratio", self.ltv_cac_ratio),
            ("weighted_churn", self.weighted_churn),
            ("conversion_rate", self.conversion_rate),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> (CompanyFinancials, CustomerSegment, CustomerSegment) {
        (
            CompanyFinancials::new(100_000.0, 10_000.0, 8_000.0, 20_000.0),
            CustomerSegment::default_b2b(),
            CustomerSegment::default_b2c(),
        )
    }

    #[test]
    fn test_snapshot_values() {
        let (financials, b2b, b2c) = inputs();
        let snapshot = MetricsSnapshot::compute(&financials, &b2b, &b2c).unwrap();

        assert_eq!(snapshot.burn_rate, 10_000.0);
        assert_eq!(snapshot.runway_months, 10.0);
        assert_eq!(snapshot.mom_growth_pct, 25.0);
        assert_eq!(snapshot.arpu, 100.0);
        assert_eq!(snapshot.cac, 140.0);
        assert_relative_eq!(snapshot.weighted_churn, 4.4, max_relative = 1e-12);
        assert_eq!(snapshot.conversion_rate, 20.0);
    }

    #[test]
    fn test_entries_cover_every_metric() {
        let (financials, b2b, b2c) = inputs();
        let snapshot = MetricsSnapshot::compute(&financials, &b2b, &b2c).unwrap();

        let entries = snapshot.entries();
        assert_eq!(entries.len(), 9);
        assert!(entries.iter().any(|(name, v)| *name == "runway_months" && *v == 10.0));
    }

    #[test]
    fn test_invalid_financials_abort_snapshot() {
        let (_, b2b, b2c) = inputs();
        let bad = CompanyFinancials::new(-100.0, 10_000.0, 8_000.0, 20_000.0);
        assert!(MetricsSnapshot::compute(&bad, &b2b, &b2c).is_err());
    }
}
