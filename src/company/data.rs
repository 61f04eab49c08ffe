//! Company input records: financial position and customer segment snapshots

use serde::{Deserialize, Serialize};

use crate::error::{check_amount, check_rate, MetricsError};

/// Customer channel a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Business customers
    B2B,
    /// Consumer customers
    B2C,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::B2B => "B2B",
            SegmentKind::B2C => "B2C",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time snapshot of one customer channel
///
/// Two segments exist per evaluation (B2B and B2C). They are aggregated into
/// blended metrics but their projected trajectories are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    /// Which channel this snapshot describes
    pub kind: SegmentKind,

    /// Current total customer count
    pub total: u64,

    /// Customers newly acquired this period
    pub new: u64,

    /// Acquisition cost per customer
    pub cac: f64,

    /// Monthly churn as a percentage in [0, 100]
    pub churn_rate: f64,
}

impl CustomerSegment {
    pub fn new(kind: SegmentKind, total: u64, new: u64, cac: f64, churn_rate: f64) -> Self {
        Self {
            kind,
            total,
            new,
            cac,
            churn_rate,
        }
    }

    /// Reference B2B segment used by the bins and tests
    pub fn default_b2b() -> Self {
        Self::new(SegmentKind::B2B, 20, 5, 500.0, 2.0)
    }

    /// Reference B2C segment used by the bins and tests
    pub fn default_b2c() -> Self {
        Self::new(SegmentKind::B2C, 80, 15, 50.0, 5.0)
    }

    /// Validate the snapshot before any projection or aggregation runs
    ///
    /// The new-customer count may not exceed the total at the starting
    /// period; CAC must be a non-negative amount and churn a rate in
    /// [0, 100].
    pub fn validate(&self) -> Result<(), MetricsError> {
        check_amount("cac", self.cac)?;
        check_rate("churn_rate", self.churn_rate)?;
        if self.new > self.total {
            return Err(MetricsError::InvalidSegmentState {
                new: self.new,
                total: self.total,
            });
        }
        Ok(())
    }
}

/// Point-in-time financial position of the company
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    /// Cash currently in the bank
    pub cash_balance: f64,

    /// Revenue for the current month
    pub monthly_revenue: f64,

    /// Revenue for the previous month (for MoM growth)
    pub previous_month_revenue: f64,

    /// Total expenses for the current month
    pub monthly_expenses: f64,
}

impl CompanyFinancials {
    pub fn new(
        cash_balance: f64,
        monthly_revenue: f64,
        previous_month_revenue: f64,
        monthly_expenses: f64,
    ) -> Self {
        Self {
            cash_balance,
            monthly_revenue,
            previous_month_revenue,
            monthly_expenses,
        }
    }

    /// All monetary inputs must be finite and non-negative
    pub fn validate(&self) -> Result<(), MetricsError> {
        check_amount("cash_balance", self.cash_balance)?;
        check_amount("monthly_revenue", self.monthly_revenue)?;
        check_amount("previous_month_revenue", self.previous_month_revenue)?;
        check_amount("monthly_expenses", self.monthly_expenses)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_validation() {
        let segment = CustomerSegment::default_b2b();
        assert!(segment.validate().is_ok());

        let too_many_new = CustomerSegment::new(SegmentKind::B2B, 10, 11, 100.0, 2.0);
        assert_eq!(
            too_many_new.validate(),
            Err(MetricsError::InvalidSegmentState { new: 11, total: 10 })
        );

        let bad_churn = CustomerSegment::new(SegmentKind::B2C, 50, 5, 100.0, 101.0);
        assert!(bad_churn.validate().is_err());

        let negative_cac = CustomerSegment::new(SegmentKind::B2C, 50, 5, -1.0, 2.0);
        assert!(negative_cac.validate().is_err());
    }

    #[test]
    fn test_new_equal_to_total_is_valid() {
        let segment = CustomerSegment::new(SegmentKind::B2B, 5, 5, 100.0, 2.0);
        assert!(segment.validate().is_ok());
    }

    #[test]
    fn test_financials_validation() {
        let financials = CompanyFinancials::new(100_000.0, 10_000.0, 8_000.0, 20_000.0);
        assert!(financials.validate().is_ok());

        let negative_cash = CompanyFinancials::new(-1.0, 10_000.0, 8_000.0, 20_000.0);
        assert!(negative_cash.validate().is_err());

        let nan_revenue = CompanyFinancials::new(100_000.0, f64::NAN, 8_000.0, 20_000.0);
        assert!(nan_revenue.validate().is_err());
    }
}
