//! Customer flow simulation: new, churned, and total customers per period

use serde::{Deserialize, Serialize};

use super::model::GrowthModel;
use super::series::ProjectionSeries;
use crate::error::{check_rate, MetricsError};

/// One period of simulated customer movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFlowRow {
    /// Period index, 0 being the current state
    pub period: u32,

    /// Customers acquired during this period
    pub new_customers: u64,

    /// Customers lost to churn during this period
    pub churned_customers: u64,

    /// Running total after this period's acquisition and churn
    pub total_customers: u64,
}

/// Per-period customer flow trajectory for a single segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFlowResult {
    rows: Vec<CustomerFlowRow>,
}

impl CustomerFlowResult {
    pub fn rows(&self) -> &[CustomerFlowRow] {
        &self.rows
    }

    pub fn new_per_period(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.new_customers).collect()
    }

    pub fn churned_per_period(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.churned_customers).collect()
    }

    pub fn total_per_period(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.total_customers).collect()
    }

    /// The total-customer trajectory as a plain series, for presentation
    /// alongside revenue and cash curves
    pub fn total_series(&self) -> ProjectionSeries {
        let mut series = ProjectionSeries::with_capacity(self.rows.len());
        for row in &self.rows {
            series.push(row.period, row.total_customers as f64);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// New customers acquired in period `m` under the growth model, truncated to
/// a whole count. Linear grows the acquisition rate by a percentage of the
/// initial rate per month; Exponential compounds it.
fn new_customers_for_period(initial_new: u64, model: GrowthModel, month: u32) -> u64 {
    match model {
        GrowthModel::Fixed => initial_new,
        GrowthModel::Linear { monthly_pct } => {
            (initial_new as f64 * (1.0 + (monthly_pct / 100.0) * month as f64)) as u64
        }
        GrowthModel::Exponential { monthly_pct } => {
            (initial_new as f64 * (1.0 + monthly_pct / 100.0).powi(month as i32)) as u64
        }
    }
}

/// Simulate monthly customer flow for one segment
///
/// Per period, in order: new customers come from the growth model applied to
/// `initial_new`; churn removes a `churn_pct` share of the stock carried over
/// from the previous period (not the incoming cohort); the running total is
/// then updated and clamped at zero. The returned rows record the new count,
/// the churned count, and the *updated* total for each period.
///
/// The running total persists across periods within one call; every call
/// starts fresh from `initial_total`.
pub fn project_customer_flow(
    initial_total: u64,
    initial_new: u64,
    churn_pct: f64,
    months: u32,
    model: GrowthModel,
) -> Result<CustomerFlowResult, MetricsError> {
    check_rate("churn_pct", churn_pct)?;
    model.validate()?;
    if initial_new > initial_total {
        return Err(MetricsError::InvalidSegmentState {
            new: initial_new,
            total: initial_total,
        });
    }

    let mut rows = Vec::with_capacity(months as usize + 1);
    let mut current_total = initial_total;

    for month in 0..=months {
        let new_this_period = new_customers_for_period(initial_new, model, month);

        // Churn applies to the pre-update stock
        let churned_this_period = (current_total as f64 * (churn_pct / 100.0)) as u64;

        current_total = current_total
            .saturating_add(new_this_period)
            .saturating_sub(churned_this_period);

        rows.push(CustomerFlowRow {
            period: month,
            new_customers: new_this_period,
            churned_customers: churned_this_period,
            total_customers: current_total,
        });
    }

    Ok(CustomerFlowResult { rows })
}

/// Total-customer trajectory without the new/churn breakdown
///
/// Fixed and Linear follow the same per-period update rule as
/// [`project_customer_flow`]. The Exponential branch instead recomputes the
/// stock directly as `initial_total * (1 + pct/100)^m` and ignores churn
/// entirely — a deliberate shortcut carried over from the reference
/// implementation, kept under its own name so it is never mistaken for the
/// churn-aware flow simulation. Callers that need churn-aware exponential
/// totals should use [`project_customer_flow`].
pub fn project_customer_total(
    initial_total: u64,
    initial_new: u64,
    churn_pct: f64,
    months: u32,
    model: GrowthModel,
) -> Result<Vec<u64>, MetricsError> {
    check_rate("churn_pct", churn_pct)?;
    model.validate()?;
    if initial_new > initial_total {
        return Err(MetricsError::InvalidSegmentState {
            new: initial_new,
            total: initial_total,
        });
    }

    let mut totals = Vec::with_capacity(months as usize + 1);
    let mut current_total = initial_total;

    for month in 0..=months {
        current_total = match model {
            GrowthModel::Exponential { monthly_pct } => {
                (initial_total as f64 * (1.0 + monthly_pct / 100.0).powi(month as i32)) as u64
            }
            _ => {
                let new_this_period = new_customers_for_period(initial_new, model, month);
                let churned_this_period = (current_total as f64 * (churn_pct / 100.0)) as u64;
                current_total
                    .saturating_add(new_this_period)
                    .saturating_sub(churned_this_period)
            }
        };

        totals.push(current_total);
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_flow_steady_state() {
        // 10% churn on a stock of 100 removes exactly the 10 new arrivals
        let flow = project_customer_flow(100, 10, 10.0, 3, GrowthModel::Fixed).unwrap();

        assert_eq!(flow.len(), 4);
        assert_eq!(flow.new_per_period(), vec![10, 10, 10, 10]);
        assert_eq!(flow.churned_per_period(), vec![10, 10, 10, 10]);
        assert_eq!(flow.total_per_period(), vec![100, 100, 100, 100]);
    }

    #[test]
    fn test_linear_flow_acquisition_grows() {
        let flow =
            project_customer_flow(100, 10, 0.0, 2, GrowthModel::Linear { monthly_pct: 50.0 })
                .unwrap();

        // new = trunc(10 * (1 + 0.5*m)) per month, no churn
        assert_eq!(flow.new_per_period(), vec![10, 15, 20]);
        assert_eq!(flow.total_per_period(), vec![110, 125, 145]);
    }

    #[test]
    fn test_exponential_flow_truncates_new() {
        let flow =
            project_customer_flow(100, 10, 0.0, 2, GrowthModel::Exponential { monthly_pct: 10.0 })
                .unwrap();

        // trunc(10 * 1.1^m): 10, 11, 12 (12.1 truncates)
        assert_eq!(flow.new_per_period(), vec![10, 11, 12]);
    }

    #[test]
    fn test_churn_applies_to_carried_stock() {
        // Churn uses the pre-update total, so period 0 churns 9 of 95 (floor)
        let flow = project_customer_flow(95, 0, 10.0, 0, GrowthModel::Fixed).unwrap();
        let row = flow.rows()[0];
        assert_eq!(row.churned_customers, 9);
        assert_eq!(row.total_customers, 86);
    }

    #[test]
    fn test_total_never_negative() {
        // 100% churn wipes the stock each period; with no acquisition the
        // total clamps at zero and stays there
        let flow = project_customer_flow(10, 0, 100.0, 3, GrowthModel::Fixed).unwrap();
        assert_eq!(flow.total_per_period(), vec![0, 0, 0, 0]);
        assert_eq!(flow.churned_per_period(), vec![10, 0, 0, 0]);
    }

    #[test]
    fn test_new_exceeding_total_rejected() {
        let result = project_customer_flow(5, 6, 2.0, 12, GrowthModel::Fixed);
        assert_eq!(
            result,
            Err(MetricsError::InvalidSegmentState { new: 6, total: 5 })
        );
    }

    #[test]
    fn test_churn_out_of_range_rejected() {
        assert!(project_customer_flow(100, 10, 100.5, 12, GrowthModel::Fixed).is_err());
        assert!(project_customer_flow(100, 10, -1.0, 12, GrowthModel::Fixed).is_err());
    }

    #[test]
    fn test_flow_is_deterministic() {
        let model = GrowthModel::Exponential { monthly_pct: 5.0 };
        let a = project_customer_flow(80, 15, 5.0, 24, model).unwrap();
        let b = project_customer_flow(80, 15, 5.0, 24, model).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_variant_matches_flow_for_fixed_and_linear() {
        for model in [GrowthModel::Fixed, GrowthModel::Linear { monthly_pct: 25.0 }] {
            let flow = project_customer_flow(80, 15, 5.0, 12, model).unwrap();
            let totals = project_customer_total(80, 15, 5.0, 12, model).unwrap();
            assert_eq!(flow.total_per_period(), totals);
        }
    }

    #[test]
    fn test_total_variant_exponential_ignores_churn() {
        // The exponential shortcut recomputes from the initial stock and
        // applies no churn, regardless of the churn argument
        let totals = project_customer_total(
            100,
            50,
            100.0,
            2,
            GrowthModel::Exponential { monthly_pct: 10.0 },
        )
        .unwrap();
        assert_eq!(totals, vec![100, 110, 121]);
    }

    #[test]
    fn test_total_series_view() {
        let flow = project_customer_flow(100, 10, 10.0, 2, GrowthModel::Fixed).unwrap();
        let series = flow.total_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.value_at(0), Some(100.0));
    }
}
