//! Scenario engine for multi-scenario cash and revenue projections
//!
//! Each scenario is a named multiplier set over the base assumptions. The
//! engine rescales the starting revenue, the expense level, and the
//! steepness of the revenue curve, then simulates cash depletion month by
//! month. Scenarios never interact; output order matches input order.

use serde::{Deserialize, Serialize};

use crate::error::{check_amount, check_finite, MetricsError};
use crate::metrics::calculator;
use crate::projection::{project_revenue, GrowthModel, ProjectionSeries};

/// Expenses are assumed to grow 2% per month during cash depletion,
/// independent of scenario
pub const MONTHLY_EXPENSE_GROWTH: f64 = 0.02;

/// A named multiplier set applied to the base assumptions
///
/// Scenarios are immutable configuration values, defined once per run and
/// passed by value into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display label
    pub name: String,

    /// Scales the starting revenue and the revenue growth coefficient
    pub revenue_multiplier: f64,

    /// Scales the monthly expense level
    pub expense_multiplier: f64,

    /// Informational only: customer projections run per segment with their
    /// own models, so this multiplier is carried through unapplied
    pub customer_growth_multiplier: f64,

    /// Presentation hint, passed through to the output unmodified
    pub color: String,
}

impl Scenario {
    pub fn new(
        name: &str,
        revenue_multiplier: f64,
        expense_multiplier: f64,
        customer_growth_multiplier: f64,
        color: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            revenue_multiplier,
            expense_multiplier,
            customer_growth_multiplier,
            color: color.to_string(),
        }
    }

    /// Revenue up 20%, expenses down 10%
    pub fn best_case() -> Self {
        Self::new("Best Case", 1.2, 0.9, 1.15, "green")
    }

    /// Base assumptions unchanged
    pub fn normal_case() -> Self {
        Self::new("Normal Case", 1.0, 1.0, 1.10, "blue")
    }

    /// Revenue down 20%, expenses up 10%
    pub fn worst_case() -> Self {
        Self::new("Worst Case", 0.8, 1.1, 1.05, "red")
    }

    fn validate(&self) -> Result<(), MetricsError> {
        check_amount("revenue_multiplier", self.revenue_multiplier)?;
        check_amount("expense_multiplier", self.expense_multiplier)?;
        check_finite("customer_growth_multiplier", self.customer_growth_multiplier)?;
        Ok(())
    }
}

/// Projected trajectories for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: Scenario,

    /// Projected monthly revenue under the scenario's adjusted assumptions
    pub revenue: ProjectionSeries,

    /// Projected cash balance, recorded before each month's burn is applied
    /// (period 0 is the untouched starting cash)
    pub cash: ProjectionSeries,
}

/// Point-in-time burn and runway under one scenario's multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub name: String,
    pub adjusted_revenue: f64,
    pub adjusted_expenses: f64,
    pub burn_rate: f64,
    pub runway_months: f64,
}

/// Re-runs the revenue projection and a cash-depletion simulation for each
/// configured scenario
///
/// # Example
/// ```ignore
/// let engine = ScenarioEngine::default();
/// let projections = engine.project(100_000.0, 10_000.0, 20_000.0, 12, model)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    scenarios: Vec<Scenario>,
}

impl ScenarioEngine {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Project cash and revenue for every scenario, preserving input order
    ///
    /// All scenarios and scalars are validated before the first trajectory
    /// is computed.
    pub fn project(
        &self,
        cash_balance: f64,
        monthly_revenue: f64,
        monthly_expenses: f64,
        months: u32,
        model: GrowthModel,
    ) -> Result<Vec<ScenarioProjection>, MetricsError> {
        check_amount("cash_balance", cash_balance)?;
        check_amount("monthly_revenue", monthly_revenue)?;
        check_amount("monthly_expenses", monthly_expenses)?;
        model.validate()?;
        for scenario in &self.scenarios {
            scenario.validate()?;
        }

        self.scenarios
            .iter()
            .map(|scenario| {
                Self::project_one(
                    scenario,
                    cash_balance,
                    monthly_revenue,
                    monthly_expenses,
                    months,
                    model,
                )
            })
            .collect()
    }

    /// Project a single scenario; trajectories for different scenarios are
    /// fully independent, so callers may evaluate them in parallel
    pub fn project_one(
        scenario: &Scenario,
        cash_balance: f64,
        monthly_revenue: f64,
        monthly_expenses: f64,
        months: u32,
        model: GrowthModel,
    ) -> Result<ScenarioProjection, MetricsError> {
        scenario.validate()?;
        check_amount("cash_balance", cash_balance)?;
        check_amount("monthly_revenue", monthly_revenue)?;
        check_amount("monthly_expenses", monthly_expenses)?;

        let adjusted_revenue = monthly_revenue * scenario.revenue_multiplier;
        let adjusted_expenses = monthly_expenses * scenario.expense_multiplier;

        // The multiplier steepens the curve as well as shifting its start
        let revenue = project_revenue(
            adjusted_revenue,
            months,
            model.scaled(scenario.revenue_multiplier),
        )?;

        let mut cash = ProjectionSeries::with_capacity(months as usize + 1);
        let mut current_cash = cash_balance;

        for point in revenue.points() {
            cash.push(point.period, current_cash);

            let expenses_this_month =
                adjusted_expenses * (1.0 + MONTHLY_EXPENSE_GROWTH).powi(point.period as i32);
            let burn = calculator::burn_rate(point.value, expenses_this_month)?;
            current_cash -= burn;
        }

        Ok(ScenarioProjection {
            scenario: scenario.clone(),
            revenue,
            cash,
        })
    }

    /// Point-in-time burn rate and runway under each scenario's multipliers,
    /// without projecting a trajectory
    pub fn metrics(
        &self,
        cash_balance: f64,
        monthly_revenue: f64,
        monthly_expenses: f64,
    ) -> Result<Vec<ScenarioMetrics>, MetricsError> {
        check_amount("cash_balance", cash_balance)?;
        check_amount("monthly_revenue", monthly_revenue)?;
        check_amount("monthly_expenses", monthly_expenses)?;

        self.scenarios
            .iter()
            .map(|scenario| {
                scenario.validate()?;

                let adjusted_revenue = monthly_revenue * scenario.revenue_multiplier;
                let adjusted_expenses = monthly_expenses * scenario.expense_multiplier;
                let burn_rate = calculator::burn_rate(adjusted_revenue, adjusted_expenses)?;
                let runway_months = calculator::runway(cash_balance, burn_rate)?;

                Ok(ScenarioMetrics {
                    name: scenario.name.clone(),
                    adjusted_revenue,
                    adjusted_expenses,
                    burn_rate,
                    runway_months,
                })
            })
            .collect()
    }
}

impl Default for ScenarioEngine {
    /// The canonical Best/Normal/Worst scenario set
    fn default() -> Self {
        Self::new(vec![
            Scenario::best_case(),
            Scenario::normal_case(),
            Scenario::worst_case(),
        ])
    }
}

/// Straight-line cash trajectory at a constant burn rate
///
/// One point per month from 0 through the truncated runway length; each
/// value is the starting cash less the burn accrued so far.
pub fn project_cash_runway(
    cash_balance: f64,
    monthly_burn: f64,
    runway_months: f64,
) -> Result<ProjectionSeries, MetricsError> {
    check_amount("cash_balance", cash_balance)?;
    check_finite("monthly_burn", monthly_burn)?;
    check_amount("runway_months", runway_months)?;

    let months = runway_months.trunc() as u32;
    let mut series = ProjectionSeries::with_capacity(months as usize + 1);

    for month in 0..=months {
        series.push(month, cash_balance - monthly_burn * month as f64);
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_output_preserves_scenario_order() {
        let engine = ScenarioEngine::default();
        let projections = engine
            .project(100_000.0, 10_000.0, 20_000.0, 12, GrowthModel::Fixed)
            .unwrap();

        let names: Vec<_> = projections
            .iter()
            .map(|p| p.scenario.name.as_str())
            .collect();
        assert_eq!(names, vec!["Best Case", "Normal Case", "Worst Case"]);
    }

    #[test]
    fn test_cash_starts_at_unmodified_balance() {
        let engine = ScenarioEngine::default();
        let projections = engine
            .project(100_000.0, 10_000.0, 20_000.0, 6, GrowthModel::Fixed)
            .unwrap();

        for projection in &projections {
            assert_eq!(projection.cash.value_at(0), Some(100_000.0));
            assert_eq!(projection.cash.len(), 7);
        }
    }

    #[test]
    fn test_multipliers_shift_start_and_expenses() {
        let engine = ScenarioEngine::default();
        let projections = engine
            .project(100_000.0, 10_000.0, 20_000.0, 2, GrowthModel::Fixed)
            .unwrap();

        // Best case: revenue 12_000, expenses 18_000, so month-0 burn is
        // 6_000 and cash at period 1 is 94_000
        let best = &projections[0];
        assert_eq!(best.revenue.value_at(0), Some(12_000.0));
        assert_eq!(best.cash.value_at(1), Some(94_000.0));

        // Normal case: burn 10_000 in month 0
        let normal = &projections[1];
        assert_eq!(normal.cash.value_at(1), Some(90_000.0));
    }

    #[test]
    fn test_expense_growth_compounds_per_month() {
        let engine = ScenarioEngine::new(vec![Scenario::normal_case()]);
        let projections = engine
            .project(100_000.0, 0.0, 10_000.0, 2, GrowthModel::Fixed)
            .unwrap();

        let cash = &projections[0].cash;
        // burn_0 = 10_000, burn_1 = 10_200
        assert_eq!(cash.value_at(1), Some(90_000.0));
        assert_relative_eq!(cash.value_at(2).unwrap(), 79_800.0, max_relative = 1e-12);
    }

    #[test]
    fn test_multiplier_scales_growth_coefficient() {
        let projection = ScenarioEngine::project_one(
            &Scenario::best_case(),
            100_000.0,
            10_000.0,
            20_000.0,
            1,
            GrowthModel::Linear { monthly_pct: 10.0 },
        )
        .unwrap();

        // Initial 12_000 growing at 12% of initial per month
        assert_relative_eq!(
            projection.revenue.value_at(1).unwrap(),
            13_440.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_projection_is_deterministic() {
        let engine = ScenarioEngine::default();
        let model = GrowthModel::Exponential { monthly_pct: 10.0 };
        let a = engine
            .project(100_000.0, 10_000.0, 20_000.0, 24, model)
            .unwrap();
        let b = engine
            .project(100_000.0, 10_000.0, 20_000.0, 24, model)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scenario_metrics() {
        let engine = ScenarioEngine::default();
        let metrics = engine.metrics(100_000.0, 10_000.0, 20_000.0).unwrap();

        assert_eq!(metrics.len(), 3);

        let best = &metrics[0];
        assert_eq!(best.burn_rate, 6_000.0);
        assert_relative_eq!(best.runway_months, 16.6666, max_relative = 1e-4);

        let worst = &metrics[2];
        assert_eq!(worst.burn_rate, 14_000.0);
    }

    #[test]
    fn test_invalid_input_aborts_before_any_trajectory() {
        let engine = ScenarioEngine::default();
        assert!(engine
            .project(f64::NAN, 10_000.0, 20_000.0, 12, GrowthModel::Fixed)
            .is_err());
        assert!(engine
            .project(100_000.0, -1.0, 20_000.0, 12, GrowthModel::Fixed)
            .is_err());
    }

    #[test]
    fn test_project_cash_runway() {
        let series = project_cash_runway(100_000.0, 12_000.0, 8.3333).unwrap();

        assert_eq!(series.len(), 9);
        assert_eq!(series.value_at(0), Some(100_000.0));
        assert_eq!(series.value_at(8), Some(4_000.0));
    }

    #[test]
    fn test_project_cash_runway_zero_months() {
        let series = project_cash_runway(100_000.0, 0.0, 0.0).unwrap();
        assert_eq!(series.values(), vec![100_000.0]);
    }
}
