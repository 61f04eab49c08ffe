//! Revenue trajectory projection under a selected growth model

use super::model::GrowthModel;
use super::series::ProjectionSeries;
use crate::error::{check_amount, MetricsError};

/// Project monthly revenue over a horizon
///
/// Returns `months + 1` points, period 0 carrying the initial value.
/// Fixed holds the initial revenue constant. Linear adds a constant
/// `pct`% of the *initial* revenue each month (no compounding).
/// Exponential compounds by `pct`% per month. Every value is floored at
/// zero, since revenue cannot go negative.
pub fn project_revenue(
    initial_revenue: f64,
    months: u32,
    model: GrowthModel,
) -> Result<ProjectionSeries, MetricsError> {
    check_amount("initial_revenue", initial_revenue)?;
    model.validate()?;

    let mut series = ProjectionSeries::with_capacity(months as usize + 1);

    for month in 0..=months {
        let revenue = match model {
            GrowthModel::Fixed => initial_revenue,
            GrowthModel::Linear { monthly_pct } => {
                let monthly_increase = initial_revenue * (monthly_pct / 100.0);
                initial_revenue + monthly_increase * month as f64
            }
            GrowthModel::Exponential { monthly_pct } => {
                initial_revenue * (1.0 + monthly_pct / 100.0).powi(month as i32)
            }
        };

        series.push(month, revenue.max(0.0));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_repeats_initial_value() {
        let series = project_revenue(10_000.0, 6, GrowthModel::Fixed).unwrap();
        assert_eq!(series.len(), 7);
        assert!(series.values().iter().all(|&v| v == 10_000.0));
    }

    #[test]
    fn test_linear_does_not_compound() {
        let series =
            project_revenue(10_000.0, 3, GrowthModel::Linear { monthly_pct: 10.0 }).unwrap();
        assert_eq!(series.values(), vec![10_000.0, 11_000.0, 12_000.0, 13_000.0]);
    }

    #[test]
    fn test_exponential_compounds() {
        let series =
            project_revenue(10_000.0, 3, GrowthModel::Exponential { monthly_pct: 10.0 }).unwrap();

        for (month, point) in series.points().iter().enumerate() {
            assert_relative_eq!(
                point.value,
                10_000.0 * 1.10_f64.powi(month as i32),
                max_relative = 1e-12
            );
        }

        // Strictly increasing for a positive rate
        let values = series.values();
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_zero_months_yields_single_point() {
        let series = project_revenue(5_000.0, 0, GrowthModel::Fixed).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.value_at(0), Some(5_000.0));
    }

    #[test]
    fn test_declining_revenue_floors_at_zero() {
        let series =
            project_revenue(1_000.0, 24, GrowthModel::Linear { monthly_pct: -10.0 }).unwrap();
        // After 10 months the linear decline crosses zero and stays clamped
        assert_eq!(series.value_at(10), Some(0.0));
        assert!(series.values().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_period_indices_start_at_zero() {
        let series = project_revenue(10_000.0, 5, GrowthModel::Fixed).unwrap();
        for (i, point) in series.points().iter().enumerate() {
            assert_eq!(point.period, i as u32);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let model = GrowthModel::Exponential { monthly_pct: 7.3 };
        let a = project_revenue(12_345.67, 36, model).unwrap();
        let b = project_revenue(12_345.67, 36, model).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_initial_revenue_rejected() {
        assert!(project_revenue(-1.0, 12, GrowthModel::Fixed).is_err());
        assert!(project_revenue(f64::NAN, 12, GrowthModel::Fixed).is_err());
    }
}
