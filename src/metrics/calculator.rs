//! Point-in-time scalar metrics: burn rate, runway, growth and LTV ratios
//!
//! Every function validates its arguments and then computes a single scalar.
//! Undefined-ratio cases saturate to sentinel values instead of failing:
//! callers rely on 0 (no burn, no previous revenue, no CAC) and +infinity
//! (zero churn) rather than on error handling.

use crate::error::{check_amount, check_finite, check_rate, MetricsError};

/// Monthly burn rate: expenses minus revenues
///
/// Negative burn means the company is cash-flow positive.
pub fn burn_rate(revenues: f64, expenses: f64) -> Result<f64, MetricsError> {
    check_amount("revenues", revenues)?;
    check_amount("expenses", expenses)?;
    Ok(expenses - revenues)
}

/// Months of operation remaining at the current burn rate
///
/// Zero or negative burn reports 0 by convention: runway is unbounded in
/// that case, and callers render the 0 sentinel as "not burning" rather
/// than as an empty runway. This is a deliberate saturation policy.
pub fn runway(cash_balance: f64, monthly_burn: f64) -> Result<f64, MetricsError> {
    check_amount("cash_balance", cash_balance)?;
    check_finite("monthly_burn", monthly_burn)?;

    if monthly_burn <= 0.0 {
        Ok(0.0)
    } else {
        Ok(cash_balance / monthly_burn)
    }
}

/// Month-over-month revenue growth as a percentage, 0 when there was no
/// previous revenue
pub fn mom_growth(current: f64, previous: f64) -> Result<f64, MetricsError> {
    check_amount("current revenue", current)?;
    check_amount("previous revenue", previous)?;

    if previous == 0.0 {
        Ok(0.0)
    } else {
        Ok((current - previous) / previous * 100.0)
    }
}

/// LTV to CAC ratio, 0 when CAC is 0
///
/// LTV may legitimately be +infinity (propagated from a zero churn rate),
/// so only NaN and negative values are rejected here.
pub fn ltv_cac_ratio(ltv: f64, cac: f64) -> Result<f64, MetricsError> {
    if ltv.is_nan() || ltv < 0.0 {
        return Err(MetricsError::InvalidInput(format!(
            "ltv must be a non-negative number, got {}",
            ltv
        )));
    }
    check_amount("cac", cac)?;

    if cac == 0.0 {
        Ok(0.0)
    } else {
        Ok(ltv / cac)
    }
}

/// Expected customer lifetime in months from a monthly churn percentage
///
/// Zero churn means an unbounded expected lifetime; +infinity is returned
/// and propagates into LTV, so callers must cap it for display themselves.
pub fn lifetime_from_churn(churn_pct: f64) -> Result<f64, MetricsError> {
    check_rate("churn_pct", churn_pct)?;

    if churn_pct > 0.0 {
        Ok(1.0 / (churn_pct / 100.0))
    } else {
        Ok(f64::INFINITY)
    }
}
