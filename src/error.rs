//! Error types shared by the projection and metrics core
//!
//! Validation happens at the boundary of each public operation; once a
//! computation starts it cannot fail, so no partial trajectory is ever
//! returned. Division-by-zero style cases (zero burn, zero CAC, zero churn)
//! are not errors here: they follow explicit saturation rules at the call
//! sites (0, or +infinity for unbounded lifetime).

use thiserror::Error;

/// Errors raised by the projection and metrics operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// A financial or count argument is non-finite, or negative where
    /// negativity is disallowed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A segment reports more new customers than its total at the starting
    /// period
    #[error("invalid segment state: {new} new customers exceed total of {total}")]
    InvalidSegmentState { new: u64, total: u64 },

    /// An unrecognized growth model name reached a configuration boundary
    #[error("invalid growth model: {0:?} (expected Fixed, Linear, or Exponential)")]
    InvalidModel(String),
}

/// Require a finite value (rejects NaN and infinities)
pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetricsError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

/// Require a finite, non-negative monetary or count value
pub(crate) fn check_amount(name: &str, value: f64) -> Result<(), MetricsError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(MetricsError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Require a percentage rate in [0, 100]
pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), MetricsError> {
    check_finite(name, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(MetricsError::InvalidInput(format!(
            "{} must be between 0 and 100, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount() {
        assert!(check_amount("cash", 0.0).is_ok());
        assert!(check_amount("cash", 125_000.50).is_ok());
        assert!(check_amount("cash", -1.0).is_err());
        assert!(check_amount("cash", f64::NAN).is_err());
        assert!(check_amount("cash", f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_rate_bounds() {
        assert!(check_rate("churn", 0.0).is_ok());
        assert!(check_rate("churn", 100.0).is_ok());
        assert!(check_rate("churn", 100.1).is_err());
        assert!(check_rate("churn", -0.1).is_err());
    }
}
