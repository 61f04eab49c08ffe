//! Growth model selection shared by revenue and customer projections

use serde::{Deserialize, Serialize};

use crate::error::{check_finite, MetricsError};

/// How a projected quantity changes month over month
///
/// The per-month coefficient travels with the variant, so a model value is
/// self-contained and a single `match` dispatches the whole trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrowthModel {
    /// Constant at the initial value
    Fixed,
    /// Cumulative fixed increase each month: initial + (initial * pct/100) * m.
    /// The increase is a percentage of the *initial* value, so it never
    /// compounds.
    Linear { monthly_pct: f64 },
    /// Compounding growth: initial * (1 + pct/100)^m
    Exponential { monthly_pct: f64 },
}

impl GrowthModel {
    /// Build a model from a name and its coefficients, as they arrive at a
    /// string-typed boundary (CLI flags, JSON requests, CSV cells)
    ///
    /// Only the coefficient matching the named model is used; the other is
    /// ignored. An unrecognized name is a configuration defect.
    pub fn from_parts(
        name: &str,
        linear_pct: f64,
        exponential_pct: f64,
    ) -> Result<Self, MetricsError> {
        check_finite("linear_pct", linear_pct)?;
        check_finite("exponential_pct", exponential_pct)?;

        match name {
            "Fixed" | "fixed" => Ok(GrowthModel::Fixed),
            "Linear" | "linear" => Ok(GrowthModel::Linear {
                monthly_pct: linear_pct,
            }),
            "Exponential" | "exponential" => Ok(GrowthModel::Exponential {
                monthly_pct: exponential_pct,
            }),
            other => Err(MetricsError::InvalidModel(other.to_string())),
        }
    }

    /// Display name of the model
    pub fn name(&self) -> &'static str {
        match self {
            GrowthModel::Fixed => "Fixed",
            GrowthModel::Linear { .. } => "Linear",
            GrowthModel::Exponential { .. } => "Exponential",
        }
    }

    /// Scale the growth coefficient by a factor, leaving Fixed unchanged
    ///
    /// Scenario evaluation uses this so a multiplier steepens (or flattens)
    /// the curve as well as shifting its starting value.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            GrowthModel::Fixed => GrowthModel::Fixed,
            GrowthModel::Linear { monthly_pct } => GrowthModel::Linear {
                monthly_pct: monthly_pct * factor,
            },
            GrowthModel::Exponential { monthly_pct } => GrowthModel::Exponential {
                monthly_pct: monthly_pct * factor,
            },
        }
    }

    /// Boundary check shared by the projectors: the coefficient must be finite
    pub(crate) fn validate(&self) -> Result<(), MetricsError> {
        match self {
            GrowthModel::Fixed => Ok(()),
            GrowthModel::Linear { monthly_pct } => check_finite("linear_pct", *monthly_pct),
            GrowthModel::Exponential { monthly_pct } => {
                check_finite("exponential_pct", *monthly_pct)
            }
        }
    }
}
