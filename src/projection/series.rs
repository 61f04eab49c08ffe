//! Trajectory output structures for projections

use serde::{Deserialize, Serialize};

/// A single (period, value) observation in a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Period index, 0 being the current state
    pub period: u32,
    pub value: f64,
}

/// An ordered trajectory indexed by period
///
/// A series always has `horizon + 1` points with period indices running
/// 0..=horizon. It is produced fresh by every projector call and is not
/// mutable from outside the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    points: Vec<SeriesPoint>,
}

impl ProjectionSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, period: u32, value: f64) {
        self.points.push(SeriesPoint { period, value });
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Values in period order, without the indices
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn value_at(&self, period: u32) -> Option<f64> {
        self.points.get(period as usize).map(|p| p.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
