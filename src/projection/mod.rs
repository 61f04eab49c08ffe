//! Trajectory projection: revenue and customer flow over a monthly horizon

mod customers;
mod model;
mod revenue;
mod series;

pub use customers::{
    project_customer_flow, project_customer_total, CustomerFlowResult, CustomerFlowRow,
};
pub use model::GrowthModel;
pub use revenue::project_revenue;
pub use series::{ProjectionSeries, SeriesPoint};
