//! AWS Lambda handler for computing startup metrics projections
//!
//! Accepts the current-state inputs as JSON and returns the metrics
//! snapshot, per-scenario cash and revenue trajectories, and per-segment
//! customer flows.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use startup_metrics::projection::{project_customer_flow, CustomerFlowResult};
use startup_metrics::{
    CompanyFinancials, CustomerSegment, GrowthModel, MetricsSnapshot, ScenarioEngine,
    ScenarioProjection, SegmentKind,
};

/// Input configuration for an evaluation
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Current cash balance (default: 100,000)
    #[serde(default = "default_cash_balance")]
    pub cash_balance: f64,

    /// Revenue for the current month (default: 10,000)
    #[serde(default = "default_monthly_revenue")]
    pub monthly_revenue: f64,

    /// Revenue for the previous month (default: 8,000)
    #[serde(default = "default_previous_revenue")]
    pub previous_month_revenue: f64,

    /// Expenses for the current month (default: 20,000)
    #[serde(default = "default_monthly_expenses")]
    pub monthly_expenses: f64,

    /// Number of months to project (default: 12)
    #[serde(default = "default_projection_months")]
    pub projection_months: u32,

    /// Growth model name: Fixed, Linear, or Exponential (default: Fixed)
    #[serde(default = "default_growth_model")]
    pub growth_model: String,

    /// Monthly increase as a percentage of initial revenue (Linear)
    #[serde(default)]
    pub linear_pct: f64,

    /// Monthly compounding growth percentage (Exponential)
    #[serde(default)]
    pub exponential_pct: f64,

    /// B2B segment snapshot (defaults to the reference values)
    #[serde(default)]
    pub b2b: Option<SegmentRequest>,

    /// B2C segment snapshot (defaults to the reference values)
    #[serde(default)]
    pub b2c: Option<SegmentRequest>,
}

fn default_cash_balance() -> f64 {
    100_000.0
}
fn default_monthly_revenue() -> f64 {
    10_000.0
}
fn default_previous_revenue() -> f64 {
    8_000.0
}
fn default_monthly_expenses() -> f64 {
    20_000.0
}
fn default_projection_months() -> u32 {
    12
}
fn default_growth_model() -> String {
    "Fixed".to_string()
}

/// Segment snapshot as it arrives on the wire
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub total: u64,
    pub new: u64,
    pub cac: f64,
    pub churn_rate: f64,
}

impl SegmentRequest {
    fn to_segment(&self, kind: SegmentKind) -> CustomerSegment {
        CustomerSegment::new(kind, self.total, self.new, self.cac, self.churn_rate)
    }
}

/// Output from an evaluation
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub snapshot: MetricsSnapshot,
    pub scenarios: Vec<ScenarioProjection>,
    pub b2b_flow: CustomerFlowResult,
    pub b2c_flow: CustomerFlowResult,
    pub projection_months: u32,
    pub execution_time_ms: u64,
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers
}

fn error_response(status: i64, message: &str) -> ApiGatewayV2httpResponse {
    ApiGatewayV2httpResponse {
        status_code: status,
        headers: json_headers(),
        body: Some(Body::Text(format!(r#"{{"error":"{}"}}"#, message))),
        ..Default::default()
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let start = std::time::Instant::now();

    let body_str = event.payload.body.unwrap_or_else(|| "{}".to_string());

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let model = match GrowthModel::from_parts(
        &request.growth_model,
        request.linear_pct,
        request.exponential_pct,
    ) {
        Ok(m) => m,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let b2b = request
        .b2b
        .as_ref()
        .map(|s| s.to_segment(SegmentKind::B2B))
        .unwrap_or_else(CustomerSegment::default_b2b);
    let b2c = request
        .b2c
        .as_ref()
        .map(|s| s.to_segment(SegmentKind::B2C))
        .unwrap_or_else(CustomerSegment::default_b2c);

    let financials = CompanyFinancials::new(
        request.cash_balance,
        request.monthly_revenue,
        request.previous_month_revenue,
        request.monthly_expenses,
    );

    let snapshot = match MetricsSnapshot::compute(&financials, &b2b, &b2c) {
        Ok(s) => s,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    // Scenario trajectories are independent; evaluate them in parallel
    let engine = ScenarioEngine::default();
    let scenario_results: Result<Vec<ScenarioProjection>, _> = engine
        .scenarios()
        .par_iter()
        .map(|scenario| {
            ScenarioEngine::project_one(
                scenario,
                financials.cash_balance,
                financials.monthly_revenue,
                financials.monthly_expenses,
                request.projection_months,
                model,
            )
        })
        .collect();

    let scenarios = match scenario_results {
        Ok(s) => s,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let b2b_flow = match project_customer_flow(
        b2b.total,
        b2b.new,
        b2b.churn_rate,
        request.projection_months,
        model,
    ) {
        Ok(f) => f,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let b2c_flow = match project_customer_flow(
        b2c.total,
        b2c.new,
        b2c.churn_rate,
        request.projection_months,
        model,
    ) {
        Ok(f) => f,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let response = ProjectionResponse {
        snapshot,
        scenarios,
        b2b_flow,
        b2c_flow,
        projection_months: request.projection_months,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ApiGatewayV2httpResponse {
        status_code: 200,
        headers: json_headers(),
        body: Some(Body::Text(serde_json::to_string(&response)?)),
        ..Default::default()
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
