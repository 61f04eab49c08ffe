//! Startup Metrics CLI
//!
//! Command-line interface for computing snapshot metrics, scenario cash
//! projections, and per-segment customer flows from current-state inputs.

use anyhow::anyhow;
use chrono::{Months, Utc};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use startup_metrics::company::{find_segment, load_segments};
use startup_metrics::projection::project_customer_flow;
use startup_metrics::scenario::project_cash_runway;
use startup_metrics::{
    CompanyFinancials, CustomerSegment, GrowthModel, MetricsSnapshot, ScenarioEngine, SegmentKind,
};

#[derive(Parser, Debug)]
#[command(name = "startup-metrics", version, about = "Startup financial projection engine")]
struct Args {
    /// Current cash balance
    #[arg(long, default_value_t = 100_000.0)]
    cash_balance: f64,

    /// Revenue for the current month
    #[arg(long, default_value_t = 10_000.0)]
    monthly_revenue: f64,

    /// Revenue for the previous month (for MoM growth)
    #[arg(long, default_value_t = 8_000.0)]
    previous_revenue: f64,

    /// Total expenses for the current month
    #[arg(long, default_value_t = 20_000.0)]
    monthly_expenses: f64,

    /// Projection horizon in months
    #[arg(long, default_value_t = 12)]
    months: u32,

    /// Revenue growth model: fixed, linear, or exponential
    #[arg(long, default_value = "fixed")]
    model: String,

    /// Monthly increase as a percentage of initial revenue (linear model)
    #[arg(long, default_value_t = 0.0)]
    linear_pct: f64,

    /// Monthly compounding growth percentage (exponential model)
    #[arg(long, default_value_t = 0.0)]
    exponential_pct: f64,

    /// CSV file with segment snapshots (Segment,Total,New,CAC,ChurnRate)
    #[arg(long)]
    segments: Option<PathBuf>,

    /// Write the scenario trajectories to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let model = GrowthModel::from_parts(&args.model, args.linear_pct, args.exponential_pct)?;

    // Segment snapshots come from the CSV when given, otherwise the
    // reference values
    let (b2b, b2c) = match &args.segments {
        Some(path) => {
            let segments = load_segments(path)
                .map_err(|e| anyhow!("failed to load segments from {}: {}", path.display(), e))?;
            let b2b = find_segment(&segments, SegmentKind::B2B)
                .ok_or_else(|| anyhow!("no B2B segment in {}", path.display()))?;
            let b2c = find_segment(&segments, SegmentKind::B2C)
                .ok_or_else(|| anyhow!("no B2C segment in {}", path.display()))?;
            (b2b, b2c)
        }
        None => (
            CustomerSegment::default_b2b(),
            CustomerSegment::default_b2c(),
        ),
    };

    let financials = CompanyFinancials::new(
        args.cash_balance,
        args.monthly_revenue,
        args.previous_revenue,
        args.monthly_expenses,
    );

    println!("Startup Metrics v0.1.0");
    println!("======================\n");

    // Point-in-time snapshot
    let snapshot = MetricsSnapshot::compute(&financials, &b2b, &b2c)?;
    println!("Snapshot ({} growth model):", model.name());
    for (name, value) in snapshot.entries() {
        println!("  {:<18} {:>14.2}", name, value);
    }
    println!();

    let today = Utc::now();

    // Straight-line runway at the current burn, before any scenario is applied
    if snapshot.burn_rate > 0.0 {
        let runway_path = project_cash_runway(
            financials.cash_balance,
            snapshot.burn_rate,
            snapshot.runway_months,
        )?;
        let zero_month = runway_path.len().saturating_sub(1) as u32;
        let zero_date = (today + Months::new(zero_month)).format("%Y-%m");
        println!(
            "At the current burn, cash lasts {:.1} months (through {})\n",
            snapshot.runway_months, zero_date
        );
    }

    // Per-scenario point-in-time metrics
    let engine = ScenarioEngine::default();
    let scenario_metrics = engine.metrics(
        financials.cash_balance,
        financials.monthly_revenue,
        financials.monthly_expenses,
    )?;

    println!("Scenario Metrics:");
    println!(
        "{:>14} {:>14} {:>14} {:>10}",
        "Scenario", "Revenue", "Burn", "Runway"
    );
    for metrics in &scenario_metrics {
        println!(
            "{:>14} {:>14.2} {:>14.2} {:>10.1}",
            metrics.name, metrics.adjusted_revenue, metrics.burn_rate, metrics.runway_months
        );
    }
    println!();

    // Scenario projections; period indices become calendar labels here
    let projections = engine.project(
        financials.cash_balance,
        financials.monthly_revenue,
        financials.monthly_expenses,
        args.months,
        model,
    )?;

    println!("Scenario Cash Projection ({} months):", args.months);
    print!("{:>5} {:>8}", "Month", "Date");
    for projection in &projections {
        print!(" {:>14}", projection.scenario.name);
    }
    println!();
    println!("{}", "-".repeat(16 + 15 * projections.len()));

    for month in 0..=args.months.min(24) {
        let date = (today + Months::new(month)).format("%Y-%m").to_string();
        print!("{:>5} {:>8}", month, date);
        for projection in &projections {
            print!(" {:>14.2}", projection.cash.value_at(month).unwrap_or(0.0));
        }
        println!();
    }
    if args.months > 24 {
        println!("... ({} more months)", args.months - 24);
    }
    println!();

    // Per-segment customer flow
    for segment in [b2b, b2c] {
        let flow = project_customer_flow(
            segment.total,
            segment.new,
            segment.churn_rate,
            args.months,
            model,
        )?;

        let last = flow.rows().last().map(|r| r.total_customers).unwrap_or(0);
        println!(
            "{} customers: {} now, {} after {} months",
            segment.kind, segment.total, last, args.months
        );
    }

    // Full trajectories to CSV
    if let Some(path) = &args.output {
        let mut file = File::create(path)?;

        write!(file, "Month,Date")?;
        for projection in &projections {
            write!(
                file,
                ",{} Revenue,{} Cash",
                projection.scenario.name, projection.scenario.name
            )?;
        }
        writeln!(file)?;

        for month in 0..=args.months {
            let date = (today + Months::new(month)).format("%Y-%m");
            write!(file, "{},{}", month, date)?;
            for projection in &projections {
                write!(
                    file,
                    ",{:.2},{:.2}",
                    projection.revenue.value_at(month).unwrap_or(0.0),
                    projection.cash.value_at(month).unwrap_or(0.0)
                )?;
            }
            writeln!(file)?;
        }

        println!("\nFull trajectories written to: {}", path.display());
    }

    Ok(())
}
