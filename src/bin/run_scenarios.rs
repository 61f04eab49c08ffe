//! Run the full scenario set and write monthly trajectories to CSV
//!
//! Outputs per-scenario revenue and cash paths for comparison in a spreadsheet

use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use startup_metrics::company::{find_segment, load_segments};
use startup_metrics::projection::project_customer_flow;
use startup_metrics::{CustomerSegment, GrowthModel, ScenarioEngine, ScenarioProjection, SegmentKind};

const CASH_BALANCE: f64 = 100_000.0;
const MONTHLY_REVENUE: f64 = 10_000.0;
const MONTHLY_EXPENSES: f64 = 20_000.0;
const PROJECTION_MONTHS: u32 = 36;

fn main() {
    env_logger::init();

    let start = Instant::now();

    // Segment snapshots from segments.csv when present, reference values
    // otherwise
    let (b2b, b2c) = match load_segments("segments.csv") {
        Ok(segments) => {
            println!("Loaded {} segments from segments.csv", segments.len());
            (
                find_segment(&segments, SegmentKind::B2B)
                    .unwrap_or_else(CustomerSegment::default_b2b),
                find_segment(&segments, SegmentKind::B2C)
                    .unwrap_or_else(CustomerSegment::default_b2c),
            )
        }
        Err(_) => (
            CustomerSegment::default_b2b(),
            CustomerSegment::default_b2c(),
        ),
    };

    let engine = ScenarioEngine::default();
    let model = GrowthModel::Exponential { monthly_pct: 10.0 };

    println!(
        "Projecting {} scenarios over {} months...",
        engine.scenarios().len(),
        PROJECTION_MONTHS
    );

    // Scenario trajectories are independent; evaluate them in parallel
    let projections: Vec<ScenarioProjection> = engine
        .scenarios()
        .par_iter()
        .map(|scenario| {
            ScenarioEngine::project_one(
                scenario,
                CASH_BALANCE,
                MONTHLY_REVENUE,
                MONTHLY_EXPENSES,
                PROJECTION_MONTHS,
                model,
            )
            .expect("scenario projection failed")
        })
        .collect();

    println!("Projection complete in {:?}", start.elapsed());

    // Write all trajectories to CSV
    let csv_path = "scenario_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");

    write!(file, "Month").unwrap();
    for projection in &projections {
        write!(
            file,
            ",{} Revenue,{} Cash",
            projection.scenario.name, projection.scenario.name
        )
        .unwrap();
    }
    writeln!(file).unwrap();

    for month in 0..=PROJECTION_MONTHS {
        write!(file, "{}", month).unwrap();
        for projection in &projections {
            write!(
                file,
                ",{:.2},{:.2}",
                projection.revenue.value_at(month).unwrap_or(0.0),
                projection.cash.value_at(month).unwrap_or(0.0)
            )
            .unwrap();
        }
        writeln!(file).unwrap();
    }

    println!("Full results written to: {}", csv_path);

    // Summary: terminal cash and first depleted month per scenario
    println!("\nSummary:");
    for projection in &projections {
        let final_cash = projection.cash.last_value().unwrap_or(0.0);
        let depleted = projection
            .cash
            .points()
            .iter()
            .find(|p| p.value < 0.0)
            .map(|p| p.period);

        match depleted {
            Some(month) => println!(
                "  {:<12} final cash ${:>14.2}, depleted at month {}",
                projection.scenario.name, final_cash, month
            ),
            None => println!(
                "  {:<12} final cash ${:>14.2}, never depleted",
                projection.scenario.name, final_cash
            ),
        }
    }

    // Customer flow per segment under the same growth model
    println!("\nCustomer flow ({} months):", PROJECTION_MONTHS);
    for segment in [b2b, b2c] {
        let flow = project_customer_flow(
            segment.total,
            segment.new,
            segment.churn_rate,
            PROJECTION_MONTHS,
            model,
        )
        .expect("customer flow projection failed");

        let total_new: u64 = flow.new_per_period().iter().sum();
        let total_churned: u64 = flow.churned_per_period().iter().sum();
        let final_total = flow.rows().last().map(|r| r.total_customers).unwrap_or(0);

        println!(
            "  {:<4} {:>6} -> {:>8}  (+{} new, -{} churned)",
            segment.kind.as_str(),
            segment.total,
            final_total,
            total_new,
            total_churned
        );
    }
}
