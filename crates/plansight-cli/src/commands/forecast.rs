//! Forecast command - aggregate a forecast result into tables and bounds.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use plansight::dates::parse_date;
use plansight::forecast::{BandBounds, SkuAccuracy};
use plansight::{ForecastResponse, Plansight, PlansightConfig};

use super::{fmt_opt, PLACEHOLDER};

/// Display bounds with headroom: 90% of the minimum (never below zero) and
/// 110% of the maximum, rounded outwards.
pub fn padded_axis(bounds: BandBounds) -> (f64, f64) {
    ((bounds.min * 0.9).floor().max(0.0), (bounds.max * 1.1).ceil())
}

pub fn run(
    file: PathBuf,
    top: usize,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let response = ForecastResponse::from_json(&text)?;

    let plansight = Plansight::with_config(PlansightConfig {
        risk_top_n: top,
        ..PlansightConfig::default()
    });
    let report = plansight.summarize_forecast(&response);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = &report.summary;
    println!(
        "{} {} ({} {})",
        "Forecast".cyan().bold(),
        report.forecast_id.white(),
        report.model_name,
        report.model_version.dimmed()
    );
    println!();

    if summary.volume.is_empty() {
        println!("{}", "No data available".dimmed());
        return Ok(());
    }

    println!("{}", "Volume:".yellow().bold());
    println!("  Total forecast: {:.1}", summary.volume.total_volume);
    println!("  SKUs:           {}", summary.volume.unique_skus);
    match horizon_days(summary.by_date.iter().map(|d| d.date.as_str())) {
        Some(days) => println!("  Horizon:        {} days", days),
        None => println!("  Horizon:        {}", PLACEHOLDER),
    }
    println!();

    println!("{}", "By date:".yellow().bold());
    println!("  {:<12} {:>12} {:>12} {:>12}", "date", "mean", "q10", "q90");
    for d in &summary.by_date {
        println!("  {:<12} {:>12.2} {:>12.2} {:>12.2}", d.date, d.mean, d.q10, d.q90);
    }
    let (axis_min, axis_max) = padded_axis(summary.bounds);
    println!(
        "  Band: {:.2} to {:.2} (axis {} to {})",
        summary.bounds.min, summary.bounds.max, axis_min, axis_max
    );
    println!();

    println!("{}", format!("Top {} risk SKUs:", summary.top_risk.len()).yellow().bold());
    for (rank, total) in summary.top_risk.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>12.2}",
            rank + 1,
            total.sku.white(),
            total.total_mean
        );
    }
    println!();

    println!("{}", "Accuracy:".yellow().bold());
    if report.accuracy.is_empty() {
        println!("  {}", "No per-SKU model data".dimmed());
    } else {
        println!(
            "  {:<20} {:<10} {:<10} {:>10} {:>10}",
            "sku", "chosen", "best", "MAPE", "MAE"
        );
        for (sku, accuracy) in &report.accuracy {
            print_accuracy_row(sku, accuracy);
        }
    }

    Ok(())
}

fn print_accuracy_row(sku: &str, accuracy: &SkuAccuracy) {
    let chosen = if accuracy.chosen_model.is_baseline() {
        "baseline".dimmed().to_string()
    } else {
        accuracy.chosen_model.to_string()
    };
    let best = accuracy.best_prefix.unwrap_or(PLACEHOLDER);
    let best = if accuracy.chosen_matches_best() {
        best.green().to_string()
    } else {
        best.to_string()
    };
    println!(
        "  {:<20} {:<10} {:<10} {:>10} {:>10}",
        sku,
        chosen,
        best,
        fmt_opt(accuracy.mape, 3),
        fmt_opt(accuracy.mae, 2)
    );
}

/// Inclusive day span between the first and last parsable dates.
fn horizon_days<'a>(dates: impl Iterator<Item = &'a str>) -> Option<i64> {
    let parsed: Vec<NaiveDate> = dates.filter_map(parse_date).collect();
    let first = parsed.iter().min()?;
    let last = parsed.iter().max()?;
    Some((*last - *first).num_days() + 1)
}
