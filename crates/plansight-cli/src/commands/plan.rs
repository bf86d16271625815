//! Plan command - plan KPIs, scenario deltas and global forecast drivers.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use plansight::plan::{
    importance_series, plan_overview, scenario_kpi_rows, ImportanceBar, PlanOverview,
    ScenarioKpiRow,
};
use plansight::{ExplainResponse, PlanResponse, ScenarioResponse};
use serde::Serialize;

use super::fmt_opt;

/// Widest bar in the importance chart, in characters.
const BAR_WIDTH: usize = 30;

#[derive(Serialize)]
struct PlanOutput {
    plan: PlanOverview,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<Vec<ScenarioKpiRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drivers: Option<Vec<ImportanceBar>>,
}

pub fn run(
    file: PathBuf,
    scenario: Option<PathBuf>,
    explain: Option<PathBuf>,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = PlanResponse::from_json(&read(&file)?)?;
    let scenario = match scenario {
        Some(path) => Some(ScenarioResponse::from_json(&read(&path)?)?),
        None => None,
    };
    let explain = match explain {
        Some(path) => Some(ExplainResponse::from_json(&read(&path)?)?),
        None => None,
    };

    if let Some(scenario) = &scenario {
        if scenario.plan_id.as_deref().is_some_and(|id| id != plan.plan_id) {
            tracing::warn!(
                plan_id = %plan.plan_id,
                scenario_plan_id = ?scenario.plan_id,
                "scenario was run against a different plan"
            );
        }
    }

    let output = PlanOutput {
        plan: plan_overview(&plan),
        scenario: scenario.as_ref().map(scenario_kpi_rows),
        drivers: explain.as_ref().map(importance_series),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_plan(&output.plan);
    if let Some(rows) = &output.scenario {
        let title = scenario
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Scenario");
        print_scenario(title, rows);
    }
    if let Some(bars) = &output.drivers {
        print_drivers(bars);
    }

    Ok(())
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))
}

fn print_plan(overview: &PlanOverview) {
    println!(
        "{} {} (forecast {})",
        "Plan".cyan().bold(),
        overview.plan_id.white(),
        overview.forecast_id.dimmed()
    );
    println!();

    println!("{}", "KPIs:".yellow().bold());
    if overview.kpis.is_empty() {
        println!("  {}", "No KPIs reported".dimmed());
    }
    for kpi in &overview.kpis {
        println!(
            "  {:<24} {:>12.2} {}",
            kpi.name,
            kpi.value,
            kpi.unit.as_deref().unwrap_or("")
        );
    }
    println!();

    println!("{}", "Recommendations:".yellow().bold());
    println!(
        "  Orders:     {} ({:.1} units)",
        overview.order_count, overview.order_volume
    );
    println!(
        "  Production: {} ({:.1} units)",
        overview.production_count, overview.production_volume
    );
}

fn print_scenario(title: &str, rows: &[ScenarioKpiRow]) {
    println!();
    println!("{}", format!("{}:", title).yellow().bold());
    println!(
        "  {:<24} {:>12} {:>12} {:>12} {:>10}",
        "kpi", "base", "scenario", "delta", "delta %"
    );
    for row in rows {
        let pct = fmt_opt(row.delta_percent, 1);
        let pct = match row.delta_percent {
            Some(p) if p > 0.0 => pct.green().to_string(),
            Some(p) if p < 0.0 => pct.red().to_string(),
            _ => pct,
        };
        println!(
            "  {:<24} {:>12.2} {:>12.2} {:>12.2} {:>10}",
            row.name, row.base, row.scenario, row.delta, pct
        );
    }
}

fn print_drivers(bars: &[ImportanceBar]) {
    println!();
    println!("{}", "Global drivers:".yellow().bold());
    let widest = bars
        .iter()
        .map(|b| b.importance.abs())
        .fold(0.0_f64, f64::max);
    for bar in bars {
        println!(
            "  {:<24} {:>8.3} {}",
            bar.feature,
            bar.importance,
            "#".repeat(bar_len(bar.importance, widest)).blue()
        );
    }
}

/// Bar length scaled so the largest magnitude fills `BAR_WIDTH`.
fn bar_len(importance: f64, widest: f64) -> usize {
    if widest <= 0.0 || !importance.is_finite() {
        return 0;
    }
    ((importance.abs() / widest) * BAR_WIDTH as f64).round() as usize
}
