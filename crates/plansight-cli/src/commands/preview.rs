//! Preview command - classify a dataset file and show its sample.

use std::path::PathBuf;

use colored::Colorize;
use plansight::dataset::{score_columns, type_label};
use plansight::{DatasetType, Plansight, PlansightConfig};
use serde_json::Value;

use super::PLACEHOLDER;

pub fn run(
    file: PathBuf,
    dataset_type: Option<DatasetType>,
    limit: usize,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let plansight = Plansight::with_config(PlansightConfig {
        preview_limit: limit,
        ..PlansightConfig::default()
    });
    let outcome = plansight.preview_file(&file, dataset_type)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let preview = &outcome.preview;
    println!(
        "{} {}",
        "Dataset preview for".cyan().bold(),
        outcome.source.file.white()
    );
    println!(
        "  {} rows x {} columns ({})",
        preview.rows.to_string().white().bold(),
        preview.columns.len(),
        outcome.source.format
    );
    println!();

    println!("{}", "Classification:".yellow().bold());
    println!("  From file name: {}", type_label(outcome.filename_guess));
    println!("  From columns:   {}", type_label(outcome.column_guess));
    let source = if dataset_type.is_some() { " (explicit)" } else { "" };
    println!(
        "  Dataset type:   {}{}",
        outcome.dataset_type().to_string().green().bold(),
        source
    );

    if verbose {
        for score in score_columns(&preview.columns).iter().filter(|s| s.score > 0) {
            println!(
                "    {:<18} {} [{}]",
                score.dataset_type.as_str(),
                score.score,
                score.matched.join(", ")
            );
        }
    }
    println!();

    if let Some(schema) = &preview.schema {
        println!("{}", "Columns:".yellow().bold());
        for column in schema {
            println!(
                "  {:<24} {:<10} {}",
                column.name,
                format!("{:?}", column.dtype).to_lowercase(),
                format!("{:?}", column.role).to_lowercase().dimmed()
            );
        }
        println!();
    }

    if preview.warnings().is_empty() {
        println!("{}", "No warnings".green());
    } else {
        println!("{}", "Warnings:".yellow().bold());
        for warning in preview.warnings() {
            println!("  {} {}", "!".yellow(), warning);
        }
    }
    println!();

    if preview.has_sample() {
        println!("{}", "Sample:".yellow().bold());
        println!("  {}", preview.columns.join("\t").bold());
        for row in &preview.preview {
            let cells: Vec<String> = preview
                .columns
                .iter()
                .map(|c| row.get(c).map(render_cell).unwrap_or_default())
                .collect();
            println!("  {}", cells.join("\t"));
        }
        println!();
    }

    if let Some(defaults) = &outcome.sales_defaults {
        println!("{}", "Sales defaults:".yellow().bold());
        println!(
            "  Date column: {}",
            defaults.date_column.as_deref().unwrap_or(PLACEHOLDER)
        );
        println!(
            "  SKU column:  {}",
            defaults.sku_column.as_deref().unwrap_or(PLACEHOLDER)
        );
        println!(
            "  SKUs:        {}",
            defaults.sku_input().unwrap_or_else(|| PLACEHOLDER.to_string())
        );
        match &defaults.date_range {
            Some(range) => println!("  Date range:  {} to {}", range.start_str(), range.end_str()),
            None => println!("  Date range:  {}", PLACEHOLDER),
        }
        println!("  Location:    all locations");
    }

    Ok(())
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
