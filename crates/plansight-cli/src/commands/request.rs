//! Request command - build a forecast request from a sales file.

use std::path::PathBuf;

use plansight::forecast::ChosenModel;
use plansight::planning::{Granularity, LocationFilter, PlanningInputs};
use plansight::{DatasetType, Plansight};
use tracing::info;

pub fn run(
    file: PathBuf,
    granularity: Granularity,
    model: Option<String>,
    location: Option<String>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let plansight = Plansight::new();
    let outcome = plansight.preview_file(&file, None)?;

    if outcome.dataset_type() != DatasetType::Sales {
        return Err(format!(
            "{} looks like {} data, not sales; forecast requests need a sales file",
            outcome.source.file,
            outcome.dataset_type()
        )
        .into());
    }

    let mut inputs = PlanningInputs {
        granularity,
        ..PlanningInputs::default()
    };
    if let Some(defaults) = &outcome.sales_defaults {
        inputs.adopt_sales_defaults(defaults);
    }
    // explicit flags win over inferred defaults
    if let Some(location) = location {
        inputs.location = LocationFilter::from_input(&location);
    }

    let forced_model = model.as_deref().map(ChosenModel::from);
    let request = inputs.to_request(forced_model)?;
    info!(skus = request.sku_list.len(), "forecast request ready");

    println!("{}", request.to_json_pretty()?);
    Ok(())
}
