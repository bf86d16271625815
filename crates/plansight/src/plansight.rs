//! Main Plansight struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::dataset::{
    classify_by_columns, classify_by_filename, DatasetPreview, DatasetType,
    DEFAULT_PREVIEW_LIMIT,
};
use crate::error::{PlansightError, Result};
use crate::forecast::{
    aggregate_with_top_n, best_metrics_per_sku, ForecastResponse, ForecastSummary, MetricsMap,
    SkuAccuracy, DEFAULT_RISK_TOP_N,
};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::planning::{infer_sales_defaults, SalesDefaults, DEFAULT_MAX_SKUS};

/// Configuration for Plansight.
#[derive(Debug, Clone)]
pub struct PlansightConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Sample rows carried by a preview.
    pub preview_limit: usize,
    /// Length of the top-risk SKU ranking.
    pub risk_top_n: usize,
    /// Cap on SKUs selected from sales defaults.
    pub max_default_skus: usize,
}

impl Default for PlansightConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            risk_top_n: DEFAULT_RISK_TOP_N,
            max_default_skus: DEFAULT_MAX_SKUS,
        }
    }
}

/// Result of previewing a dataset file.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Initial guess from the file name alone.
    pub filename_guess: Option<DatasetType>,
    /// Classification from the column names.
    pub column_guess: Option<DatasetType>,
    /// Preview under the resolved dataset type.
    pub preview: DatasetPreview,
    /// Planning defaults, when the dataset is sales.
    pub sales_defaults: Option<SalesDefaults>,
}

impl PreviewOutcome {
    /// The dataset type the preview was built under.
    pub fn dataset_type(&self) -> DatasetType {
        self.preview.dataset_type
    }
}

/// Summary of a forecast result.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub forecast_id: String,
    pub model_name: String,
    pub model_version: String,
    pub summary: ForecastSummary,
    /// Best available accuracy per SKU; empty without any chosen-model data.
    pub accuracy: IndexMap<String, SkuAccuracy>,
}

/// The main Plansight engine.
pub struct Plansight {
    config: PlansightConfig,
    parser: Parser,
}

impl Plansight {
    /// Create a new Plansight instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(PlansightConfig::default())
    }

    /// Create a Plansight instance with custom configuration.
    pub fn with_config(config: PlansightConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Current configuration.
    pub fn config(&self) -> &PlansightConfig {
        &self.config
    }

    /// Parse a dataset file, classify it and build its preview.
    ///
    /// The dataset type is taken from `explicit` when given, else from the
    /// columns, else from the file name.
    pub fn preview_file(
        &self,
        path: impl AsRef<Path>,
        explicit: Option<DatasetType>,
    ) -> Result<PreviewOutcome> {
        let (table, source) = self.parser.parse_file(path)?;
        let filename_guess = classify_by_filename(&source.file);
        let (column_guess, preview, sales_defaults) =
            self.preview_table(&table, explicit, filename_guess, &source.file)?;

        info!(
            file = %source.file,
            dataset_type = %preview.dataset_type,
            rows = preview.rows,
            warnings = preview.warnings().len(),
            "dataset preview built"
        );

        Ok(PreviewOutcome {
            source,
            filename_guess,
            column_guess,
            preview,
            sales_defaults,
        })
    }

    /// Preview delimited text already held in memory.
    pub fn preview_str(
        &self,
        name: &str,
        text: &str,
        explicit: Option<DatasetType>,
    ) -> Result<DatasetPreview> {
        let table = self.parser.parse_str(text)?;
        let filename_guess = classify_by_filename(name);
        let (_, preview, _) = self.preview_table(&table, explicit, filename_guess, name)?;
        Ok(preview)
    }

    fn preview_table(
        &self,
        table: &DataTable,
        explicit: Option<DatasetType>,
        filename_guess: Option<DatasetType>,
        name: &str,
    ) -> Result<(Option<DatasetType>, DatasetPreview, Option<SalesDefaults>)> {
        let column_guess = classify_by_columns(&table.headers);
        let dataset_type = explicit
            .or(column_guess)
            .or(filename_guess)
            .ok_or_else(|| PlansightError::UnresolvedDatasetType(name.to_string()))?;

        let preview = DatasetPreview::from_table(dataset_type, table, self.config.preview_limit);
        let sales_defaults = infer_sales_defaults(&preview, self.config.max_default_skus);
        Ok((column_guess, preview, sales_defaults))
    }

    /// Aggregate a forecast result and reconcile its per-SKU accuracy.
    ///
    /// SKUs and their chosen models come from `metadata.per_sku_model`, or from
    /// the `"{sku}.chosen_model"` metric codes when the metadata has none.
    pub fn summarize_forecast(&self, response: &ForecastResponse) -> ForecastReport {
        let summary = aggregate_with_top_n(&response.points, self.config.risk_top_n);
        let empty = MetricsMap::new();
        let metrics = response.metrics.as_ref().unwrap_or(&empty);
        let accuracy = match &response.metadata.per_sku_model {
            Some(per_sku) => best_metrics_per_sku(per_sku, metrics),
            None => best_metrics_per_sku(&metrics.chosen_models(), metrics),
        };

        info!(
            forecast_id = %response.forecast_id,
            points = response.points.len(),
            skus = summary.volume.unique_skus,
            "forecast summarized"
        );

        ForecastReport {
            forecast_id: response.forecast_id.clone(),
            model_name: response.metadata.model_name.clone(),
            model_version: response.metadata.model_version.clone(),
            summary,
            accuracy,
        }
    }
}

impl Default for Plansight {
    fn default() -> Self {
        Self::new()
    }
}
