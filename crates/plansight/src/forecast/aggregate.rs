//! Forecast aggregation into chart- and table-ready summaries.
//!
//! Everything here is recomputed from the point list on every call. Grouping
//! uses insertion-ordered maps; the orderings callers rely on (dates ascending,
//! SKU totals descending) are produced by explicit sorts afterwards.

use std::cmp::Ordering;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::types::ForecastPoint;
use crate::dates::{format_date, parse_date};

/// Number of SKUs in the "top risk" ranking.
pub const DEFAULT_RISK_TOP_N: usize = 5;

/// Axis bounds used when there is nothing to plot.
pub const EMPTY_BOUNDS: BandBounds = BandBounds { min: 0.0, max: 1.0 };

/// Summed forecast volume for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuTotal {
    pub sku: String,
    pub total_mean: f64,
}

/// Forecast summed across all SKUs for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAggregate {
    pub date: String,
    pub mean: f64,
    pub q10: f64,
    pub q90: f64,
}

/// Raw vertical extent of the forecast band, before any display padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandBounds {
    pub min: f64,
    pub max: f64,
}

/// Headline volume figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeSummary {
    pub total_volume: f64,
    pub unique_skus: usize,
}

impl VolumeSummary {
    /// True when there were no points; render a placeholder instead of zeros.
    pub fn is_empty(&self) -> bool {
        self.unique_skus == 0
    }
}

/// Parallel series for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Dates, ascending; every other vector is aligned to it.
    pub dates: Vec<String>,
    pub mean: Vec<f64>,
    pub q10: Vec<f64>,
    pub q90: Vec<f64>,
    /// Per-SKU mean by date (averaged when a SKU repeats a date), `None` where absent.
    pub per_sku: IndexMap<String, Vec<Option<f64>>>,
}

/// Everything the forecast views need, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    /// All SKUs by summed mean, descending.
    pub by_sku: Vec<SkuTotal>,
    /// Leading entries of `by_sku`.
    pub top_risk: Vec<SkuTotal>,
    pub by_date: Vec<DateAggregate>,
    pub chart: ChartSeries,
    pub bounds: BandBounds,
    pub volume: VolumeSummary,
}

/// Aggregate with the default top-risk size.
pub fn aggregate(points: &[ForecastPoint]) -> ForecastSummary {
    aggregate_with_top_n(points, DEFAULT_RISK_TOP_N)
}

/// Aggregate, keeping `top_n` SKUs in the risk ranking.
pub fn aggregate_with_top_n(points: &[ForecastPoint], top_n: usize) -> ForecastSummary {
    let by_sku = sku_totals(points);
    let top_risk = by_sku.iter().take(top_n).cloned().collect();
    let by_date = date_aggregates(points);
    let chart = chart_series(points, &by_date);
    let bounds = band_bounds(&by_date);
    let volume = volume_summary(points);

    ForecastSummary {
        by_sku,
        top_risk,
        by_date,
        chart,
        bounds,
        volume,
    }
}

/// Sum `mean` per SKU and rank descending. Equal totals keep first-seen order.
pub fn sku_totals(points: &[ForecastPoint]) -> Vec<SkuTotal> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for point in points {
        *totals.entry(point.sku.as_str()).or_insert(0.0) += point.mean;
    }

    let mut ranked: Vec<SkuTotal> = totals
        .into_iter()
        .map(|(sku, total_mean)| SkuTotal {
            sku: sku.to_string(),
            total_mean,
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.total_mean.total_cmp(&a.total_mean));
    ranked
}

/// Top `n` SKUs by summed mean.
pub fn top_risk(points: &[ForecastPoint], n: usize) -> Vec<SkuTotal> {
    let mut ranked = sku_totals(points);
    ranked.truncate(n);
    ranked
}

/// Grouping key for a forecast date: the calendar date when it parses, the raw
/// text otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DateKey<'a> {
    Parsed(NaiveDate),
    Raw(&'a str),
}

impl<'a> DateKey<'a> {
    fn of(date: &'a str) -> Self {
        parse_date(date).map_or(DateKey::Raw(date), DateKey::Parsed)
    }

    /// `YYYY-MM-DD` for calendar dates, the raw text otherwise.
    fn label(&self) -> String {
        match self {
            DateKey::Parsed(date) => format_date(*date),
            DateKey::Raw(raw) => raw.to_string(),
        }
    }

    /// Calendar order; raw keys sort last and compare equal among themselves.
    fn chronological(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DateKey::Parsed(a), DateKey::Parsed(b)) => a.cmp(b),
            (DateKey::Parsed(_), DateKey::Raw(_)) => Ordering::Less,
            (DateKey::Raw(_), DateKey::Parsed(_)) => Ordering::Greater,
            (DateKey::Raw(_), DateKey::Raw(_)) => Ordering::Equal,
        }
    }
}

/// Sum `mean`, `q10` and `q90` per calendar date, ordered by date.
///
/// Spellings of the same day (`2025-01-01`, `2025-01-01T00:00:00`) share one
/// bucket labelled `YYYY-MM-DD`. Values that do not parse are grouped by their
/// raw text and sort after all parsable ones, in first-seen order.
pub fn date_aggregates(points: &[ForecastPoint]) -> Vec<DateAggregate> {
    let mut by_date: IndexMap<DateKey<'_>, DateAggregate> = IndexMap::new();
    for point in points {
        let key = DateKey::of(&point.date);
        let entry = by_date.entry(key).or_insert_with(|| DateAggregate {
            date: key.label(),
            mean: 0.0,
            q10: 0.0,
            q90: 0.0,
        });
        entry.mean += point.mean;
        entry.q10 += point.q10;
        entry.q90 += point.q90;
    }

    let mut keyed: Vec<(DateKey<'_>, DateAggregate)> = by_date.into_iter().collect();
    keyed.sort_by(|(a, _), (b, _)| a.chronological(b));
    keyed.into_iter().map(|(_, agg)| agg).collect()
}

/// Highest of `q90`/`mean` and lowest of `q10`/`mean` across dates.
pub fn band_bounds(by_date: &[DateAggregate]) -> BandBounds {
    if by_date.is_empty() {
        return EMPTY_BOUNDS;
    }

    let max = by_date
        .iter()
        .map(|d| d.q90.max(d.mean))
        .fold(f64::NEG_INFINITY, f64::max);
    let min = by_date
        .iter()
        .map(|d| d.q10.min(d.mean))
        .fold(f64::INFINITY, f64::min);

    // all-NaN input leaves the folds at their seeds
    BandBounds {
        min: if min.is_finite() { min } else { EMPTY_BOUNDS.min },
        max: if max.is_finite() { max } else { EMPTY_BOUNDS.max },
    }
}

/// Total forecast volume and distinct SKU count.
pub fn volume_summary(points: &[ForecastPoint]) -> VolumeSummary {
    let total_volume = points.iter().map(|p| p.mean).sum();
    let mut skus: Vec<&str> = points.iter().map(|p| p.sku.as_str()).collect();
    skus.sort_unstable();
    skus.dedup();

    VolumeSummary {
        total_volume,
        unique_skus: skus.len(),
    }
}

/// Build chart series aligned to `by_date`.
pub fn chart_series(points: &[ForecastPoint], by_date: &[DateAggregate]) -> ChartSeries {
    let date_index: IndexMap<DateKey<'_>, usize> = by_date
        .iter()
        .enumerate()
        .map(|(idx, d)| (DateKey::of(&d.date), idx))
        .collect();

    // (sum, count) per sku per date slot
    let mut cells: IndexMap<&str, Vec<(f64, usize)>> = IndexMap::new();
    for point in points {
        let Some(&slot) = date_index.get(&DateKey::of(&point.date)) else {
            continue;
        };
        let row = cells
            .entry(point.sku.as_str())
            .or_insert_with(|| vec![(0.0, 0); by_date.len()]);
        row[slot].0 += point.mean;
        row[slot].1 += 1;
    }

    let per_sku = cells
        .into_iter()
        .map(|(sku, row)| {
            let values = row
                .into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect();
            (sku.to_string(), values)
        })
        .collect();

    ChartSeries {
        dates: by_date.iter().map(|d| d.date.clone()).collect(),
        mean: by_date.iter().map(|d| d.mean).collect(),
        q10: by_date.iter().map(|d| d.q10).collect(),
        q90: by_date.iter().map(|d| d.q90).collect(),
        per_sku,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(sku: &str, date: &str, mean: f64, q10: f64, q90: f64) -> ForecastPoint {
        ForecastPoint {
            sku: sku.to_string(),
            date: date.to_string(),
            mean,
            q10,
            q50: mean,
            q90,
        }
    }

    fn sample() -> Vec<ForecastPoint> {
        vec![
            point("A", "2025-01-01", 10.0, 8.0, 12.0),
            point("B", "2025-01-01", 5.0, 4.0, 6.0),
            point("A", "2025-01-02", 20.0, 15.0, 25.0),
        ]
    }

    #[test]
    fn test_by_date_example() {
        let by_date = date_aggregates(&sample());
        assert_eq!(
            by_date,
            vec![
                DateAggregate { date: "2025-01-01".into(), mean: 15.0, q10: 12.0, q90: 18.0 },
                DateAggregate { date: "2025-01-02".into(), mean: 20.0, q10: 15.0, q90: 25.0 },
            ]
        );
    }

    #[test]
    fn test_by_sku_example() {
        let ranked = sku_totals(&sample());
        assert_eq!(ranked[0], SkuTotal { sku: "A".into(), total_mean: 30.0 });
        assert_eq!(ranked[1], SkuTotal { sku: "B".into(), total_mean: 5.0 });
    }

    #[test]
    fn test_dates_sorted_chronologically_not_lexically() {
        let points = vec![
            point("A", "12/01/2024", 1.0, 1.0, 1.0),
            point("A", "2024-02-01", 2.0, 2.0, 2.0),
            point("A", "not a date", 3.0, 3.0, 3.0),
            point("A", "2024-11-15", 4.0, 4.0, 4.0),
        ];
        let dates: Vec<String> = date_aggregates(&points).into_iter().map(|d| d.date).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-11-15", "2024-12-01", "not a date"]);
    }

    #[test]
    fn test_same_day_spellings_share_a_bucket() {
        let points = vec![
            point("A", "2025-01-01", 10.0, 8.0, 12.0),
            point("A", "2025-01-01T00:00:00", 4.0, 3.0, 5.0),
            point("B", "01/01/2025", 1.0, 1.0, 1.0),
            point("B", "2025-01-02", 2.0, 2.0, 2.0),
        ];
        let summary = aggregate(&points);
        assert_eq!(
            summary.by_date,
            vec![
                DateAggregate { date: "2025-01-01".into(), mean: 15.0, q10: 12.0, q90: 18.0 },
                DateAggregate { date: "2025-01-02".into(), mean: 2.0, q10: 2.0, q90: 2.0 },
            ]
        );
        assert_eq!(summary.chart.dates, vec!["2025-01-01", "2025-01-02"]);
        assert_eq!(summary.chart.per_sku["A"], vec![Some(7.0), None]);
        assert_eq!(summary.chart.per_sku["B"], vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_unparsable_dates_keep_their_own_buckets() {
        let points = vec![
            point("A", "later", 1.0, 1.0, 1.0),
            point("A", "soon", 2.0, 2.0, 2.0),
            point("A", "later", 3.0, 3.0, 3.0),
        ];
        let by_date = date_aggregates(&points);
        let labels: Vec<&str> = by_date.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(labels, vec!["later", "soon"]);
        assert_eq!(by_date[0].mean, 4.0);
        assert_eq!(aggregate(&points).chart.dates, vec!["later", "soon"]);
    }

    #[test]
    fn test_top_risk_is_capped_and_stable() {
        let points: Vec<ForecastPoint> = ["S1", "S2", "S3", "S4", "S5", "S6", "S7"]
            .iter()
            .enumerate()
            .map(|(i, sku)| point(sku, "2025-01-01", if i < 2 { 50.0 } else { i as f64 }, 0.0, 0.0))
            .collect();
        let top = top_risk(&points, DEFAULT_RISK_TOP_N);
        let skus: Vec<&str> = top.iter().map(|t| t.sku.as_str()).collect();
        // S1 and S2 tie at 50 and keep first-seen order
        assert_eq!(skus, vec!["S1", "S2", "S7", "S6", "S5"]);
    }

    #[test]
    fn test_bounds() {
        let summary = aggregate(&sample());
        assert_eq!(summary.bounds, BandBounds { min: 12.0, max: 25.0 });
    }

    #[test]
    fn test_bounds_tolerate_inverted_quantiles() {
        let points = vec![point("A", "2025-01-01", 10.0, 14.0, 7.0)];
        let bounds = band_bounds(&date_aggregates(&points));
        assert_eq!(bounds, BandBounds { min: 10.0, max: 10.0 });
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&[]);
        assert!(summary.by_sku.is_empty());
        assert!(summary.top_risk.is_empty());
        assert!(summary.by_date.is_empty());
        assert!(summary.chart.dates.is_empty());
        assert_eq!(summary.bounds, BandBounds { min: 0.0, max: 1.0 });
        assert_eq!(summary.volume.total_volume, 0.0);
        assert!(summary.volume.is_empty());
    }

    #[test]
    fn test_volume_summary() {
        let volume = volume_summary(&sample());
        assert_eq!(volume.total_volume, 35.0);
        assert_eq!(volume.unique_skus, 2);
    }

    #[test]
    fn test_chart_pivot() {
        let summary = aggregate(&sample());
        assert_eq!(summary.chart.dates, vec!["2025-01-01", "2025-01-02"]);
        assert_eq!(summary.chart.mean, vec![15.0, 20.0]);
        assert_eq!(summary.chart.per_sku["A"], vec![Some(10.0), Some(20.0)]);
        assert_eq!(summary.chart.per_sku["B"], vec![Some(5.0), None]);
    }

    #[test]
    fn test_chart_pivot_averages_repeated_dates() {
        let points = vec![
            point("A", "2025-01-01", 10.0, 0.0, 0.0),
            point("A", "2025-01-01", 20.0, 0.0, 0.0),
        ];
        let summary = aggregate(&points);
        assert_eq!(summary.chart.per_sku["A"], vec![Some(15.0)]);
        assert_eq!(summary.by_date[0].mean, 30.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let points = sample();
        assert_eq!(aggregate(&points), aggregate(&points));
    }
}
