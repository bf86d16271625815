//! Fuzz target for date parsing and date-ordered aggregation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plansight::dates::parse_date;
use plansight::forecast::{aggregate, ForecastPoint};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_date(content);

        let points: Vec<ForecastPoint> = content
            .split('\n')
            .enumerate()
            .map(|(i, date)| ForecastPoint {
                sku: format!("S{}", i % 3),
                date: date.to_string(),
                mean: i as f64,
                q10: 0.0,
                q50: i as f64,
                q90: 2.0 * i as f64,
            })
            .collect();
        let _ = aggregate(&points);
    }
});
