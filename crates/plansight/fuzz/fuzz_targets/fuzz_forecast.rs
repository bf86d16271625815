//! Fuzz target for forecast payload decoding and summarization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plansight::{ForecastResponse, Plansight};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(response) = ForecastResponse::from_json(content) {
            let _ = Plansight::new().summarize_forecast(&response);
        }
    }
});
