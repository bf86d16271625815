//! Fuzz target for the data parser and preview pipeline.
//!
//! Checks that parsing, classification and sales defaults inference never
//! panic on malformed input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plansight::dataset::DatasetType;
use plansight::Plansight;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() {
            let plansight = Plansight::new();
            // Forcing sales also exercises defaults inference on arbitrary columns
            let _ = plansight.preview_file(temp_file.path(), Some(DatasetType::Sales));
            let _ = plansight.preview_file(temp_file.path(), None);
        }
    }
});
