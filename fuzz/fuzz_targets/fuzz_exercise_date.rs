//! Fuzz target: `ExerciseDate` parsing and rendering.
//!
//! Parsing arbitrary text must never panic, and a parsed day in the
//! four-digit year range must parse back to itself from its rendering.

#![no_main]

use chrono::Datelike;
use libfuzzer_sys::fuzz_target;
use tracker_core::ExerciseDate;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let date = ExerciseDate::parse(text);
    let rendered = date.to_string();

    if let Some(day) = date.day() {
        if (0..=9999).contains(&day.year()) {
            assert_eq!(ExerciseDate::parse(&rendered), date, "rendering must parse back");
        }
    }
});
