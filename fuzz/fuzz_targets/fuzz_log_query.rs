//! Fuzz target: `LogQuery` construction from raw query values.
//!
//! Splits the input into `from`, `to` and `limit` on NUL bytes. Building the
//! query must never panic, and an invalid exercise date must pass any bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tracker_core::{ExerciseDate, LogQuery};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = text.split('\0');
    let (from, to, limit) = (parts.next(), parts.next(), parts.next());

    let query = LogQuery::from_params(from, to, limit);
    assert!(query.includes(&ExerciseDate::Invalid), "invalid dates are never filtered");
    assert!(query.apply(std::iter::empty()).is_empty());
});
