//! Fuzz target: JSON decoding of `AddExerciseBody` followed by validation.
//!
//! Arbitrary payloads must either fail to decode or reach field validation
//! without panicking.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use tracker_core::{ExerciseDraft, ExerciseInput};
use tracker_gateway::routes::{AddExerciseBody, DurationField};

fuzz_target!(|data: &[u8]| {
    let Ok(body) = serde_json::from_slice::<AddExerciseBody>(data) else {
        return;
    };
    let duration = body.duration.as_ref().and_then(DurationField::to_text);
    let input = ExerciseInput {
        description: body.description.as_deref(),
        duration: duration.as_deref(),
        date: body.date.as_deref(),
    };
    let _ = ExerciseDraft::validate(input, NaiveDate::MIN);
});
