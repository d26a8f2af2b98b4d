use chrono::NaiveDate;

use crate::{
    coerce::parse_int_prefix,
    date::ExerciseDate,
    error::CoreError,
    id::{ExerciseId, UserId},
};

const DESCRIPTION_AND_DURATION_REQUIRED: &str = "Description and duration are required";

/// An exercise recorded against a user.
///
/// Exercise records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Exercise {
    /// Server-assigned id.
    pub id: ExerciseId,
    /// The user this exercise belongs to.
    pub user_id: UserId,
    /// Free-text description.
    pub description: String,
    /// Duration in minutes.
    pub duration: i64,
    /// Day the exercise took place.
    pub date: ExerciseDate,
}

/// Raw, not yet validated exercise fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseInput<'a> {
    pub description: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub date: Option<&'a str>,
}

/// Validated exercise fields, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExerciseDraft {
    pub description: String,
    pub duration: i64,
    pub date: ExerciseDate,
}

impl ExerciseDraft {
    /// Validates raw input.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if the description or duration is
    /// absent or blank, and [`CoreError::InvalidDuration`] if the duration has
    /// no leading integer.
    pub fn validate(input: ExerciseInput<'_>, today: NaiveDate) -> Result<Self, CoreError> {
        let description = non_blank(input.description).ok_or(CoreError::MissingField {
            message: DESCRIPTION_AND_DURATION_REQUIRED,
        })?;
        let duration_text = non_blank(input.duration).ok_or(CoreError::MissingField {
            message: DESCRIPTION_AND_DURATION_REQUIRED,
        })?;
        let duration = parse_int_prefix(duration_text).ok_or_else(|| {
            CoreError::InvalidDuration { value: duration_text.to_owned() }
        })?;

        Ok(Self {
            description: description.to_owned(),
            duration,
            date: ExerciseDate::from_input(input.date, today),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
