//! Calendar dates attached to exercises and log bounds.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Text reported for a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Render format for valid days, e.g. `Mon Jan 02 2023`.
const DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Formats tried in order when parsing a bare calendar date.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    DISPLAY_FORMAT,
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// The date of an exercise.
///
/// Unparseable input is kept as [`ExerciseDate::Invalid`] rather than
/// rejected, and renders as `Invalid Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseDate {
    /// A calendar day.
    Day(NaiveDate),
    /// Input that did not name a calendar day.
    Invalid,
}

impl ExerciseDate {
    /// Parses user input, falling back to [`ExerciseDate::Invalid`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parse_calendar_date(input).map_or(Self::Invalid, Self::Day)
    }

    /// Resolves an optional input: absent or blank means `today`.
    #[must_use]
    pub fn from_input(input: Option<&str>, today: NaiveDate) -> Self {
        match input.map(str::trim) {
            Some(text) if !text.is_empty() => Self::parse(text),
            _ => Self::Day(today),
        }
    }

    /// Returns the calendar day, or `None` for an invalid date.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(day) => Some(*day),
            Self::Invalid => None,
        }
    }

    /// Returns `true` when the date did not parse.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format(DISPLAY_FORMAT)),
            Self::Invalid => f.write_str(INVALID_DATE),
        }
    }
}

impl From<NaiveDate> for ExerciseDate {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl Serialize for ExerciseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses the calendar day named by `input`.
///
/// Accepts ISO dates (`2023-01-15`, `2023-01`), slash forms, English month
/// names, the display format produced by [`ExerciseDate`], and timestamps
/// (RFC 3339 or `YYYY-MM-DDTHH:MM:SS`), whose date part is kept.
#[must_use]
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(day) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(day);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts.date());
    }

    // Year-month only: first of the month.
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        match NaiveDate::from_ymd_opt(y, m, d) {
            Some(day) => day,
            None => panic!("invalid test date {y}-{m}-{d}"),
        }
    }

    #[test]
    fn iso_date_displays_with_weekday_and_padded_day() {
        let date = ExerciseDate::parse("2023-01-02");
        assert_eq!(date, ExerciseDate::Day(day(2023, 1, 2)));
        assert_eq!(date.to_string(), "Mon Jan 02 2023");
    }

    #[test]
    fn display_format_parses_back_to_same_day() {
        let original = ExerciseDate::Day(day(2024, 2, 29));
        assert_eq!(ExerciseDate::parse(&original.to_string()), original);
    }

    #[test]
    fn accepted_formats_resolve_to_expected_day() {
        let expected = Some(day(2023, 3, 7));
        for input in [
            "2023-03-07",
            "2023/03/07",
            "03/07/2023",
            "Mar 07, 2023",
            "March 7, 2023",
            "7 March 2023",
            "Tue Mar 07 2023",
            "2023-03-07T18:30:00Z",
            "2023-03-07T18:30:00",
            "  2023-03-07  ",
        ] {
            assert_eq!(parse_calendar_date(input), expected, "input {input:?}");
        }
        assert_eq!(parse_calendar_date("2023-03"), Some(day(2023, 3, 1)));
    }

    #[test]
    fn garbage_becomes_invalid_date_text() {
        let date = ExerciseDate::parse("not a date");
        assert!(date.is_invalid());
        assert_eq!(date.day(), None);
        assert_eq!(date.to_string(), INVALID_DATE);
        assert!(ExerciseDate::parse("2023-02-30").is_invalid());
    }

    #[test]
    fn missing_or_blank_input_defaults_to_today() {
        let today = day(2025, 6, 1);
        assert_eq!(ExerciseDate::from_input(None, today), ExerciseDate::Day(today));
        assert_eq!(ExerciseDate::from_input(Some("   "), today), ExerciseDate::Day(today));
        assert_eq!(
            ExerciseDate::from_input(Some("2020-01-01"), today),
            ExerciseDate::Day(day(2020, 1, 1))
        );
    }

    #[test]
    fn serializes_as_display_string() {
        let json = match serde_json::to_string(&ExerciseDate::Invalid) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"Invalid Date\"");
    }
}
