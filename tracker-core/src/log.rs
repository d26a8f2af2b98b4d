//! Filtering and truncation of a user's exercise log.

use chrono::NaiveDate;

use crate::{
    coerce::parse_int_prefix,
    date::{parse_calendar_date, ExerciseDate},
    exercise::Exercise,
    user::User,
};

/// Parsed log query: optional inclusive date bounds and an entry limit.
///
/// A non-negative limit keeps that many leading entries; a negative limit
/// drops that many trailing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

impl LogQuery {
    /// Builds a query from raw query-string values.
    ///
    /// Bounds that do not parse are dropped. An empty limit is dropped; any
    /// other limit uses integer-prefix parsing, and one with no leading
    /// integer becomes 0.
    #[must_use]
    pub fn from_params(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_calendar_date),
            to: to.and_then(parse_calendar_date),
            limit: limit
                .filter(|text| !text.is_empty())
                .map(|text| parse_int_prefix(text).unwrap_or(0)),
        }
    }

    /// Returns `true` when `date` lies within the bounds.
    ///
    /// Invalid dates compare false against every bound, so they are never
    /// excluded.
    #[must_use]
    pub fn includes(&self, date: &ExerciseDate) -> bool {
        let Some(day) = date.day() else {
            return true;
        };
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }

    /// Applies the bounds, then the limit, preserving input order.
    pub fn apply<'a, I>(&self, exercises: I) -> Vec<&'a Exercise>
    where
        I: IntoIterator<Item = &'a Exercise>,
    {
        let mut kept: Vec<_> = exercises
            .into_iter()
            .filter(|ex| self.includes(&ex.date))
            .collect();
        if let Some(limit) = self.limit {
            kept.truncate(truncated_len(kept.len(), limit));
        }
        kept
    }
}

fn truncated_len(len: usize, limit: i64) -> usize {
    let magnitude = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
    if limit >= 0 {
        len.min(magnitude)
    } else {
        len.saturating_sub(magnitude)
    }
}

/// A user's filtered exercise log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExerciseLog {
    pub user: User,
    pub entries: Vec<Exercise>,
}

impl ExerciseLog {
    /// Number of entries after filtering and truncation.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
