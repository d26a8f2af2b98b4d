use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a registered user.
///
/// Ids are the decimal rendering of a per-collection counter, so clients
/// see them as plain strings (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct UserId(pub String);

impl UserId {
    /// Creates a `UserId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifies a recorded exercise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ExerciseId(pub String);

impl ExerciseId {
    /// Creates an `ExerciseId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic counter handing out ids starting at 1.
///
/// Values are never reused; the counter only advances when [`IdSequence::next_value`]
/// is called, so callers draw an id only once a record is known to be valid.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Creates a sequence whose first value is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the current value and advances the counter.
    pub fn next_value(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// Draws the next value as a [`UserId`].
    pub fn next_user_id(&mut self) -> UserId {
        UserId(self.next_value().to_string())
    }

    /// Draws the next value as an [`ExerciseId`].
    pub fn next_exercise_id(&mut self) -> ExerciseId {
        ExerciseId(self.next_value().to_string())
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
