use crate::id::UserId;

/// Errors produced by the `tracker-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A required field was absent or empty.
    #[error("{message}")]
    MissingField { message: &'static str },

    /// A duration had no leading integer to coerce.
    #[error("Duration must be an integer")]
    InvalidDuration { value: String },

    /// No user is registered under the given id.
    #[error("User not found")]
    UserNotFound(UserId),
}

impl CoreError {
    /// Returns `true` for errors caused by a missing or malformed field.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidDuration { .. })
    }
}
