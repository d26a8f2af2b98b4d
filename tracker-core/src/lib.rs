//! Core types for the exercise tracker.
//!
//! Defines users, exercises, the exercise log query, and the [`Ledger`]
//! that owns all records for the lifetime of the process.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod coerce;
pub mod date;
pub mod error;
pub mod exercise;
pub mod id;
pub mod ledger;
pub mod log;
pub mod user;

pub use date::{ExerciseDate, INVALID_DATE};
pub use error::CoreError;
pub use exercise::{Exercise, ExerciseDraft, ExerciseInput};
pub use id::{ExerciseId, IdSequence, UserId};
pub use ledger::Ledger;
pub use log::{ExerciseLog, LogQuery};
pub use user::User;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_underscore_id() {
        let user = User::new(UserId::new("1"), "fcc_test");
        let json = match serde_json::to_value(&user) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, serde_json::json!({"_id": "1", "username": "fcc_test"}));
    }

    #[test]
    fn core_error_messages_are_client_facing() {
        assert_eq!(
            CoreError::MissingField { message: "Username is required" }.to_string(),
            "Username is required"
        );
        assert_eq!(CoreError::UserNotFound(UserId::new("4")).to_string(), "User not found");
        assert_eq!(
            CoreError::InvalidDuration { value: "x".to_owned() }.to_string(),
            "Duration must be an integer"
        );
    }

    #[test]
    fn only_field_errors_count_as_validation() {
        assert!(CoreError::InvalidDuration { value: String::new() }.is_validation());
        assert!(!CoreError::UserNotFound(UserId::new("1")).is_validation());
    }
}
