//! The in-memory store of users and exercises.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    error::CoreError,
    exercise::{Exercise, ExerciseDraft, ExerciseInput},
    id::{IdSequence, UserId},
    log::{ExerciseLog, LogQuery},
    user::User,
};

/// Owns every user and exercise for the lifetime of the process.
///
/// Users are kept in insertion order and keyed by id; exercises are an
/// append-only list. Each collection draws ids from its own counter, and a
/// counter only advances once a record has passed validation.
#[derive(Debug, Default)]
pub struct Ledger {
    users: IndexMap<UserId, User>,
    exercises: Vec<Exercise>,
    user_ids: IdSequence,
    exercise_ids: IdSequence,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if `username` is absent or blank.
    pub fn create_user(&mut self, username: Option<&str>) -> Result<User, CoreError> {
        let username = username
            .filter(|name| !name.trim().is_empty())
            .ok_or(CoreError::MissingField { message: "Username is required" })?;

        let user = User::new(self.user_ids.next_user_id(), username);
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// All users in creation order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Look up a user by id.
    ///
    /// # Errors
    /// Returns [`CoreError::UserNotFound`] if no user has this id.
    pub fn user(&self, id: &UserId) -> Result<&User, CoreError> {
        self.users
            .get(id)
            .ok_or_else(|| CoreError::UserNotFound(id.clone()))
    }

    /// Record an exercise for `user_id`, returning the owner and the new record.
    ///
    /// The user is resolved before the fields are validated, so an unknown
    /// user is reported even when the input is also incomplete.
    ///
    /// # Errors
    /// Returns [`CoreError::UserNotFound`] for an unknown user, or a
    /// validation error from [`ExerciseDraft::validate`].
    pub fn add_exercise(
        &mut self,
        user_id: &UserId,
        input: ExerciseInput<'_>,
        today: NaiveDate,
    ) -> Result<(User, Exercise), CoreError> {
        let user = self.user(user_id)?.clone();
        let draft = ExerciseDraft::validate(input, today)?;

        let exercise = Exercise {
            id: self.exercise_ids.next_exercise_id(),
            user_id: user.id.clone(),
            description: draft.description,
            duration: draft.duration,
            date: draft.date,
        };
        self.exercises.push(exercise.clone());
        Ok((user, exercise))
    }

    /// Total number of recorded exercises across all users.
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Build the filtered log for `user_id`.
    ///
    /// # Errors
    /// Returns [`CoreError::UserNotFound`] if no user has this id.
    pub fn exercise_log(&self, user_id: &UserId, query: &LogQuery) -> Result<ExerciseLog, CoreError> {
        let user = self.user(user_id)?.clone();
        let entries = query
            .apply(self.exercises.iter().filter(|ex| ex.user_id == user.id))
            .into_iter()
            .cloned()
            .collect();
        Ok(ExerciseLog { user, entries })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::date::ExerciseDate;

    fn today() -> NaiveDate {
        match NaiveDate::from_ymd_opt(2023, 6, 1) {
            Some(d) => d,
            None => panic!("invalid fixed date"),
        }
    }

    fn input<'a>(description: &'a str, duration: &'a str, date: Option<&'a str>) -> ExerciseInput<'a> {
        ExerciseInput { description: Some(description), duration: Some(duration), date }
    }

    fn new_user(ledger: &mut Ledger, name: &str) -> User {
        match ledger.create_user(Some(name)) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn users_get_sequential_ids_in_insertion_order() {
        let mut ledger = Ledger::new();
        let a = new_user(&mut ledger, "alice");
        let b = new_user(&mut ledger, "bob");
        assert_eq!(a.id, UserId::new("1"));
        assert_eq!(b.id, UserId::new("2"));

        let names: Vec<_> = ledger.users().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[test]
    fn rejected_user_does_not_grow_list_or_consume_id() {
        let mut ledger = Ledger::new();
        assert!(matches!(ledger.create_user(None), Err(CoreError::MissingField { .. })));
        assert!(ledger.create_user(Some("")).is_err());
        assert_eq!(ledger.user_count(), 0);
        assert_eq!(new_user(&mut ledger, "carol").id, UserId::new("1"));
    }

    #[test]
    fn exercise_for_unknown_user_is_not_recorded() {
        let mut ledger = Ledger::new();
        let result = ledger.add_exercise(&UserId::new("9"), input("run", "10", None), today());
        assert_eq!(result, Err(CoreError::UserNotFound(UserId::new("9"))));
        assert_eq!(ledger.exercise_count(), 0);
    }

    #[test]
    fn unknown_user_wins_over_missing_fields() {
        let mut ledger = Ledger::new();
        let result = ledger.add_exercise(&UserId::new("1"), ExerciseInput::default(), today());
        assert!(matches!(result, Err(CoreError::UserNotFound(_))));
    }

    #[test]
    fn log_contains_only_the_owners_exercises() {
        let mut ledger = Ledger::new();
        let a = new_user(&mut ledger, "a");
        let b = new_user(&mut ledger, "b");
        for (owner, desc) in [(&a, "a1"), (&b, "b1"), (&a, "a2")] {
            if let Err(e) = ledger.add_exercise(&owner.id, input(desc, "5", None), today()) {
                panic!("unexpected error: {e}");
            }
        }

        let log = match ledger.exercise_log(&a.id, &LogQuery::default()) {
            Ok(l) => l,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(log.user, a);
        assert_eq!(log.count(), 2);
        let descs: Vec<_> = log.entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descs, ["a1", "a2"]);
    }

    #[test]
    fn log_applies_date_range_and_limit() {
        let mut ledger = Ledger::new();
        let user = new_user(&mut ledger, "A");
        for date in ["2023-01-01", "2023-01-15", "2023-02-01"] {
            if let Err(e) = ledger.add_exercise(&user.id, input("jog", "20", Some(date)), today()) {
                panic!("unexpected error: {e}");
            }
        }

        let ranged = LogQuery::from_params(Some("2023-01-01"), Some("2023-01-31"), None);
        let log = match ledger.exercise_log(&user.id, &ranged) {
            Ok(l) => l,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(log.count(), 2);
        assert_eq!(log.entries[1].date.to_string(), "Sun Jan 15 2023");

        let limited = LogQuery::from_params(None, None, Some("1"));
        let log = match ledger.exercise_log(&user.id, &limited) {
            Ok(l) => l,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(log.count(), 1);
        assert_eq!(log.entries[0].date, ExerciseDate::parse("2023-01-01"));
    }

    proptest! {
        #[test]
        fn user_ids_are_unique(names in proptest::collection::vec("[a-z]{0,6}", 1..40)) {
            let mut ledger = Ledger::new();
            let mut seen = HashSet::new();
            for name in &names {
                if let Ok(user) = ledger.create_user(Some(name)) {
                    prop_assert!(seen.insert(user.id.clone()), "duplicate id {}", user.id);
                }
            }
            prop_assert_eq!(seen.len(), ledger.user_count());
        }

        #[test]
        fn limit_never_exceeds_filtered_count(
            offsets in proptest::collection::vec(0i64..60, 0..20),
            limit in 0usize..25,
        ) {
            let mut ledger = Ledger::new();
            let user = new_user(&mut ledger, "p");
            for offset in &offsets {
                let date = (today() + chrono::Days::new(offset.unsigned_abs())).to_string();
                prop_assert!(ledger.add_exercise(&user.id, input("x", "1", Some(&date)), today()).is_ok());
            }

            let all = match ledger.exercise_log(&user.id, &LogQuery::default()) {
                Ok(l) => l,
                Err(e) => panic!("unexpected error: {e}"),
            };
            let limit_text = limit.to_string();
            let query = LogQuery::from_params(None, None, Some(&limit_text));
            let limited = match ledger.exercise_log(&user.id, &query) {
                Ok(l) => l,
                Err(e) => panic!("unexpected error: {e}"),
            };
            prop_assert_eq!(limited.count(), all.count().min(limit));
            prop_assert_eq!(&limited.entries[..], &all.entries[..limited.count()]);
        }
    }
}
