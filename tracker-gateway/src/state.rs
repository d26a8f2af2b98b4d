//! Shared application state handed to every route handler.
//!
//! Wraps the [`Ledger`] in a lock so the multi-threaded runtime can serve
//! requests concurrently. Handlers never hold a guard across an `.await`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use tracker_core::{Exercise, ExerciseInput, ExerciseLog, Ledger, LogQuery, User, UserId};

use crate::error::GatewayError;

/// Supplies the date used when an exercise arrives without one.
pub type TodayFn = fn() -> NaiveDate;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Thread-safe owner of the ledger.
#[derive(Debug)]
pub struct AppState {
    ledger: RwLock<Ledger>,
    today: TodayFn,
}

impl AppState {
    /// Create an empty state whose default exercise date is the current UTC day.
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(utc_today)
    }

    /// Create an empty state with a custom source for the default date.
    #[must_use]
    pub fn with_today(today: TodayFn) -> Self {
        Self { ledger: RwLock::new(Ledger::new()), today }
    }

    /// Register a user.
    ///
    /// # Errors
    /// Propagates ledger validation errors, or [`GatewayError::Internal`] if
    /// the lock is poisoned.
    pub fn create_user(&self, username: Option<&str>) -> Result<User, GatewayError> {
        Ok(self.write()?.create_user(username)?)
    }

    /// Snapshot of all users in creation order.
    ///
    /// # Errors
    /// Returns [`GatewayError::Internal`] if the lock is poisoned.
    pub fn users(&self) -> Result<Vec<User>, GatewayError> {
        Ok(self.read()?.users().cloned().collect())
    }

    /// Record an exercise for `user_id`.
    ///
    /// # Errors
    /// Propagates ledger lookup and validation errors, or
    /// [`GatewayError::Internal`] if the lock is poisoned.
    pub fn add_exercise(
        &self,
        user_id: &UserId,
        input: ExerciseInput<'_>,
    ) -> Result<(User, Exercise), GatewayError> {
        let today = (self.today)();
        Ok(self.write()?.add_exercise(user_id, input, today)?)
    }

    /// Build the filtered log for `user_id`.
    ///
    /// # Errors
    /// Propagates [`tracker_core::CoreError::UserNotFound`], or
    /// [`GatewayError::Internal`] if the lock is poisoned.
    pub fn exercise_log(&self, user_id: &UserId, query: &LogQuery) -> Result<ExerciseLog, GatewayError> {
        Ok(self.read()?.exercise_log(user_id, query)?)
    }

    /// Total number of recorded exercises.
    ///
    /// # Errors
    /// Returns [`GatewayError::Internal`] if the lock is poisoned.
    pub fn exercise_count(&self) -> Result<usize, GatewayError> {
        Ok(self.read()?.exercise_count())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>, GatewayError> {
        self.ledger
            .read()
            .map_err(|_| GatewayError::Internal("ledger read lock poisoned".to_owned()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>, GatewayError> {
        self.ledger
            .write()
            .map_err(|_| GatewayError::Internal("ledger write lock poisoned".to_owned()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
