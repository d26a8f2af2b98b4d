use serde::Serialize;

use crate::id::UserId;

/// A registered user. Users are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct User {
    /// Server-assigned id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Name supplied at creation, stored as given.
    pub username: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self { id, username: username.into() }
    }
}
