//! HTTP API gateway for the exercise tracker.
//!
//! Exposes user registration, exercise recording, and filtered exercise
//! logs over JSON or form-encoded requests, plus a static landing page.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod body;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
