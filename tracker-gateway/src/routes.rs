//! Axum route handlers for the exercise tracker API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracker_core::{Exercise, ExerciseDate, ExerciseInput, LogQuery, User, UserId};

use crate::{
    body::Payload,
    config::AssetPaths,
    error::{handle_panic, GatewayError},
    state::AppState,
};

// ── Shared state ─────────────────────────────────────────────────────────────

pub type SharedState = Arc<AppState>;

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
    pub username: Option<String>,
}

/// A `duration` as clients send it: a JSON number or any text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DurationField {
    /// Text handed to the ledger's integer coercion.
    ///
    /// A numeric zero counts as absent, like any other falsy JSON value; the
    /// text `"0"` is still a present duration.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            DurationField::Integer(0) => None,
            DurationField::Float(f) if *f == 0.0 => None,
            DurationField::Integer(n) => Some(n.to_string()),
            DurationField::Float(f) => Some(f.to_string()),
            DurationField::Text(s) => Some(s.clone()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddExerciseBody {
    pub description: Option<String>,
    pub duration: Option<DurationField>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Returned by `POST /api/users/{id}/exercises`: the owner merged with the
/// new exercise.
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: ExerciseDate,
}

impl ExerciseResponse {
    fn new(user: User, exercise: Exercise) -> Self {
        Self {
            id: user.id,
            username: user.username,
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: ExerciseDate,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given state and static assets.
///
/// `/` serves the landing page; any path no route claims falls through to
/// the static directory.
pub fn create_router(state: SharedState, assets: &AssetPaths) -> Router {
    let routes = Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(exercise_log))
        .route("/health", get(health))
        .route_service("/", ServeFile::new(&assets.index_page))
        .fallback_service(ServeDir::new(&assets.public_dir))
        .with_state(state);
    with_layers(routes)
}

/// Wrap `router` in request tracing, permissive CORS, and panic recovery.
///
/// Panic recovery is outermost so a panicking handler still answers with the
/// generic 500 body.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /api/users` — register a user.
///
/// # Errors
/// Returns a 400 [`GatewayError`] if the username is missing or blank.
pub async fn create_user(
    State(state): State<SharedState>,
    Payload(body): Payload<CreateUserBody>,
) -> Result<Json<User>, GatewayError> {
    let user = state.create_user(body.username.as_deref())?;
    info!(user_id = %user.id, username = %user.username, "user created");
    Ok(Json(user))
}

/// `GET /api/users` — every user in creation order.
///
/// # Errors
/// Returns [`GatewayError::Internal`] if the state lock is poisoned.
pub async fn list_users(State(state): State<SharedState>) -> Result<Json<Vec<User>>, GatewayError> {
    let users = state.users()?;
    debug!(count = users.len(), "listed users");
    Ok(Json(users))
}

/// `POST /api/users/{id}/exercises` — record an exercise for a user.
///
/// # Errors
/// Returns a 404 [`GatewayError`] for an unknown user, or a 400 if the
/// description or duration is missing or the duration is not an integer.
pub async fn add_exercise(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Payload(body): Payload<AddExerciseBody>,
) -> Result<Json<ExerciseResponse>, GatewayError> {
    let user_id = UserId::from(id);
    let duration = body.duration.as_ref().and_then(DurationField::to_text);
    let input = ExerciseInput {
        description: body.description.as_deref(),
        duration: duration.as_deref(),
        date: body.date.as_deref(),
    };

    let (user, exercise) = state.add_exercise(&user_id, input)?;
    info!(
        user_id = %user.id,
        exercise_id = %exercise.id,
        duration = exercise.duration,
        date = %exercise.date,
        "exercise recorded"
    );
    Ok(Json(ExerciseResponse::new(user, exercise)))
}

/// `GET /api/users/{id}/logs` — a user's exercises, optionally filtered by
/// `from`/`to` and truncated by `limit`.
///
/// # Errors
/// Returns a 404 [`GatewayError`] for an unknown user.
pub async fn exercise_log(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<LogResponse>, GatewayError> {
    let user_id = UserId::from(id);
    let query = LogQuery::from_params(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    );

    let log = state.exercise_log(&user_id, &query)?;
    let count = log.count();
    debug!(user_id = %log.user.id, count, ?query, "exercise log served");
    Ok(Json(LogResponse {
        id: log.user.id,
        username: log.user.username,
        count,
        log: log.entries.into_iter().map(LogEntry::from).collect(),
    }))
}
