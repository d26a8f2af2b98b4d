//! Error types for the gateway crate.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracker_core::CoreError;

/// Body text returned for every unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// A validation or lookup error from the ledger.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An unexpected server-side failure. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Core(CoreError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Core(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Core(_) | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return internal_error_response();
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

/// The generic 500 response shared by error mapping and panic recovery.
#[must_use]
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": INTERNAL_ERROR_MESSAGE})),
    )
        .into_response()
}

/// Panic handler for [`tower_http::catch_panic::CatchPanicLayer`].
///
/// Logs the panic payload and answers with the generic 500 body.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::error!(panic = %detail, "handler panicked");
    internal_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::UserId;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[test]
    fn gateway_error_status_codes_map_correctly() {
        let not_found = GatewayError::from(CoreError::UserNotFound(UserId::new("3")));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let missing = GatewayError::from(CoreError::MissingField { message: "Username is required" });
        assert_eq!(missing.into_response().status(), StatusCode::BAD_REQUEST);

        let bad_req = GatewayError::InvalidRequest("expected value".to_owned());
        assert_eq!(bad_req.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let err = GatewayError::from(CoreError::UserNotFound(UserId::new("3")));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let err = GatewayError::Internal("ledger lock poisoned".to_owned());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn panic_handler_returns_generic_500() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body, json!({"error": INTERNAL_ERROR_MESSAGE}));
    }
}
