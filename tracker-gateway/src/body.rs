//! Request body extraction accepting JSON or URL-encoded forms.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request body decoded as a form or as JSON, depending on the content type.
///
/// A request without a body, with an empty JSON body, or with a content type
/// that is neither JSON nor a form decodes to `T::default()`, so handlers
/// report missing fields through their usual validation. Malformed bodies
/// become [`GatewayError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

enum BodyKind {
    Form,
    Json,
    Other,
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| invalid(rejection.status(), rejection.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| invalid(rejection.status(), rejection.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(T::default()));
                }
                let Json(value) = Json::<T>::from_bytes(&bytes)
                    .map_err(|rejection| invalid(rejection.status(), rejection.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Other => Ok(Self(T::default())),
        }
    }
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == FORM_CONTENT_TYPE {
        BodyKind::Form
    } else if essence.starts_with("application/") && essence.ends_with("json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

fn invalid(status: axum::http::StatusCode, detail: String) -> GatewayError {
    tracing::debug!(%status, detail = %detail, "rejected request body");
    GatewayError::InvalidRequest(detail)
}
