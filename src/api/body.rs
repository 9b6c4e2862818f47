//! Request body decoding.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::types::ErrorResponse;

/// Rejection shared by the body extractors: a 400 with a JSON message.
pub type BodyRejection = (StatusCode, Json<ErrorResponse>);

/// Request body decoded from JSON or an urlencoded form.
///
/// An empty body decodes to `T::default()`, so the handler reports missing
/// fields itself. Bodies that do not decode are rejected with 400 and a
/// JSON `{ "message" }`, never with the framework's plain-text rejections.
#[derive(Debug, Clone, Default)]
pub struct RequestBody<T>(pub T);

impl<S, T> FromRequest<S> for RequestBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| bad_request(rejection.body_text()))?;
        decode_json(&bytes).map(Self)
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}

/// Decode a JSON body, treating a blank one as `T::default()`.
pub fn decode_json<T>(bytes: &[u8]) -> Result<T, BodyRejection>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| bad_request(e.to_string()))
}

/// 400 with a JSON message naming what failed to decode.
pub fn bad_request(detail: impl std::fmt::Display) -> BodyRejection {
    tracing::debug!("rejected request: {}", detail);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!("Invalid request: {}", detail))),
    )
}
