//! Module: error
//! Responsibility: the single terminal mapping from [`TimelineError`] (plus
//! the 302 redirect case, which is not an error at all structurally) to an
//! HTTP response (spec §7 "Propagation": "a single terminal sink that maps
//! [errors] to HTTP responses").
//! Does not own: constructing `TimelineError`s — that is entirely
//! `timeline-core`'s concern; this module only ever reads `class()`.
//! Boundary: a `TimelineError` in, an axum `Response` out.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde_json::json;
use timeline_core::error::{ErrorClass, TimelineError};

/// Wraps a [`TimelineError`] so it can be returned directly from a handler
/// via `?` and converted by axum's `IntoResponse` machinery.
pub struct ApiError(pub TimelineError);

impl From<TimelineError> for ApiError {
    fn from(err: TimelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.class() {
            ErrorClass::InvalidArgument => StatusCode::CONFLICT,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "timeline request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// The 302 redirect emitted when `limit` falls outside `countRange` (spec
/// §4.4 step 2, §6 "302 Found"). Deliberately not an error variant: a
/// redirect is the handler's own successful outcome, not a propagated
/// failure, so it never touches [`TimelineError`].
pub struct Redirect {
    pub location: String,
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        let mut response = StatusCode::FOUND.into_response();
        match HeaderValue::from_str(&self.location) {
            Ok(value) => {
                response.headers_mut().insert(LOCATION, value);
            }
            Err(_) => {
                return ApiError(TimelineError::internal("redirect location is not a valid header value"))
                    .into_response();
            }
        }
        response
    }
}
