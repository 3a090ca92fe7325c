//! Dispatch outcome → HTTP response.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::dispatch::DispatchOutcome;

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        match self {
            DispatchOutcome::Matched { body, .. } => (StatusCode::OK, Html(body)).into_response(),
            DispatchOutcome::NotFound { body } => {
                (StatusCode::NOT_FOUND, Html(body.unwrap_or_default())).into_response()
            }
            // 301, not the 308 of `Redirect::permanent`.
            DispatchOutcome::Redirect { location } => {
                (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}
