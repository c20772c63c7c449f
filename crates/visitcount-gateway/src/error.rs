//! HTTP mapping for core errors (non-preflight handlers).
//!
//! Faults are not surfaced as structured JSON: the client sees a bare 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use visitcount_core::error::CountError;

#[derive(Debug)]
pub struct HttpError(pub CountError);

impl From<CountError> for HttpError {
    fn from(e: CountError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.0.code(), error = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
