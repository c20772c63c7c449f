//! `/count` handler and the catch-all fallback.
//!
//! - `OPTIONS` on any path: 204 with CORS headers (origin mirrored, no allowlist check)
//! - `/count`, any other method: record the visit, 200 `{"total": n}`
//! - anything else: 404 `Not found`, no CORS headers

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use visitcount_core::visitor::resolve_ip;

use super::cors::{cors_headers, header_value};
use crate::app_state::AppState;
use crate::error::HttpError;

const CF_CONNECTING_IP: HeaderName = HeaderName::from_static("cf-connecting-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

fn preflight(app: &AppState, headers: &HeaderMap) -> Response {
    let request_origin = header_value(headers, &header::ORIGIN);
    let origin = app.origins().preflight(request_origin.as_deref());
    (StatusCode::NO_CONTENT, cors_headers(origin, app.origins())).into_response()
}

pub async fn count(
    State(app): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if method == Method::OPTIONS {
        return Ok(preflight(&app, &headers));
    }

    let request_origin = header_value(&headers, &header::ORIGIN);
    let allow_origin = app.origins().resolve(request_origin.as_deref());
    let cf_connecting_ip = header_value(&headers, &CF_CONNECTING_IP);
    let forwarded_for = header_value(&headers, &X_FORWARDED_FOR);
    let ip = resolve_ip(cf_connecting_ip.as_deref(), forwarded_for.as_deref());

    let visit = app.counter().record_visit(ip).await?;
    tracing::debug!(ip, total = visit.total, counted = visit.counted, "count served");

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        cors_headers(allow_origin, app.origins()),
        Json(json!({ "total": visit.total })),
    )
        .into_response())
}

pub async fn fallback(State(app): State<AppState>, method: Method, headers: HeaderMap) -> Response {
    if method == Method::OPTIONS {
        return preflight(&app, &headers);
    }
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
