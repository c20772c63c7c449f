//! HTTP surface: CORS headers and the `/count` endpoint.

pub mod cors;
pub mod count;
