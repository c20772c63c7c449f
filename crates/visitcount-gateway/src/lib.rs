//! visitcount gateway library entry.
//!
//! Wires config, shared state, and the HTTP surface (CORS + `/count`) around
//! the core counter. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
