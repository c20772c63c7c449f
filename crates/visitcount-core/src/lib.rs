//! visitcount core: transport-agnostic counting primitives, store contract, and errors.
//!
//! This crate defines the key layout, origin and visitor resolution, the
//! key-value store seam, and the daily-dedup counting procedure shared by the
//! gateway and tests. It carries no HTTP dependencies so the procedure can be
//! driven from any runtime.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `CountError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod counter;
pub mod error;
pub mod keys;
pub mod origin;
pub mod store;
pub mod visitor;

/// Shared result type.
pub use error::{CountError, Result};
