//! pulsegauge core: the error surface and the in-process metrics registry.
//!
//! This crate carries no transport or runtime dependencies. The server crate
//! owns HTTP, configuration and the sampling loop; everything here is plain
//! shared state that can be exercised from unit tests without a runtime.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. Misuse of the
//! registry (duplicate names, wrong label counts) surfaces as `PulseError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{PulseError, Result};
pub use metrics::{CounterVec, Gauge, Registry, CONTENT_TYPE};
