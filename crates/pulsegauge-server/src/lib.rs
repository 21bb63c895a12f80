//! pulsegauge server library entry.
//!
//! Wires config, the shared registry, the periodic sampler and the HTTP
//! routes. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod context;
pub mod login;
pub mod ops;
pub mod router;
pub mod sampler;
