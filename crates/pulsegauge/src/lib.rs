//! Top-level facade crate for pulsegauge.
//!
//! Re-exports the core registry and the server library so users can depend on a single crate.

pub mod core {
    pub use pulsegauge_core::*;
}

pub mod server {
    pub use pulsegauge_server::*;
}
