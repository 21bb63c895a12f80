//! Request context helpers shared by handlers.

pub mod client_ip;
