//! Command-line flags.
//!
//! Flags are applied on top of the YAML config (or the built-in defaults when
//! no file is given), then the merged config is validated once.

use std::path::PathBuf;

use clap::Parser;
use pulsegauge_core::error::Result;

use crate::config::{self, PulseConfig};

#[derive(Parser, Debug)]
#[command(
    name = "pulsegauge",
    version,
    about = "Synthetic CPU/memory gauges over a Prometheus /metrics endpoint"
)]
pub struct Cli {
    /// Listen address (default 0.0.0.0:10000, or 0.0.0.0:10001 with --no-login)
    #[arg(long)]
    pub address: Option<String>,

    /// Optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serve only /metrics (no /login route, no login counter)
    #[arg(long)]
    pub no_login: bool,
}

impl Cli {
    pub fn resolve_config(&self) -> Result<PulseConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => PulseConfig::default(),
        };
        if self.no_login {
            cfg.server.login_enabled = false;
        }
        if let Some(addr) = &self.address {
            cfg.server.listen = Some(addr.clone());
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
