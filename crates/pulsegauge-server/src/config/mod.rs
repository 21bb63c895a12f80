//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use pulsegauge_core::error::{PulseError, Result};

pub use schema::{PulseConfig, SamplerSection, ServerSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<PulseConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        PulseError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PulseConfig> {
    let cfg: PulseConfig = serde_yaml::from_str(s)
        .map_err(|e| PulseError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
