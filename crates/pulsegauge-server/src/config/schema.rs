use std::net::SocketAddr;
use std::time::Duration;

use pulsegauge_core::error::{PulseError, Result};
use serde::Deserialize;

/// Listen address when the login route is served.
pub const DEFAULT_LISTEN_WITH_LOGIN: &str = "0.0.0.0:10000";
/// Listen address for the metrics-only variant.
pub const DEFAULT_LISTEN_METRICS_ONLY: &str = "0.0.0.0:10001";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub sampler: SamplerSection,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            sampler: SamplerSection::default(),
        }
    }
}

impl PulseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulseError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.sampler.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Unset means "pick the default for the selected variant".
    #[serde(default)]
    pub listen: Option<String>,

    #[serde(default = "default_true")]
    pub login_enabled: bool,

    #[serde(default = "default_true")]
    pub trust_forwarded_headers: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: None,
            login_enabled: true,
            trust_forwarded_headers: true,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_str(&self) -> &str {
        match (&self.listen, self.login_enabled) {
            (Some(l), _) => l.as_str(),
            (None, true) => DEFAULT_LISTEN_WITH_LOGIN,
            (None, false) => DEFAULT_LISTEN_METRICS_ONLY,
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let s = self.listen_str();
        s.parse().map_err(|e| {
            PulseError::BadConfig(format!("server.listen {s:?} is not a socket address: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self { interval_ms: default_interval_ms() }
    }
}

impl SamplerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3_600_000).contains(&self.interval_ms) {
            return Err(PulseError::BadConfig(
                "sampler.interval_ms must be between 1 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_true() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    5000
}
