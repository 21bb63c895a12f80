//! Shared application state.
//!
//! Owns the registry and the instruments registered at startup. Cloned into
//! every handler; the sampler receives the two gauges.

use std::sync::Arc;

use pulsegauge_core::error::Result;
use pulsegauge_core::{CounterVec, Gauge, Registry};

use crate::config::PulseConfig;
use crate::sampler::{RandomSource, Sampler};

pub const CPU_PERCENT: &str = "cpu_percent";
pub const MEM_USED_PERCENT: &str = "mem_used_percent";
pub const LOGIN_COUNT: &str = "login_count";
pub const CLIENT_IP_LABEL: &str = "client_ip";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: PulseConfig,
    registry: Arc<Registry>,
    cpu_percent: Arc<Gauge>,
    mem_used_percent: Arc<Gauge>,
    login_count: Option<Arc<CounterVec>>,
}

impl AppState {
    /// Build application state and register every instrument.
    /// A registration failure is a startup error.
    pub fn new(cfg: PulseConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    pub fn with_registry(cfg: PulseConfig, registry: Arc<Registry>) -> Result<Self> {
        let cpu_percent = registry.register_gauge(CPU_PERCENT, "CPU usage percent")?;
        let mem_used_percent = registry.register_gauge(MEM_USED_PERCENT, "Memory used percent")?;

        let login_count = if cfg.server.login_enabled {
            Some(registry.register_counter_vec(
                LOGIN_COUNT,
                "Login requests per client IP",
                &[CLIENT_IP_LABEL],
            )?)
        } else {
            None
        };

        tracing::info!(
            metrics = registry.len(),
            login = cfg.server.login_enabled,
            "metrics registered"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                cpu_percent,
                mem_used_percent,
                login_count,
            }),
        })
    }

    pub fn cfg(&self) -> &PulseConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn login_count(&self) -> Option<&Arc<CounterVec>> {
        self.inner.login_count.as_ref()
    }

    /// Sampler bound to this state's CPU and memory gauges.
    pub fn sampler<R: RandomSource>(&self, source: R) -> Sampler<R> {
        Sampler::new(
            Arc::clone(&self.inner.cpu_percent),
            Arc::clone(&self.inner.mem_used_percent),
            source,
        )
    }
}
