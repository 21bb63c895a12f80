//! Periodic synthetic sampler.
//!
//! Every period, draws two independent integers in `[0, 100)` and writes them
//! to the `cpu_percent` and `mem_used_percent` gauges. The values are random
//! noise, not OS measurements.
//!
//! The loop runs on its own task until its `CancellationToken` fires. The
//! first round happens one full period after start.

mod source;

use std::sync::Arc;
use std::time::Duration;

use pulsegauge_core::Gauge;
use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub use source::{RandomSource, ThreadRandom};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

const PERCENT_MIN: u32 = 0;
const PERCENT_MAX: u32 = 100;

/// Values written by one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub cpu: f64,
    pub mem: f64,
}

pub struct Sampler<R> {
    cpu: Arc<Gauge>,
    mem: Arc<Gauge>,
    source: R,
}

impl<R: RandomSource> Sampler<R> {
    pub fn new(cpu: Arc<Gauge>, mem: Arc<Gauge>, source: R) -> Self {
        Self { cpu, mem, source }
    }

    fn percent(&mut self) -> f64 {
        f64::from(PERCENT_MIN + self.source.next_below(PERCENT_MAX - PERCENT_MIN))
    }

    /// One round: CPU is drawn first, then memory.
    pub fn sample_once(&mut self) -> Sample {
        let sample = Sample {
            cpu: self.percent(),
            mem: self.percent(),
        };
        self.cpu.set(sample.cpu);
        self.mem.set(sample.mem);
        tracing::debug!(cpu = sample.cpu, mem = sample.mem, "sampled");
        sample
    }

    /// Sample every `period` until `cancel` fires.
    pub async fn run(mut self, period: Duration, cancel: CancellationToken) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        tracing::info!(?period, "sampler started");
        loop {
            select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.sample_once();
                }
            }
        }
        tracing::info!("sampler stopped");
    }

    /// Run on a dedicated task. Dropping the handle stops the loop.
    pub fn spawn(self, period: Duration) -> SamplerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(period, cancel.clone()));
        SamplerHandle { cancel, task: Some(task) }
    }
}

pub struct SamplerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "sampler task ended abnormally");
            }
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
