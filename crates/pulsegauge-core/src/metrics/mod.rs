//! Minimal metrics registry.
//!
//! Instruments are created once at startup and live for the life of the
//! registry. Values are stored as atomics so the sampler and the `/metrics`
//! handler never contend on a lock for a single value; label cells live in a
//! `DashMap`. Rendering produces the Prometheus text exposition format with
//! families and label sets sorted for deterministic output.

mod counter;
mod gauge;
mod text;

use std::fmt::Write;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{PulseError, Result};

pub use counter::CounterVec;
pub use gauge::Gauge;

/// Content type of [`Registry::render`] output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
enum Instrument {
    Gauge(Arc<Gauge>),
    Counter(Arc<CounterVec>),
}

#[derive(Clone)]
struct Family {
    help: String,
    instrument: Instrument,
}

#[derive(Default)]
pub struct Registry {
    families: DashMap<String, Family>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gauge. Fails if `name` is already taken by any instrument.
    pub fn register_gauge(&self, name: &str, help: &str) -> Result<Arc<Gauge>> {
        let gauge = Arc::new(Gauge::new());
        self.insert(name, help, Instrument::Gauge(Arc::clone(&gauge)))?;
        Ok(gauge)
    }

    /// Register a counter partitioned by `label_names`.
    pub fn register_counter_vec(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterVec>> {
        for l in label_names {
            if !text::valid_label_name(l) {
                return Err(PulseError::InvalidLabelName((*l).to_string()));
            }
        }
        let counter = Arc::new(CounterVec::new(name, label_names));
        self.insert(name, help, Instrument::Counter(Arc::clone(&counter)))?;
        Ok(counter)
    }

    fn insert(&self, name: &str, help: &str, instrument: Instrument) -> Result<()> {
        if !text::valid_metric_name(name) {
            return Err(PulseError::InvalidMetricName(name.to_string()));
        }
        match self.families.entry(name.to_string()) {
            Entry::Occupied(_) => Err(PulseError::DuplicateMetric(name.to_string())),
            Entry::Vacant(v) => {
                v.insert(Family { help: help.to_string(), instrument });
                tracing::debug!(metric = %name, "metric registered");
                Ok(())
            }
        }
    }

    pub fn get_gauge(&self, name: &str) -> Option<Arc<Gauge>> {
        match &self.families.get(name)?.instrument {
            Instrument::Gauge(g) => Some(Arc::clone(g)),
            Instrument::Counter(_) => None,
        }
    }

    pub fn get_counter_vec(&self, name: &str) -> Option<Arc<CounterVec>> {
        match &self.families.get(name)?.instrument {
            Instrument::Counter(c) => Some(Arc::clone(c)),
            Instrument::Gauge(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Render all families in Prometheus text exposition format.
    ///
    /// Each value is read atomically; families are not read as a group.
    pub fn render(&self) -> String {
        let mut families: Vec<(String, Family)> = self
            .families
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        families.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (name, family) in &families {
            let _ = writeln!(out, "# HELP {} {}", name, text::escape_help(&family.help));
            match &family.instrument {
                Instrument::Gauge(g) => {
                    let _ = writeln!(out, "# TYPE {} gauge", name);
                    let _ = writeln!(out, "{} {}", name, text::format_value(g.get()));
                }
                Instrument::Counter(c) => {
                    let _ = writeln!(out, "# TYPE {} counter", name);
                    c.render(name, &mut out);
                }
            }
        }
        out
    }
}
