use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::text::escape_label;
use crate::error::{PulseError, Result};

/// Monotonic counter partitioned by label values.
///
/// Cells are created lazily at zero on first increment and never removed.
#[derive(Debug)]
pub struct CounterVec {
    name: String,
    label_names: Vec<String>,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub(crate) fn new(name: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            map: DashMap::new(),
        }
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        let key = self.key(values)?;
        let cell = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value for a label set; 0 if never incremented.
    pub fn get(&self, values: &[&str]) -> Result<u64> {
        let key = self.key(values)?;
        Ok(self
            .map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0))
    }

    /// Number of label sets observed so far.
    pub fn cardinality(&self) -> usize {
        self.map.len()
    }

    fn key(&self, values: &[&str]) -> Result<Vec<String>> {
        if values.len() != self.label_names.len() {
            return Err(PulseError::LabelCardinality {
                metric: self.name.clone(),
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    /// Render sample lines (metadata is written by the registry).
    pub(crate) fn render(&self, name: &str, out: &mut String) {
        let mut rows: Vec<(Vec<String>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (values, count) in rows {
            let label_str = self
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", name, count);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str, count);
            }
        }
    }
}
