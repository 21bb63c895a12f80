use std::sync::atomic::{AtomicU64, Ordering};

/// Single floating-point value, last write wins.
///
/// The value is kept as IEEE-754 bits in one atomic word, so readers always
/// see a complete value.
#[derive(Debug)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub(crate) fn new() -> Self {
        Self { bits: AtomicU64::new(0f64.to_bits()) }
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
