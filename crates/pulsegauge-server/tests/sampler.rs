//! Sampler rounds, range, cadence and cancellation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::VecDeque;
use std::time::Duration;

use pulsegauge_server::app_state::{AppState, CPU_PERCENT, MEM_USED_PERCENT};
use pulsegauge_server::config::PulseConfig;
use pulsegauge_server::sampler::{RandomSource, Sample, ThreadRandom, DEFAULT_PERIOD};
use tokio::time::sleep;

/// Returns scripted values in order, then zeros.
struct Scripted(VecDeque<u32>);

impl Scripted {
    fn new(values: &[u32]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl RandomSource for Scripted {
    fn next_below(&mut self, upper: u32) -> u32 {
        assert_eq!(upper, 100);
        self.0.pop_front().unwrap_or(0)
    }
}

fn state() -> AppState {
    AppState::new(PulseConfig::default()).unwrap()
}

fn gauges(state: &AppState) -> (f64, f64) {
    let reg = state.registry();
    (
        reg.get_gauge(CPU_PERCENT).unwrap().get(),
        reg.get_gauge(MEM_USED_PERCENT).unwrap().get(),
    )
}

#[test]
fn one_round_writes_cpu_then_mem() {
    let state = state();
    assert_eq!(gauges(&state), (0.0, 0.0));

    let mut sampler = state.sampler(Scripted::new(&[42, 17]));
    let sample = sampler.sample_once();

    assert_eq!(sample, Sample { cpu: 42.0, mem: 17.0 });
    assert_eq!(gauges(&state), (42.0, 17.0));

    let out = state.registry().render();
    assert!(out.contains("cpu_percent 42\n"));
    assert!(out.contains("mem_used_percent 17\n"));
}

#[test]
fn snapshot_reflects_only_latest_round() {
    let state = state();
    let mut sampler = state.sampler(Scripted::new(&[1, 2, 3, 4, 99, 0]));
    for _ in 0..3 {
        sampler.sample_once();
    }
    assert_eq!(gauges(&state), (99.0, 0.0));
}

#[test]
fn random_values_stay_in_range() {
    let state = state();
    let mut sampler = state.sampler(ThreadRandom::seeded(7));
    for _ in 0..10_000 {
        let s = sampler.sample_once();
        for v in [s.cpu, s.mem] {
            assert!((0.0..100.0).contains(&v), "out of range: {v}");
            assert_eq!(v.fract(), 0.0);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn first_round_waits_one_period() {
    let state = state();
    let handle = state
        .sampler(Scripted::new(&[42, 17, 3, 99]))
        .spawn(DEFAULT_PERIOD);

    sleep(Duration::from_millis(4_900)).await;
    assert_eq!(gauges(&state), (0.0, 0.0));

    sleep(Duration::from_millis(200)).await;
    assert_eq!(gauges(&state), (42.0, 17.0));

    sleep(DEFAULT_PERIOD).await;
    assert_eq!(gauges(&state), (3.0, 99.0));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn cancelled_sampler_stops_writing() {
    let state = state();
    let handle = state
        .sampler(Scripted::new(&[10, 20, 30, 40]))
        .spawn(Duration::from_secs(1));

    sleep(Duration::from_millis(1_100)).await;
    assert_eq!(gauges(&state), (10.0, 20.0));

    handle.cancel();
    assert!(handle.is_cancelled());
    handle.shutdown().await;

    sleep(Duration::from_secs(5)).await;
    assert_eq!(gauges(&state), (10.0, 20.0));
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_stops_loop() {
    let state = state();
    let handle = state
        .sampler(Scripted::new(&[5, 6, 7, 8]))
        .spawn(Duration::from_secs(1));
    drop(handle);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(gauges(&state), (0.0, 0.0));
}
