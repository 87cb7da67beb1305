//! Test harness: sequence drivers and event-invariant checks.
//!
//! Both engine models are driven through the same helpers so every test
//! exercises the full per-reference contract: after each event the
//! structural invariants (window bound, address distinctness, flag
//! consistency, prefetch guarantees) are asserted before the event is
//! handed to the test body.

use markov_core::common::{AccessTag, PrefetchEvent};
use markov_core::config::PredictorConfig;
use markov_core::core::engine::MarkovPredictor;
use markov_core::core::sequencer::Sequencer;

/// Installs a tracing subscriber honoring `RUST_LOG`, so failing tests can
/// be rerun with the engine's learn/issue events visible. Safe to call from
/// every test; only the first installation wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a predictor geometry for tests.
pub fn geometry(addr_space: usize, window: usize, counter_bits: u32) -> PredictorConfig {
    PredictorConfig {
        addr_space,
        window,
        counter_bits,
    }
}

/// The reference geometry used by the end-to-end scenarios (N=32, W=5, B=8).
pub fn reference_geometry() -> PredictorConfig {
    geometry(32, 5, 8)
}

/// Asserts every per-event invariant of the prefetcher contract.
pub fn check_event(event: &PrefetchEvent, config: &PredictorConfig) {
    assert!(
        event.history.len() <= config.window,
        "history exceeded window: {} > {}",
        event.history.len(),
        config.window
    );
    for (i, lhs) in event.history.iter().enumerate() {
        assert!(lhs.addr < config.addr_space, "history address out of range");
        for rhs in &event.history[i + 1..] {
            assert_ne!(lhs.addr, rhs.addr, "duplicate address in history");
        }
    }
    for pair in event.history.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "history timestamps must be non-decreasing"
        );
    }

    assert_eq!(
        event.hit,
        event.prefetch_hit || event.demand_hit,
        "hit must equal prefetch_hit OR demand_hit"
    );
    assert!(
        !(event.prefetch_hit && event.demand_hit),
        "hit kinds must be mutually exclusive"
    );
    assert_eq!(
        event.prefetch,
        event.prefetch_address.is_some(),
        "prefetch flag must match prefetch_address presence"
    );

    if let Some(target) = event.prefetch_address {
        assert!(target < config.addr_space, "prefetch address out of range");
        assert_ne!(
            target, event.address,
            "a reference must never prefetch itself"
        );
        assert!(
            event
                .history
                .iter()
                .any(|entry| entry.addr == target && entry.tag == AccessTag::Prefetch),
            "issued prefetch must sit in the history tagged Prefetch"
        );
    }
}

/// Drives `addresses` through a fresh reference model, checking invariants.
pub fn run_reference(config: &PredictorConfig, addresses: &[usize]) -> Vec<PrefetchEvent> {
    init_tracing();
    let mut predictor = MarkovPredictor::new(config).unwrap();
    addresses
        .iter()
        .map(|&addr| {
            let event = predictor.access(addr);
            check_event(&event, config);
            event
        })
        .collect()
}

/// Drives `addresses` through a fresh staged sequencer, checking invariants.
pub fn run_staged(config: &PredictorConfig, addresses: &[usize]) -> Vec<PrefetchEvent> {
    init_tracing();
    let mut sequencer = Sequencer::new(config).unwrap();
    addresses
        .iter()
        .map(|&addr| {
            let event = sequencer.process(addr);
            check_event(&event, config);
            event
        })
        .collect()
}
