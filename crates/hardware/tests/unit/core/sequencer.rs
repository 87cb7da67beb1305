//! Staged Sequencer Tests.
//!
//! Verifies the six-phase traversal: phase ordering, cycle accounting,
//! output validity in `ReportResult`, the observability probe, and the
//! fail-fast input contract.

use markov_core::common::AccessTag;
use markov_core::core::sequencer::{Phase, Sequencer};
use pretty_assertions::assert_eq;

use crate::common::harness::reference_geometry;

// ══════════════════════════════════════════════════════════
// 1. Phase traversal and cycle accounting
// ══════════════════════════════════════════════════════════

/// A full traversal walks all six phases in order and consumes exactly
/// six micro-steps.
#[test]
fn traversal_walks_six_phases() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    assert_eq!(seq.phase(), Phase::Idle);
    assert_eq!(seq.cycles(), 0);

    seq.present(4);
    let expected = [
        Phase::FindHit,
        Phase::UpdateHistory1,
        Phase::FindMostProbable,
        Phase::UpdateHistory2,
        Phase::ReportResult,
        Phase::Idle,
    ];
    for (i, &phase) in expected.iter().enumerate() {
        let event = seq.step();
        assert_eq!(seq.phase(), phase, "after micro-step {}", i + 1);
        assert_eq!(seq.cycles(), (i + 1) as u64);
        // Only the ReportResult step yields the event.
        assert_eq!(event.is_some(), i == 5);
    }
    assert_eq!(seq.references(), 1);
}

/// Phase indices are numbered 0 through 5 in traversal order.
#[test]
fn phase_indices_are_ordered() {
    let order = [
        Phase::Idle,
        Phase::FindHit,
        Phase::UpdateHistory1,
        Phase::FindMostProbable,
        Phase::UpdateHistory2,
        Phase::ReportResult,
    ];
    for (i, phase) in order.iter().enumerate() {
        assert_eq!(phase.index(), i as u8);
    }
}

/// Stepping an Idle machine with no presented address is a no-op: no
/// phase change, no cycle consumed, no event.
#[test]
fn idle_step_without_input_is_noop() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    assert!(seq.step().is_none());
    assert!(seq.step().is_none());
    assert_eq!(seq.phase(), Phase::Idle);
    assert_eq!(seq.cycles(), 0);
}

/// Every reference costs exactly six micro-steps; the machine never stalls.
#[test]
fn each_reference_costs_six_cycles() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    for (i, addr) in [3usize, 9, 3, 27].into_iter().enumerate() {
        let _ = seq.process(addr);
        assert_eq!(seq.cycles(), ((i + 1) * 6) as u64);
        assert_eq!(seq.phase(), Phase::Idle);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Outputs sampled in ReportResult
// ══════════════════════════════════════════════════════════

/// Drives [5, 9, 5] and inspects the probe while the third reference sits
/// in ReportResult: the machine predicts 9 for address 5 but finds it
/// already held, so the prefetch is suppressed.
#[test]
fn probe_exposes_outputs_in_report_result() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    let _ = seq.process(5);
    let _ = seq.process(9);

    seq.present(5);
    for _ in 0..5 {
        assert!(seq.step().is_none());
    }
    assert_eq!(seq.phase(), Phase::ReportResult);

    let probe = seq.probe();
    assert_eq!(probe.phase_index, 5);
    assert_eq!(probe.cycles, 17);
    assert_eq!(probe.references, 2);
    assert_eq!(probe.current, Some(5));
    assert_eq!(probe.previous, Some(9));
    assert_eq!(probe.predicted, Some(9));
    assert!(probe.predicted_in_history);

    // The window is presented as W slots with per-slot validity.
    assert_eq!(probe.history.len(), 5);
    assert_eq!(probe.history[0].map(|e| (e.addr, e.tag)), Some((9, AccessTag::Demand)));
    assert_eq!(probe.history[1].map(|e| (e.addr, e.tag)), Some((5, AccessTag::Demand)));
    assert!(probe.history[2].is_none());

    // The learned edge is visible in the table snapshot.
    assert_eq!(probe.table[5][9], 1);

    // Sampling the final step emits the matching event.
    let event = seq.step();
    match event {
        Some(event) => {
            assert!(event.demand_hit);
            assert!(!event.prefetch);
            assert_eq!(event.address, 5);
        }
        None => panic!("ReportResult step must yield the event"),
    }
}

/// The demand insert lands in UpdateHistory1, before the prediction in
/// FindMostProbable reads the table.
#[test]
fn demand_insert_lands_before_prediction() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    seq.present(22);
    let _ = seq.step(); // latch
    let _ = seq.step(); // FindHit
    assert!(!seq.history().contains(22));
    let _ = seq.step(); // UpdateHistory1
    assert!(seq.history().contains(22));
    assert_eq!(seq.phase(), Phase::FindMostProbable);
}

// ══════════════════════════════════════════════════════════
// 3. Reset
// ══════════════════════════════════════════════════════════

/// Reset returns to Idle with zeroed counters and empty structures, and a
/// replayed sequence matches a fresh machine.
#[test]
fn reset_restores_fresh_state() {
    let config = reference_geometry();
    let addresses = [0usize, 1, 2, 0, 1, 2];

    let mut seq = Sequencer::new(&config).unwrap();
    for &addr in &addresses {
        let _ = seq.process(addr);
    }
    seq.reset();
    assert_eq!(seq.phase(), Phase::Idle);
    assert_eq!(seq.cycles(), 0);
    assert_eq!(seq.references(), 0);
    assert!(seq.history().is_empty());

    let mut fresh = Sequencer::new(&config).unwrap();
    for &addr in &addresses {
        assert_eq!(seq.process(addr), fresh.process(addr));
    }
}

// ══════════════════════════════════════════════════════════
// 4. Input contract
// ══════════════════════════════════════════════════════════

/// Presenting an address mid-traversal is a programming error.
#[test]
#[should_panic(expected = "only while Idle")]
fn present_rejects_mid_traversal_input() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    seq.present(1);
    let _ = seq.step();
    seq.present(2);
}

/// Presenting an out-of-range address is a programming error.
#[test]
#[should_panic(expected = "out of range")]
fn present_rejects_out_of_range_address() {
    let mut seq = Sequencer::new(&reference_geometry()).unwrap();
    seq.present(32);
}
