//! Address pattern generation for driving the predictor.
//!
//! Produces the canonical reference streams used to exercise the decision
//! engine: sequential, strided, interleaved, repeated, and seeded-random
//! sequences over the configured address space. Every generator is
//! deterministic given its configuration; the random pattern draws from a
//! seeded generator so runs reproduce bit-for-bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PatternConfig, PatternKind};

/// Generates an address sequence for the given pattern over `[0, addr_space)`.
///
/// Degenerate `stride` or `period` values of zero are treated as one, the
/// same way the prefetch degree is clamped elsewhere in the simulator.
///
/// # Panics
///
/// Panics when `addr_space` is zero (programming error; config validation
/// rejects this earlier).
pub fn generate(pattern: &PatternConfig, addr_space: usize) -> Vec<usize> {
    assert!(addr_space > 0, "pattern generation needs a nonzero address space");

    match pattern.kind {
        PatternKind::Sequential => (0..pattern.length).map(|i| i % addr_space).collect(),
        PatternKind::Strided => {
            let stride = if pattern.stride == 0 { 1 } else { pattern.stride };
            (0..pattern.length)
                .map(|i| (i * stride) % addr_space)
                .collect()
        }
        PatternKind::Interleaved => (0..pattern.length)
            .map(|i| (i ^ 1) % addr_space)
            .collect(),
        PatternKind::Repeated => {
            let period = if pattern.period == 0 { 1 } else { pattern.period };
            (0..pattern.length)
                .map(|i| (i % period) % addr_space)
                .collect()
        }
        PatternKind::Random => {
            let mut rng = StdRng::seed_from_u64(pattern.seed);
            (0..pattern.length)
                .map(|_| rng.gen_range(0..addr_space))
                .collect()
        }
    }
}
