//! First-order Markov transition table.
//!
//! An N×N matrix of saturating counters over a bounded address space.
//! `table[prev][curr]` counts the observed immediate transitions from `prev`
//! to `curr`; the most probable successor of an address is the argmax over
//! its row, scanned left to right so ties resolve to the lowest index. The
//! matrix is the sole structure that learns; no recency metadata is kept
//! inside it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `observe()`: O(1)
//!   - `most_probable_successor()`: O(N) row scan
//! - **Space Complexity:** O(N²) counters, allocated once at construction
//! - **Hardware Cost:** Moderate - counter array plus a row-wide comparator
//! - **Best Case:** Strongly repetitive reference streams (one dominant
//!   successor per row)
//! - **Worst Case:** Uniform random streams (rows flatten, predictions churn)

use tracing::trace;

/// Saturating transition-count matrix.
///
/// Counters are stored row-major in a flat vector; a counter never exceeds
/// the maximum implied by the configured width and further increments clamp
/// silently.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    /// Row-major counter storage, `n * n` entries.
    counts: Vec<u16>,
    /// Address space size; rows and columns both span `0..n`.
    n: usize,
    /// Saturation ceiling, `2^B − 1` for a B-bit counter.
    max_count: u16,
}

impl TransitionTable {
    /// Creates a zeroed table for `addr_space` addresses with counters of
    /// the given bit width.
    ///
    /// # Arguments
    ///
    /// * `addr_space` - Number of addresses `N`; the table holds N×N counters.
    /// * `counter_bits` - Counter width `B` in bits, `1..=16`.
    ///
    /// # Panics
    ///
    /// Panics when `addr_space` is zero or `counter_bits` is outside
    /// `1..=16`; both are rejected by config validation before reaching
    /// this constructor.
    pub fn new(addr_space: usize, counter_bits: u32) -> Self {
        assert!(addr_space > 0, "transition table needs a nonzero address space");
        assert!(
            (1..=16).contains(&counter_bits),
            "counter width {counter_bits} outside supported 1..=16 bits"
        );

        Self {
            counts: vec![0; addr_space * addr_space],
            n: addr_space,
            max_count: ((1u32 << counter_bits) - 1) as u16,
        }
    }

    /// Address space size `N` this table was built for.
    pub fn addr_space(&self) -> usize {
        self.n
    }

    /// Saturation ceiling of each counter.
    pub fn counter_max(&self) -> u16 {
        self.max_count
    }

    /// Flat index of the `(from, to)` counter.
    fn idx(&self, from: usize, to: usize) -> usize {
        from * self.n + to
    }

    /// Records one observed transition from `prev` to `curr`.
    ///
    /// The counter saturates at the configured maximum; once saturated,
    /// further observations of the same edge leave the whole matrix
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics when either address is outside `0..N` (programming error).
    pub fn observe(&mut self, prev: usize, curr: usize) {
        assert!(prev < self.n, "source address {prev} out of range 0..{}", self.n);
        assert!(curr < self.n, "target address {curr} out of range 0..{}", self.n);

        let idx = self.idx(prev, curr);
        if self.counts[idx] < self.max_count {
            self.counts[idx] += 1;
        } else {
            trace!(prev, curr, max = self.max_count, "transition counter saturated");
        }
    }

    /// Returns the most probable successor of `addr`, or `None` when no
    /// transition out of `addr` has ever been observed.
    ///
    /// The row is scanned left to right and only a strictly greater count
    /// displaces the current best, so equal counts resolve to the lowest
    /// column index. This tie-break is part of the prediction contract:
    /// it keeps the choice deterministic without recency metadata.
    ///
    /// # Panics
    ///
    /// Panics when `addr` is outside `0..N` (programming error).
    pub fn most_probable_successor(&self, addr: usize) -> Option<usize> {
        let mut best_count = 0u16;
        let mut best = None;

        for (col, &count) in self.row(addr).iter().enumerate() {
            if count > best_count {
                best_count = count;
                best = Some(col);
            }
        }
        best
    }

    /// Current count of the `(from, to)` edge.
    ///
    /// # Panics
    ///
    /// Panics when either address is outside `0..N` (programming error).
    pub fn count(&self, from: usize, to: usize) -> u16 {
        assert!(from < self.n, "source address {from} out of range 0..{}", self.n);
        assert!(to < self.n, "target address {to} out of range 0..{}", self.n);
        self.counts[self.idx(from, to)]
    }

    /// Borrow of the outgoing-transition row for `addr`.
    ///
    /// # Panics
    ///
    /// Panics when `addr` is outside `0..N` (programming error).
    pub fn row(&self, addr: usize) -> &[u16] {
        assert!(addr < self.n, "address {addr} out of range 0..{}", self.n);
        &self.counts[addr * self.n..(addr + 1) * self.n]
    }

    /// Owned N×N copy of the matrix for observability consumers.
    pub fn snapshot(&self) -> Vec<Vec<u16>> {
        (0..self.n).map(|row| self.row(row).to_vec()).collect()
    }

    /// Clears every counter back to the freshly constructed state.
    pub fn reset(&mut self) {
        self.counts.fill(0);
    }
}
