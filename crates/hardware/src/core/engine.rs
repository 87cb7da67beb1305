//! Sequential reference model of the Markov prefetcher.
//!
//! One call to [`MarkovPredictor::access`] performs the entire per-reference
//! decision sequence and returns the resulting [`PrefetchEvent`]:
//! 1. **Classify:** scan the history for the demand address; a `Prefetch`
//!    entry means a prefetch-hit (and is promoted to `Demand` in place), a
//!    `Demand` entry means a demand-hit, absence means a miss.
//! 2. **Learn:** on a miss with a valid previous address, count the
//!    `prev → curr` edge in the transition table. Hits do not reinforce
//!    edges, so a predicted edge that keeps succeeding is not double-counted.
//! 3. **Record:** insert the demand into the history unconditionally; dedup
//!    moves an existing entry to the tail and retags it `Demand`.
//! 4. **Predict:** query the table for the most probable successor of the
//!    demand and, when the candidate is not already in the history, insert
//!    it as a `Prefetch` entry and report it. The demand insert in step 3
//!    happens first, so the predictor can never prefetch the address it was
//!    just handed.
//! 5. **Latch:** remember the demand as the previous address for the next
//!    reference.
//!
//! The staged sequencer performs the same five steps spread over discrete
//! micro-steps; for any input sequence the two models emit identical event
//! streams.

use tracing::{debug, trace};

use crate::common::{AccessTag, ConfigError, PrefetchEvent};
use crate::config::PredictorConfig;
use crate::core::history::AccessHistory;
use crate::core::table::TransitionTable;

/// Single-step Markov predictor: one result per input address.
#[derive(Clone, Debug)]
pub struct MarkovPredictor {
    /// Transition-count matrix (the only learning structure).
    table: TransitionTable,
    /// Tagged recency window.
    history: AccessHistory,
    /// Previous demand address; `None` until the first reference and after
    /// reset.
    prev: Option<usize>,
    /// Number of references processed; doubles as the timestamp source for
    /// history insertions.
    references: u64,
    /// Address space size `N`.
    addr_space: usize,
}

impl MarkovPredictor {
    /// Builds a predictor from validated geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the geometry is degenerate (zero
    /// address space, zero window, or unsupported counter width).
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table: TransitionTable::new(config.addr_space, config.counter_bits),
            history: AccessHistory::new(config.window),
            prev: None,
            references: 0,
            addr_space: config.addr_space,
        })
    }

    /// Processes one demand reference and returns its event.
    ///
    /// # Panics
    ///
    /// Panics when `address` is outside `0..N` (programming error; the
    /// core has no recoverable errors).
    pub fn access(&mut self, address: usize) -> PrefetchEvent {
        assert!(
            address < self.addr_space,
            "address {address} out of range 0..{}",
            self.addr_space
        );
        let timestamp = self.references;

        // Classification must read the history before the demand insert
        // below rewrites the entry.
        let found = self.history.find_tag(address);
        let prefetch_hit = found == Some(AccessTag::Prefetch);
        let demand_hit = found == Some(AccessTag::Demand);
        let hit = prefetch_hit || demand_hit;
        if prefetch_hit {
            let promoted = self.history.promote_to_demand(address);
            debug_assert!(promoted, "prefetch-hit entry must be promotable");
        }
        trace!(address, hit, prefetch_hit, demand_hit, "classified reference");

        if !hit {
            if let Some(prev) = self.prev {
                self.table.observe(prev, address);
                debug!(prev, curr = address, "learned transition");
            }
        }

        self.history.insert_demand(address, timestamp);

        let predicted = self.table.most_probable_successor(address);
        let mut prefetch_address = None;
        if let Some(candidate) = predicted {
            if self.history.contains(candidate) {
                trace!(candidate, "prediction already in history, prefetch suppressed");
            } else {
                self.history.insert_prefetch(candidate, timestamp);
                prefetch_address = Some(candidate);
                debug!(address, candidate, "prefetch issued");
            }
        }

        self.prev = Some(address);
        self.references += 1;

        PrefetchEvent {
            address,
            hit,
            prefetch_hit,
            demand_hit,
            prefetch: prefetch_address.is_some(),
            prefetch_address,
            history: self.history.snapshot(),
        }
    }

    /// Restores the freshly constructed state: zeroed table, empty history,
    /// invalid previous-address latch, reference count zero.
    pub fn reset(&mut self) {
        self.table.reset();
        self.history.reset();
        self.prev = None;
        self.references = 0;
    }

    /// Read-only view of the transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Read-only view of the access history.
    pub fn history(&self) -> &AccessHistory {
        &self.history
    }

    /// The previous demand address, when one has been latched.
    pub fn previous(&self) -> Option<usize> {
        self.prev
    }

    /// Number of references processed since construction or reset.
    pub fn references(&self) -> u64 {
        self.references
    }

    /// Address space size `N`.
    pub fn addr_space(&self) -> usize {
        self.addr_space
    }
}
