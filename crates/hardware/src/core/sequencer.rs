//! Staged state-machine model of the Markov prefetcher.
//!
//! The same decision sequence as the reference model, spread over six
//! ordered phases so the implementation maps onto a clocked hardware
//! pipeline. One `step()` call performs the work of the current phase and
//! advances to the next; one full traversal (Idle through `ReportResult`
//! and back) processes exactly one demand reference, never stalling:
//!
//! | Phase              | Index | Action                                       |
//! |--------------------|-------|----------------------------------------------|
//! | `Idle`             | 0     | Latch the presented address                  |
//! | `FindHit`          | 1     | Classify against the history; promote tag    |
//! | `UpdateHistory1`   | 2     | Learn on miss; insert the demand             |
//! | `FindMostProbable` | 3     | Argmax over the demand's transition row      |
//! | `UpdateHistory2`   | 4     | Guarded prefetch insert; set outputs         |
//! | `ReportResult`     | 5     | Outputs stable; latch prev; return to Idle   |
//!
//! Outputs for the current reference are only guaranteed valid while the
//! machine sits in `ReportResult`; earlier phases expose intermediate values
//! through [`Sequencer::probe`] for debugging only. For any input sequence
//! the event stream sampled at `ReportResult` equals the reference model's.

use serde::Serialize;
use tracing::trace;

use crate::common::{AccessTag, ConfigError, HistoryEntry, PrefetchEvent};
use crate::config::PredictorConfig;
use crate::core::history::AccessHistory;
use crate::core::table::TransitionTable;

/// The six sequencer phases, in traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    /// Waiting for an address to be presented.
    #[default]
    Idle,
    /// Scanning the history for the latched address.
    FindHit,
    /// Learning the missed edge and inserting the demand.
    UpdateHistory1,
    /// Computing the most probable successor.
    FindMostProbable,
    /// Inserting the prefetch candidate when it is absent from the history.
    UpdateHistory2,
    /// Holding stable outputs for the caller to sample.
    ReportResult,
}

impl Phase {
    /// Numeric phase index, 0 through 5 in traversal order.
    pub const fn index(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::FindHit => 1,
            Self::UpdateHistory1 => 2,
            Self::FindMostProbable => 3,
            Self::UpdateHistory2 => 4,
            Self::ReportResult => 5,
        }
    }
}

/// Observability snapshot of the sequencer's registers and structures.
///
/// Built on demand by [`Sequencer::probe`]; owning copies keep the probe
/// free of aliases into the mutable machine state. Fields other than the
/// phase and cycle counter carry reference-level meaning only while the
/// machine is in `ReportResult`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SequencerProbe {
    /// Current phase.
    pub phase: Phase,
    /// Numeric index of the current phase (0..=5).
    pub phase_index: u8,
    /// Micro-steps executed since construction or reset.
    pub cycles: u64,
    /// References completed since construction or reset.
    pub references: u64,
    /// Latched demand address, when one is in flight.
    pub current: Option<usize>,
    /// Previous-reference latch.
    pub previous: Option<usize>,
    /// Most probable successor computed for the in-flight reference.
    pub predicted: Option<usize>,
    /// Whether the predicted address was already held by the history at
    /// decision time.
    pub predicted_in_history: bool,
    /// The history window as `W` slots with per-slot validity.
    pub history: Vec<Option<HistoryEntry>>,
    /// Full transition-table snapshot.
    pub table: Vec<Vec<u16>>,
}

/// Clock-steppable Markov prefetcher.
///
/// Construct, [`present`](Self::present) an address, then call
/// [`step`](Self::step) until it yields the reference's [`PrefetchEvent`]
/// (exactly six micro-steps), or use [`process`](Self::process) to run a
/// full traversal at once.
#[derive(Clone, Debug)]
pub struct Sequencer {
    /// Transition-count matrix (shared semantics with the reference model).
    table: TransitionTable,
    /// Tagged recency window.
    history: AccessHistory,
    /// Address space size `N`.
    addr_space: usize,

    /// Current phase.
    phase: Phase,
    /// Micro-step counter; increments once per state advance.
    cycles: u64,
    /// Completed-reference counter; doubles as the timestamp source.
    references: u64,

    /// Address presented while Idle, waiting to be latched.
    input: Option<usize>,
    /// Latched demand address for the in-flight reference.
    current: Option<usize>,
    /// Previous-reference latch.
    prev: Option<usize>,

    /// Classification registers for the in-flight reference.
    hit: bool,
    prefetch_hit: bool,
    demand_hit: bool,
    /// Prediction registers for the in-flight reference.
    predicted: Option<usize>,
    predicted_in_history: bool,
    prefetch_address: Option<usize>,
}

impl Sequencer {
    /// Builds a sequencer from validated geometry.
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
            addr_space: config.addr_space,
            phase: Phase::Idle,
            cycles: 0,
            references: 0,
            input: None,
            current: None,
            prev: None,
            hit: false,
            prefetch_hit: false,
            demand_hit: false,
            predicted: None,
            predicted_in_history: false,
            prefetch_address: None,
        })
    }

    /// Presents the next demand address to the Idle machine.
    ///
    /// # Panics
    ///
    /// Panics when the machine is mid-traversal or when `address` is
    /// outside `0..N`; both are programming errors.
    pub fn present(&mut self, address: usize) {
        assert!(
            self.phase == Phase::Idle,
            "address presented in phase {:?}, machine accepts input only while Idle",
            self.phase
        );
        assert!(
            address < self.addr_space,
            "address {address} out of range 0..{}",
            self.addr_space
        );
        self.input = Some(address);
    }

    /// Executes the current phase and advances the machine by one
    /// micro-step.
    ///
    /// Returns the reference's event when the step just executed
    /// `ReportResult`; all other steps return `None`. Stepping an Idle
    /// machine with no presented address is a no-op and does not advance
    /// the cycle counter.
    pub fn step(&mut self) -> Option<PrefetchEvent> {
        match self.phase {
            Phase::Idle => {
                let Some(address) = self.input.take() else {
                    return None;
                };
                self.current = Some(address);
                self.hit = false;
                self.prefetch_hit = false;
                self.demand_hit = false;
                self.predicted = None;
                self.predicted_in_history = false;
                self.prefetch_address = None;
                self.advance(Phase::FindHit);
                None
            }
            Phase::FindHit => {
                if let Some(address) = self.current {
                    let found = self.history.find_tag(address);
                    self.prefetch_hit = found == Some(AccessTag::Prefetch);
                    self.demand_hit = found == Some(AccessTag::Demand);
                    self.hit = self.prefetch_hit || self.demand_hit;
                    if self.prefetch_hit {
                        let promoted = self.history.promote_to_demand(address);
                        debug_assert!(promoted, "prefetch-hit entry must be promotable");
                    }
                }
                self.advance(Phase::UpdateHistory1);
                None
            }
            Phase::UpdateHistory1 => {
                if let Some(address) = self.current {
                    if !self.hit {
                        if let Some(prev) = self.prev {
                            self.table.observe(prev, address);
                        }
                    }
                    self.history.insert_demand(address, self.references);
                }
                self.advance(Phase::FindMostProbable);
                None
            }
            Phase::FindMostProbable => {
                if let Some(address) = self.current {
                    self.predicted = self.table.most_probable_successor(address);
                }
                self.advance(Phase::UpdateHistory2);
                None
            }
            Phase::UpdateHistory2 => {
                if let Some(candidate) = self.predicted {
                    self.predicted_in_history = self.history.contains(candidate);
                    if !self.predicted_in_history {
                        self.history.insert_prefetch(candidate, self.references);
                        self.prefetch_address = Some(candidate);
                    }
                }
                self.advance(Phase::ReportResult);
                None
            }
            Phase::ReportResult => {
                let event = self.sample();
                self.prev = self.current;
                self.references += 1;
                self.advance(Phase::Idle);
                Some(event)
            }
        }
    }

    /// Runs one full traversal for `address`: present plus six micro-steps.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`present`](Self::present).
    pub fn process(&mut self, address: usize) -> PrefetchEvent {
        self.present(address);
        loop {
            if let Some(event) = self.step() {
                return event;
            }
        }
    }

    /// Builds the event for the in-flight reference from the output
    /// registers. Only meaningful in `ReportResult`.
    fn sample(&self) -> PrefetchEvent {
        PrefetchEvent {
            address: self.current.unwrap_or(0),
            hit: self.hit,
            prefetch_hit: self.prefetch_hit,
            demand_hit: self.demand_hit,
            prefetch: self.prefetch_address.is_some(),
            prefetch_address: self.prefetch_address,
            history: self.history.snapshot(),
        }
    }

    /// Advances to `next` and counts the micro-step.
    fn advance(&mut self, next: Phase) {
        trace!(from = ?self.phase, to = ?next, cycle = self.cycles, "sequencer advance");
        self.phase = next;
        self.cycles += 1;
    }

    /// Current phase of the machine.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Micro-steps executed since construction or reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// References completed since construction or reset.
    pub fn references(&self) -> u64 {
        self.references
    }

    /// Address space size `N`.
    pub fn addr_space(&self) -> usize {
        self.addr_space
    }

    /// Read-only view of the transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Read-only view of the access history.
    pub fn history(&self) -> &AccessHistory {
        &self.history
    }

    /// Captures the full observability surface as an owned snapshot.
    pub fn probe(&self) -> SequencerProbe {
        SequencerProbe {
            phase: self.phase,
            phase_index: self.phase.index(),
            cycles: self.cycles,
            references: self.references,
            current: self.current,
            previous: self.prev,
            predicted: self.predicted,
            predicted_in_history: self.predicted_in_history,
            history: self.history.slots(),
            table: self.table.snapshot(),
        }
    }

    /// Restores the freshly constructed state: zeroed structures, Idle
    /// phase, cycle and reference counters at zero, all latches invalid.
    pub fn reset(&mut self) {
        self.table.reset();
        self.history.reset();
        self.phase = Phase::Idle;
        self.cycles = 0;
        self.references = 0;
        self.input = None;
        self.current = None;
        self.prev = None;
        self.hit = false;
        self.prefetch_hit = false;
        self.demand_hit = false;
        self.predicted = None;
        self.predicted_in_history = false;
        self.prefetch_address = None;
    }
}
