//! Decision engine of the Markov prefetcher.
//!
//! This module contains the two learning structures and the two engine
//! models built on top of them:
//! 1. **Transition Table:** saturating first-order transition counters.
//! 2. **Access History:** bounded, tagged, deduplicating recency window.
//! 3. **Reference Model:** the whole decision sequence in one call.
//! 4. **Sequencer:** the same sequence as a six-phase clocked machine.

/// Sequential reference model (one event per call).
pub mod engine;

/// Bounded tagged access history.
pub mod history;

/// Staged six-phase state machine.
pub mod sequencer;

/// Saturating Markov transition table.
pub mod table;

pub use self::engine::MarkovPredictor;
pub use self::history::AccessHistory;
pub use self::sequencer::{Phase, Sequencer, SequencerProbe};
pub use self::table::TransitionTable;
