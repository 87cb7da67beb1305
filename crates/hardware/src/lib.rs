//! Markov prefetcher simulator library.
//!
//! This crate implements a deterministic, hardware-style Markov address
//! predictor with the following:
//! 1. **Core:** saturating N×N transition table, bounded tagged access
//!    history, the per-reference classifier, and two interchangeable
//!    engine models (sequential reference model and six-phase sequencer).
//! 2. **Events:** one [`common::PrefetchEvent`] per processed reference,
//!    identical across both models for the same input stream.
//! 3. **Simulation:** `Simulation` driver, address pattern generation, and
//!    configuration.
//! 4. **Statistics:** hit/miss, prefetch accuracy, and learning counters.

/// Common types (access tags, history entries, events, errors).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Decision engine (transition table, history, both engine models).
pub mod core;
/// Simulation driver and address pattern generation.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Sequential reference model; one event per `access` call.
pub use crate::core::engine::MarkovPredictor;
/// Staged six-phase model; one event per full traversal.
pub use crate::core::sequencer::Sequencer;
/// Top-level simulation driver; owns an engine model plus statistics.
pub use crate::sim::Simulation;
