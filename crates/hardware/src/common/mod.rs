//! Common types shared throughout the Markov prefetcher simulator.
//!
//! This module provides the fundamental building blocks shared by both
//! decision-engine models and by the driver layers. It includes:
//! 1. **Event Model:** Access tags, tagged history entries, and the
//!    per-reference `PrefetchEvent` outcome record.
//! 2. **Error Handling:** Construction-time configuration errors.

/// Error types for configuration validation.
pub mod error;

/// Access tags, history entries, and per-reference events.
pub mod event;

pub use error::ConfigError;
pub use event::{AccessTag, HistoryEntry, PrefetchEvent};
