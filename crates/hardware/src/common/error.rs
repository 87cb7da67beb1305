//! Configuration error definitions.
//!
//! The decision engine itself has no recoverable error conditions: counter
//! saturation clamps silently, an empty transition row simply yields no
//! prediction, and a predicted address already held in the history suppresses
//! the prefetch. The only fallible surface is construction, where degenerate
//! parameters are rejected before any structure is allocated. Out-of-range
//! addresses on the hot path are programming errors and fail fast at the
//! boundary instead of being reported through `Result`.

use thiserror::Error;

/// Errors produced while validating predictor construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The address space size `N` was zero; the transition table and every
    /// address-indexed structure would be empty.
    #[error("address space size must be nonzero")]
    ZeroAddressSpace,

    /// The history window `W` was zero; every insertion would evict itself.
    #[error("history window must be nonzero")]
    ZeroWindow,

    /// The counter width `B` was outside the supported `1..=16` bit range.
    #[error("counter width must be between 1 and 16 bits, got {0}")]
    CounterWidth(u32),
}
