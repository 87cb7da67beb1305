//! Configuration system for the Markov prefetcher simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (address space, history
//!    window, counter width, pattern generation).
//! 2. **Structures:** Hierarchical config for the predictor and for the
//!    address pattern generator.
//! 3. **Validation:** Fail-fast rejection of degenerate parameters before
//!    any structure is allocated.
//!
//! Configuration is supplied via JSON (see the CLI's `--config`) or use
//! `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline predictor geometry and pattern shape
/// when not explicitly overridden.
mod defaults {
    /// Address space size `N`: addresses are drawn from `[0, N)`.
    ///
    /// 32 entries correspond to a 5-bit address, small enough that the
    /// full N×N transition table stays human-readable in dumps.
    pub const ADDR_SPACE: usize = 32;

    /// Access-history window `W` (entries retained between references).
    pub const HISTORY_WINDOW: usize = 5;

    /// Transition-counter width `B` in bits; counters saturate at
    /// `2^B − 1` (255 for the default width).
    pub const COUNTER_BITS: u32 = 8;

    /// Number of references generated per pattern run.
    pub const PATTERN_LENGTH: usize = 32;

    /// Stride used by the strided pattern.
    pub const PATTERN_STRIDE: usize = 2;

    /// Period of the repeated pattern (cycle of `0..period`).
    pub const PATTERN_PERIOD: usize = 6;

    /// Seed for the random pattern generator.
    pub const PATTERN_SEED: u64 = 1;
}

/// Address pattern shapes understood by the pattern generator.
///
/// Every pattern is deterministic given its configuration; `Random` draws
/// from a seeded generator so repeated runs reproduce the same stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PatternKind {
    /// Ascending addresses `0, 1, 2, ...` wrapping at the address space.
    #[default]
    Sequential,
    /// Constant-stride addresses `0, s, 2s, ...` wrapping at the address
    /// space.
    Strided,
    /// Pairwise-swapped sequential addresses `1, 0, 3, 2, ...`.
    Interleaved,
    /// A short cycle `0..period` repeated until the requested length.
    Repeated,
    /// Uniform random addresses from a seeded generator.
    Random,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use markov_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.predictor.addr_space, 32);
/// assert_eq!(config.predictor.window, 5);
/// ```
///
/// Deserializing from JSON (typical `--config` usage):
///
/// ```
/// use markov_core::config::{Config, PatternKind};
///
/// let json = r#"{
///     "predictor": {
///         "addr_space": 64,
///         "window": 8,
///         "counter_bits": 4
///     },
///     "pattern": {
///         "kind": "Strided",
///         "length": 100,
///         "stride": 3
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.predictor.addr_space, 64);
/// assert_eq!(config.pattern.kind, PatternKind::Strided);
/// assert_eq!(config.pattern.seed, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Predictor geometry (address space, window, counter width).
    #[serde(default)]
    pub predictor: PredictorConfig,
    /// Address pattern generation settings.
    #[serde(default)]
    pub pattern: PatternConfig,
}

/// Predictor geometry configuration.
///
/// All three parameters are fixed at construction time; every internal
/// structure scales with them.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Address space size `N`; valid addresses are `0..N`.
    #[serde(default = "PredictorConfig::default_addr_space")]
    pub addr_space: usize,

    /// Access-history window `W`; at most `W` entries are retained.
    #[serde(default = "PredictorConfig::default_window")]
    pub window: usize,

    /// Transition-counter width `B` in bits; counters saturate at
    /// `2^B − 1`.
    #[serde(default = "PredictorConfig::default_counter_bits")]
    pub counter_bits: u32,
}

impl PredictorConfig {
    /// Returns the default address space size.
    fn default_addr_space() -> usize {
        defaults::ADDR_SPACE
    }

    /// Returns the default history window size.
    fn default_window() -> usize {
        defaults::HISTORY_WINDOW
    }

    /// Returns the default counter width in bits.
    fn default_counter_bits() -> u32 {
        defaults::COUNTER_BITS
    }

    /// Checks the geometry for degenerate values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the address space or window is zero,
    /// or when the counter width falls outside `1..=16` bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addr_space == 0 {
            return Err(ConfigError::ZeroAddressSpace);
        }
        if self.window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.counter_bits == 0 || self.counter_bits > 16 {
            return Err(ConfigError::CounterWidth(self.counter_bits));
        }
        Ok(())
    }

    /// Maximum counter value implied by the configured width.
    pub fn counter_max(&self) -> u16 {
        ((1u32 << self.counter_bits) - 1) as u16
    }
}

impl Default for PredictorConfig {
    /// Creates the reference geometry: 32 addresses, a 5-entry window, and
    /// 8-bit saturating counters.
    fn default() -> Self {
        Self {
            addr_space: defaults::ADDR_SPACE,
            window: defaults::HISTORY_WINDOW,
            counter_bits: defaults::COUNTER_BITS,
        }
    }
}

/// Address pattern generation configuration.
///
/// Only the fields relevant to the selected [`PatternKind`] are consulted;
/// the rest are ignored (a `Sequential` run never reads `seed`).
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    /// Pattern shape to generate.
    #[serde(default)]
    pub kind: PatternKind,

    /// Number of references to generate.
    #[serde(default = "PatternConfig::default_length")]
    pub length: usize,

    /// Stride for the `Strided` pattern (zero is treated as one).
    #[serde(default = "PatternConfig::default_stride")]
    pub stride: usize,

    /// Period for the `Repeated` pattern (zero is treated as one).
    #[serde(default = "PatternConfig::default_period")]
    pub period: usize,

    /// Seed for the `Random` pattern.
    #[serde(default = "PatternConfig::default_seed")]
    pub seed: u64,
}

impl PatternConfig {
    /// Returns the default pattern length.
    fn default_length() -> usize {
        defaults::PATTERN_LENGTH
    }

    /// Returns the default stride.
    fn default_stride() -> usize {
        defaults::PATTERN_STRIDE
    }

    /// Returns the default repeat period.
    fn default_period() -> usize {
        defaults::PATTERN_PERIOD
    }

    /// Returns the default random seed.
    fn default_seed() -> u64 {
        defaults::PATTERN_SEED
    }
}

impl Default for PatternConfig {
    /// Creates a default pattern configuration: 32 sequential references.
    fn default() -> Self {
        Self {
            kind: PatternKind::default(),
            length: defaults::PATTERN_LENGTH,
            stride: defaults::PATTERN_STRIDE,
            period: defaults::PATTERN_PERIOD,
            seed: defaults::PATTERN_SEED,
        }
    }
}
