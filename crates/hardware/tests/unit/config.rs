//! Configuration Tests.
//!
//! Verifies default values, JSON deserialization with partial overrides,
//! and fail-fast validation of degenerate geometries.

use markov_core::common::ConfigError;
use markov_core::config::{Config, PatternKind, PredictorConfig};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// The default geometry is the reference design: N=32, W=5, B=8.
#[test]
fn default_geometry_is_reference_design() {
    let config = Config::default();
    assert_eq!(config.predictor.addr_space, 32);
    assert_eq!(config.predictor.window, 5);
    assert_eq!(config.predictor.counter_bits, 8);
    assert_eq!(config.pattern.kind, PatternKind::Sequential);
    assert!(config.predictor.validate().is_ok());
}

/// The counter ceiling follows the configured width.
#[test]
fn counter_max_follows_width() {
    let mut predictor = PredictorConfig::default();
    assert_eq!(predictor.counter_max(), 255);
    predictor.counter_bits = 4;
    assert_eq!(predictor.counter_max(), 15);
    predictor.counter_bits = 16;
    assert_eq!(predictor.counter_max(), 65535);
    predictor.counter_bits = 1;
    assert_eq!(predictor.counter_max(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. JSON deserialization
// ══════════════════════════════════════════════════════════

/// Partial JSON fills unspecified fields from the defaults.
#[test]
fn partial_json_uses_defaults() {
    let json = r#"{ "predictor": { "window": 9 } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.predictor.window, 9);
    assert_eq!(config.predictor.addr_space, 32);
    assert_eq!(config.pattern.length, 32);
}

/// Pattern kinds deserialize from their PascalCase names.
#[test]
fn pattern_kind_parses_pascal_case() {
    let json = r#"{ "pattern": { "kind": "Interleaved", "length": 12 } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.pattern.kind, PatternKind::Interleaved);
    assert_eq!(config.pattern.length, 12);
}

/// An empty object is a complete default configuration.
#[test]
fn empty_json_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.predictor.addr_space, 32);
    assert_eq!(config.pattern.seed, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

/// A zero address space is rejected.
#[test]
fn zero_addr_space_rejected() {
    let predictor = PredictorConfig {
        addr_space: 0,
        ..PredictorConfig::default()
    };
    assert_eq!(predictor.validate(), Err(ConfigError::ZeroAddressSpace));
}

/// A zero window is rejected.
#[test]
fn zero_window_rejected() {
    let predictor = PredictorConfig {
        window: 0,
        ..PredictorConfig::default()
    };
    assert_eq!(predictor.validate(), Err(ConfigError::ZeroWindow));
}

/// Counter widths outside 1..=16 bits are rejected.
#[test]
fn counter_width_bounds_rejected() {
    let mut predictor = PredictorConfig::default();
    predictor.counter_bits = 0;
    assert_eq!(predictor.validate(), Err(ConfigError::CounterWidth(0)));
    predictor.counter_bits = 17;
    assert_eq!(predictor.validate(), Err(ConfigError::CounterWidth(17)));
    predictor.counter_bits = 16;
    assert!(predictor.validate().is_ok());
}
