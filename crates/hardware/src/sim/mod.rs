//! Simulation driver: feeds address streams through a chosen engine model.
//!
//! Owns one decision engine (reference or staged) together with the run
//! statistics, so callers pick a model once and stream addresses through
//! it. The two models are interchangeable here by contract: for the same
//! input stream they emit identical events, differing only in the staged
//! model's cycle accounting.

/// Address pattern generation.
pub mod patterns;

use serde::Deserialize;

use crate::common::{ConfigError, PrefetchEvent};
use crate::config::PredictorConfig;
use crate::core::engine::MarkovPredictor;
use crate::core::sequencer::Sequencer;
use crate::stats::PrefetchStats;

/// Which engine model drives a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Model {
    /// Sequential reference model (one step per reference).
    #[default]
    Reference,
    /// Staged six-phase sequencer (six micro-steps per reference).
    Staged,
}

/// Type-erased engine storage for the non-generic simulation driver.
#[derive(Clone, Debug)]
enum EngineDispatch {
    /// Sequential reference model.
    Reference(MarkovPredictor),
    /// Staged sequencer.
    Staged(Sequencer),
}

/// Top-level simulation: one engine model plus run statistics.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// The engine processing references.
    engine: EngineDispatch,
    /// Statistics accumulated over every processed reference.
    stats: PrefetchStats,
}

impl Simulation {
    /// Creates a simulation around the selected engine model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the predictor geometry is degenerate.
    pub fn new(config: &PredictorConfig, model: Model) -> Result<Self, ConfigError> {
        let engine = match model {
            Model::Reference => EngineDispatch::Reference(MarkovPredictor::new(config)?),
            Model::Staged => EngineDispatch::Staged(Sequencer::new(config)?),
        };
        Ok(Self {
            engine,
            stats: PrefetchStats::default(),
        })
    }

    /// Processes one demand reference, recording it in the statistics.
    ///
    /// # Panics
    ///
    /// Panics when `address` is outside the configured address space.
    pub fn access(&mut self, address: usize) -> PrefetchEvent {
        let event = match &mut self.engine {
            EngineDispatch::Reference(predictor) => predictor.access(address),
            EngineDispatch::Staged(sequencer) => sequencer.process(address),
        };
        self.stats.record(&event);
        event
    }

    /// Runs a whole address stream, returning the event per reference.
    ///
    /// # Panics
    ///
    /// Panics when any address is outside the configured address space.
    pub fn run(&mut self, addresses: &[usize]) -> Vec<PrefetchEvent> {
        addresses.iter().map(|&addr| self.access(addr)).collect()
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    /// Full transition-table snapshot of the underlying engine.
    pub fn table_snapshot(&self) -> Vec<Vec<u16>> {
        match &self.engine {
            EngineDispatch::Reference(predictor) => predictor.table().snapshot(),
            EngineDispatch::Staged(sequencer) => sequencer.table().snapshot(),
        }
    }

    /// Micro-steps consumed so far; `None` for the reference model, which
    /// has no cycle notion.
    pub fn cycles(&self) -> Option<u64> {
        match &self.engine {
            EngineDispatch::Reference(_) => None,
            EngineDispatch::Staged(sequencer) => Some(sequencer.cycles()),
        }
    }

    /// Resets the engine and the statistics to the fresh state.
    pub fn reset(&mut self) {
        match &mut self.engine {
            EngineDispatch::Reference(predictor) => predictor.reset(),
            EngineDispatch::Staged(sequencer) => sequencer.reset(),
        }
        self.stats = PrefetchStats::default();
    }
}
