//! Simulation statistics collection and reporting.
//!
//! This module tracks outcome metrics for the Markov prefetcher. It
//! provides:
//! 1. **Reference classification:** hit/miss counts, split into demand
//!    hits and prefetch hits.
//! 2. **Prefetch activity:** issued prefetches and the share that was
//!    later demanded (accuracy).
//! 3. **Learning activity:** transitions recorded into the table.

use serde::Serialize;

use crate::common::PrefetchEvent;

/// Outcome statistics accumulated over a simulation run.
///
/// Counters are derived entirely from the emitted event stream, so the
/// reference and staged models produce identical statistics for the same
/// input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrefetchStats {
    /// Total demand references processed.
    pub references: u64,
    /// References found in the access history (either tag).
    pub hits: u64,
    /// References absent from the access history.
    pub misses: u64,
    /// Hits on entries tagged `Demand`.
    pub demand_hits: u64,
    /// Hits on entries tagged `Prefetch` (useful prefetches).
    pub prefetch_hits: u64,
    /// Speculative prefetches issued.
    pub prefetches_issued: u64,
    /// Edges counted into the transition table (misses with a valid
    /// previous address).
    pub transitions_learned: u64,
}

impl PrefetchStats {
    /// Folds one event into the counters.
    pub fn record(&mut self, event: &PrefetchEvent) {
        // A miss learns an edge whenever a previous reference exists,
        // which is every reference but the first.
        if !event.hit && self.references > 0 {
            self.transitions_learned += 1;
        }
        self.references += 1;
        if event.hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if event.demand_hit {
            self.demand_hits += 1;
        }
        if event.prefetch_hit {
            self.prefetch_hits += 1;
        }
        if event.prefetch {
            self.prefetches_issued += 1;
        }
    }

    /// Fraction of references that hit, in `[0, 1]`; zero for an empty run.
    pub fn hit_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.hits as f64 / self.references as f64
        }
    }

    /// Fraction of issued prefetches that were later demanded, in `[0, 1]`;
    /// zero when nothing was issued.
    pub fn prefetch_accuracy(&self) -> f64 {
        if self.prefetches_issued == 0 {
            0.0
        } else {
            self.prefetch_hits as f64 / self.prefetches_issued as f64
        }
    }

    /// Prints the full statistics report to stdout.
    pub fn print(&self) {
        let refs = if self.references == 0 { 1 } else { self.references };
        println!("\n==========================================================");
        println!("MARKOV PREFETCHER SIMULATION STATISTICS");
        println!("==========================================================");
        println!("references               {}", self.references);
        println!(
            "hits                     {} ({:.2}%)",
            self.hits,
            (self.hits as f64 / refs as f64) * 100.0
        );
        println!(
            "misses                   {} ({:.2}%)",
            self.misses,
            (self.misses as f64 / refs as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("hits.demand              {}", self.demand_hits);
        println!("hits.prefetch            {}", self.prefetch_hits);
        println!("prefetch.issued          {}", self.prefetches_issued);
        println!(
            "prefetch.accuracy        {:.2}%",
            self.prefetch_accuracy() * 100.0
        );
        println!("table.edges_learned      {}", self.transitions_learned);
        println!("==========================================================");
    }
}
