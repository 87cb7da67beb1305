//! Access tags, history entries, and per-reference prefetch events.
//!
//! This module defines the externally observable data model of the predictor:
//! 1. **Access Tags:** Whether a history entry was demanded by the caller or
//!    speculatively inserted by the predictor.
//! 2. **History Entries:** A tagged address plus the timestamp of its
//!    insertion into the access history.
//! 3. **Prefetch Events:** The complete classification and decision record
//!    emitted once per processed reference, identical between the sequential
//!    reference model and the staged sequencer.

use std::fmt;

use serde::Serialize;

/// Origin tag carried by every access-history entry.
///
/// A `Demand` entry was observed externally; a `Prefetch` entry was inserted
/// speculatively by the predictor. A prefetched entry that is later demanded
/// is promoted to `Demand` in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccessTag {
    /// The address was supplied by the caller as a demand reference.
    Demand,
    /// The address was inserted speculatively by the predictor.
    Prefetch,
}

impl fmt::Display for AccessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demand => write!(f, "D"),
            Self::Prefetch => write!(f, "P"),
        }
    }
}

/// One slot of the access history: an address, its origin tag, and the
/// reference index at which it was (re)inserted.
///
/// The timestamp is observability only; eviction order is positional and
/// never consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The recorded address.
    pub addr: usize,
    /// Demand or prefetch origin.
    pub tag: AccessTag,
    /// Reference index at insertion; monotonically non-decreasing along the
    /// history. Promotion preserves it, reinsertion refreshes it.
    pub timestamp: u64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.addr, self.tag, self.timestamp)
    }
}

/// Outcome record emitted for one processed demand reference.
///
/// Field invariants, maintained by both engine models:
/// - `hit` holds exactly when `prefetch_hit` or `demand_hit` holds, and the
///   two hit kinds are mutually exclusive.
/// - `prefetch_address` is `Some` exactly when `prefetch` is true, and then
///   names an address distinct from `address`.
/// - `history` is the state of the access history after all updates for this
///   reference, oldest entry first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrefetchEvent {
    /// The demand address that was processed.
    pub address: usize,
    /// Whether the address was found in the access history.
    pub hit: bool,
    /// Whether the address was found tagged `Prefetch` (a useful prefetch).
    pub prefetch_hit: bool,
    /// Whether the address was found tagged `Demand`.
    pub demand_hit: bool,
    /// Whether a speculative prefetch was issued for this reference.
    pub prefetch: bool,
    /// The prefetched address, present exactly when `prefetch` is true.
    pub prefetch_address: Option<usize>,
    /// Snapshot of the access history after all updates for this reference.
    pub history: Vec<HistoryEntry>,
}

impl PrefetchEvent {
    /// Short classification label for this event.
    pub fn outcome(&self) -> &'static str {
        if self.prefetch_hit {
            "prefetch-hit"
        } else if self.demand_hit {
            "demand-hit"
        } else {
            "miss"
        }
    }
}

impl fmt::Display for PrefetchEvent {
    /// Formats the event as a single log line: address, classification,
    /// prefetch decision, and the resulting history window.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr {:>3}  {:<12}", self.address, self.outcome())?;
        match self.prefetch_address {
            Some(target) => write!(f, "  prefetch -> {:>3}", target)?,
            None => write!(f, "  no prefetch     ")?,
        }
        write!(f, "  history [")?;
        for (i, entry) in self.history.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "]")
    }
}
