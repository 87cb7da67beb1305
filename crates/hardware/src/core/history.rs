//! Bounded, tagged access history.
//!
//! A FIFO window over the most recently seen addresses, each entry carrying
//! a demand/prefetch origin tag and its insertion timestamp. The window is
//! deduplicating: inserting an address that is already present removes the
//! old entry first and appends the new one at the tail, so a re-referenced
//! address moves to the most-recently-inserted position. Overflow evicts the
//! head, which is the oldest surviving insertion.
//!
//! Tag promotion rewrites a `Prefetch` entry to `Demand` in place, keeping
//! both its position and its timestamp; this is what distinguishes a useful
//! prefetch (later demanded) from cache pollution. The entries live in a
//! contiguous vector so promotion is a field store, not a queue rebuild.
//!
//! # Performance
//!
//! - **Time Complexity:** all operations O(W) linear scans
//! - **Space Complexity:** O(W), allocated once at construction
//! - **Hardware Cost:** Minimal - a W-deep CAM with one tag bit per entry

use crate::common::{AccessTag, HistoryEntry};

/// Deduplicating FIFO of tagged history entries, at most `W` deep.
#[derive(Clone, Debug)]
pub struct AccessHistory {
    /// Entries in insertion order; index 0 is the eviction candidate.
    entries: Vec<HistoryEntry>,
    /// Window size `W`.
    capacity: usize,
}

impl AccessHistory {
    /// Creates an empty history with the given window size.
    ///
    /// # Panics
    ///
    /// Panics when `window` is zero; config validation rejects this before
    /// construction.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "access history needs a nonzero window");
        Self {
            entries: Vec::with_capacity(window + 1),
            capacity: window,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Window size `W` this history was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `addr` is currently held, regardless of tag.
    pub fn contains(&self, addr: usize) -> bool {
        self.entries.iter().any(|entry| entry.addr == addr)
    }

    /// The tag of `addr` if present.
    pub fn find_tag(&self, addr: usize) -> Option<AccessTag> {
        self.entries
            .iter()
            .find(|entry| entry.addr == addr)
            .map(|entry| entry.tag)
    }

    /// Rewrites the tag of `addr` from `Prefetch` to `Demand` in place,
    /// preserving its position and timestamp.
    ///
    /// Returns `true` when a promotion happened; an absent address or one
    /// already tagged `Demand` is left untouched.
    pub fn promote_to_demand(&mut self, addr: usize) -> bool {
        for entry in &mut self.entries {
            if entry.addr == addr && entry.tag == AccessTag::Prefetch {
                entry.tag = AccessTag::Demand;
                return true;
            }
        }
        false
    }

    /// Inserts `addr` as a demand entry stamped with `timestamp`.
    ///
    /// An existing entry for `addr` (either tag) is removed first, so the
    /// address lands at the tail with the new tag and timestamp. Overflow
    /// evicts the head.
    pub fn insert_demand(&mut self, addr: usize, timestamp: u64) {
        self.insert(addr, AccessTag::Demand, timestamp);
    }

    /// Inserts `addr` as a speculative prefetch entry stamped with
    /// `timestamp`, with the same dedup-then-append semantics as
    /// [`insert_demand`](Self::insert_demand).
    pub fn insert_prefetch(&mut self, addr: usize, timestamp: u64) {
        self.insert(addr, AccessTag::Prefetch, timestamp);
    }

    /// Shared insert path: remove any stale entry, append at the tail,
    /// evict the head on overflow.
    fn insert(&mut self, addr: usize, tag: AccessTag, timestamp: u64) {
        if let Some(pos) = self.entries.iter().position(|entry| entry.addr == addr) {
            let _ = self.entries.remove(pos);
        }
        self.entries.push(HistoryEntry { addr, tag, timestamp });
        if self.entries.len() > self.capacity {
            let _ = self.entries.remove(0);
        }
    }

    /// Borrow of the entries in insertion order (oldest first).
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Owned copy of the entries for event emission.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Fixed-width view of the window: one slot per capacity entry, `None`
    /// for unoccupied slots. Matches the hardware presentation where the
    /// history is a `W`-deep register file with per-slot valid bits.
    pub fn slots(&self) -> Vec<Option<HistoryEntry>> {
        (0..self.capacity)
            .map(|i| self.entries.get(i).copied())
            .collect()
    }

    /// Empties the window back to the freshly constructed state.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
