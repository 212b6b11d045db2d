//! Windowing strategies for co-occurrence edge emission
//!
//! A window strategy turns the coarsened access stream into a stream of
//! unordered node pairs. Three strategies are provided:
//!
//! - **Fixed**: the stream is cut into non-overlapping groups of `W`
//!   accesses; every unordered pair of distinct ids in a group co-occurs
//!   once per group.
//! - **Sliding**: a FIFO over the last `W` positions; a fresh arrival pairs
//!   once with each distinct id currently resident. An arrival whose id is
//!   already resident emits nothing: its pairs were counted when it entered
//!   the window, so duplicates within a window are counted once and
//!   contiguous identical accesses are silent.
//! - **Adaptive**: sliding with a self-adjusting `W`. Locality is the
//!   fraction of the last `W` arrivals that were already resident; above
//!   0.75 the window shrinks by one (min 2), below 0.25 it grows by one
//!   (max 4x the starting size). Adjustments happen between accesses.

use crate::coarsen::NodeId;
use crate::error::{MemGraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Locality above which the adaptive window shrinks
const ADAPTIVE_SHRINK_THRESHOLD: f64 = 0.75;
/// Locality below which the adaptive window grows
const ADAPTIVE_GROW_THRESHOLD: f64 = 0.25;

/// Selectable windowing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStrategy {
    /// Non-overlapping fixed-size groups
    Fixed,
    /// Overlapping lookback over the last W positions
    Sliding,
    /// Sliding with locality-driven window resizing
    Adaptive,
}

impl WindowStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            WindowStrategy::Fixed => "fixed",
            WindowStrategy::Sliding => "sliding",
            WindowStrategy::Adaptive => "adaptive",
        }
    }
}

impl std::str::FromStr for WindowStrategy {
    type Err = MemGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(WindowStrategy::Fixed),
            "sliding" => Ok(WindowStrategy::Sliding),
            "adaptive" => Ok(WindowStrategy::Adaptive),
            other => Err(MemGraphError::config(format!(
                "unknown window strategy: {other} (expected fixed, sliding, or adaptive)"
            ))),
        }
    }
}

/// Streaming pair emitter driven by the graph builder
#[derive(Debug)]
pub enum Windower {
    Fixed(FixedWindower),
    Sliding(SlidingWindower),
    Adaptive(AdaptiveWindower),
}

impl Windower {
    /// Create a windower, validating the window size
    pub fn new(strategy: WindowStrategy, window_size: usize) -> Result<Self> {
        if window_size < 2 {
            return Err(MemGraphError::config(format!(
                "window size must be >= 2, got {window_size}"
            )));
        }
        Ok(match strategy {
            WindowStrategy::Fixed => Windower::Fixed(FixedWindower::new(window_size)),
            WindowStrategy::Sliding => Windower::Sliding(SlidingWindower::new(window_size)),
            WindowStrategy::Adaptive => Windower::Adaptive(AdaptiveWindower::new(window_size)),
        })
    }

    /// Feed one coarsened access; co-occurring pairs go to `sink`
    pub fn push(&mut self, id: NodeId, sink: &mut dyn FnMut(NodeId, NodeId)) {
        match self {
            Windower::Fixed(w) => w.push(id, sink),
            Windower::Sliding(w) => w.push(id, sink),
            Windower::Adaptive(w) => w.push(id, sink),
        }
    }

    /// Signal end of stream; flushes any partial fixed window
    pub fn finish(&mut self, sink: &mut dyn FnMut(NodeId, NodeId)) {
        if let Windower::Fixed(w) = self {
            w.flush(sink);
        }
    }

    /// Current window size (changes over time for the adaptive strategy)
    pub fn current_window(&self) -> usize {
        match self {
            Windower::Fixed(w) => w.size,
            Windower::Sliding(w) => w.size,
            Windower::Adaptive(w) => w.current,
        }
    }
}

/// Counter plus an id set, cleared every W accesses
#[derive(Debug)]
pub struct FixedWindower {
    size: usize,
    seen: HashSet<NodeId>,
    filled: usize,
}

impl FixedWindower {
    fn new(size: usize) -> Self {
        Self {
            size,
            seen: HashSet::new(),
            filled: 0,
        }
    }

    fn push(&mut self, id: NodeId, sink: &mut dyn FnMut(NodeId, NodeId)) {
        self.seen.insert(id);
        self.filled += 1;
        if self.filled == self.size {
            self.flush(sink);
        }
    }

    /// Emit every unordered pair of distinct ids in the current group
    fn flush(&mut self, sink: &mut dyn FnMut(NodeId, NodeId)) {
        if self.seen.len() > 1 {
            let mut ids: Vec<NodeId> = self.seen.iter().copied().collect();
            ids.sort_unstable();
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    sink(ids[i], ids[j]);
                }
            }
        }
        self.seen.clear();
        self.filled = 0;
    }
}

/// Ring buffer of the last W positions with O(1) residency tests
#[derive(Debug)]
pub struct SlidingWindower {
    size: usize,
    /// Previous W-1 positions in arrival order
    fifo: VecDeque<NodeId>,
    /// Occupancy count per id currently in the FIFO
    resident: HashMap<NodeId, u32>,
}

impl SlidingWindower {
    fn new(size: usize) -> Self {
        Self {
            size,
            fifo: VecDeque::with_capacity(size),
            resident: HashMap::new(),
        }
    }

    /// Whether `id` is currently in the lookback window
    fn is_resident(&self, id: NodeId) -> bool {
        self.resident.get(&id).copied().unwrap_or(0) > 0
    }

    fn push(&mut self, id: NodeId, sink: &mut dyn FnMut(NodeId, NodeId)) {
        self.push_with_lookback(id, self.size - 1, sink);
    }

    /// Pair a fresh arrival with every distinct resident id, then advance
    /// the FIFO keeping at most `lookback` previous positions.
    fn push_with_lookback(
        &mut self,
        id: NodeId,
        lookback: usize,
        sink: &mut dyn FnMut(NodeId, NodeId),
    ) -> bool {
        let hit = self.is_resident(id);
        if !hit {
            for &other in self.resident.keys() {
                if other != id {
                    sink(id, other);
                }
            }
        }

        self.fifo.push_back(id);
        *self.resident.entry(id).or_insert(0) += 1;
        self.trim_to(lookback);
        hit
    }

    fn trim_to(&mut self, lookback: usize) {
        while self.fifo.len() > lookback {
            if let Some(old) = self.fifo.pop_front() {
                if let Some(count) = self.resident.get_mut(&old) {
                    *count -= 1;
                    if *count == 0 {
                        self.resident.remove(&old);
                    }
                }
            }
        }
    }
}

/// Sliding windower whose size tracks stream locality
#[derive(Debug)]
pub struct AdaptiveWindower {
    inner: SlidingWindower,
    current: usize,
    min: usize,
    max: usize,
    /// Resident-id hits among the arrivals since the last adjustment
    hits: usize,
    arrivals: usize,
}

impl AdaptiveWindower {
    fn new(base: usize) -> Self {
        Self {
            inner: SlidingWindower::new(base),
            current: base,
            min: 2,
            max: base * 4,
            hits: 0,
            arrivals: 0,
        }
    }

    fn push(&mut self, id: NodeId, sink: &mut dyn FnMut(NodeId, NodeId)) {
        let hit = self
            .inner
            .push_with_lookback(id, self.current - 1, sink);
        if hit {
            self.hits += 1;
        }
        self.arrivals += 1;

        // One adjustment per current-window-size worth of arrivals, applied
        // between accesses.
        if self.arrivals >= self.current {
            let locality = self.hits as f64 / self.arrivals as f64;
            if locality > ADAPTIVE_SHRINK_THRESHOLD {
                self.current = (self.current - 1).max(self.min);
                self.inner.trim_to(self.current - 1);
            } else if locality < ADAPTIVE_GROW_THRESHOLD {
                self.current = (self.current + 1).min(self.max);
            }
            self.hits = 0;
            self.arrivals = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_pairs(
        strategy: WindowStrategy,
        window: usize,
        ids: &[NodeId],
    ) -> Vec<(NodeId, NodeId)> {
        let mut w = Windower::new(strategy, window).unwrap();
        let mut pairs = Vec::new();
        let mut sink = |a: NodeId, b: NodeId| {
            pairs.push(if a < b { (a, b) } else { (b, a) });
        };
        for &id in ids {
            w.push(id, &mut sink);
        }
        w.finish(&mut sink);
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn test_window_size_below_two_rejected() {
        assert!(Windower::new(WindowStrategy::Fixed, 1).is_err());
        assert!(Windower::new(WindowStrategy::Sliding, 0).is_err());
        assert!(Windower::new(WindowStrategy::Adaptive, 1).is_err());
        assert!(Windower::new(WindowStrategy::Sliding, 2).is_ok());
    }

    #[test]
    fn test_fixed_window_pairs_within_group() {
        // Groups: [1,2,3] and [4,5,6]
        let pairs = collect_pairs(WindowStrategy::Fixed, 3, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3), (4, 5), (4, 6), (5, 6)]);
    }

    #[test]
    fn test_fixed_window_duplicates_count_once_per_window() {
        // The pair (1,2) appears once even though both ids repeat in the group
        let pairs = collect_pairs(WindowStrategy::Fixed, 4, &[1, 2, 1, 2]);
        assert_eq!(pairs, vec![(1, 2)]);
    }

    #[test]
    fn test_fixed_window_flushes_partial_tail() {
        let pairs = collect_pairs(WindowStrategy::Fixed, 4, &[1, 2, 3, 4, 5, 6]);
        // [1,2,3,4] full group plus [5,6] tail
        assert!(pairs.contains(&(5, 6)));
        assert_eq!(pairs.len(), 7);
    }

    #[test]
    fn test_fixed_window_single_id_group_emits_nothing() {
        let pairs = collect_pairs(WindowStrategy::Fixed, 3, &[7, 7, 7]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_sliding_pairs_with_lookback() {
        // W=2: each access pairs with its single predecessor
        let pairs = collect_pairs(WindowStrategy::Sliding, 2, &[1, 2, 3]);
        assert_eq!(pairs, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_sliding_wider_lookback() {
        // W=3: lookback of 2
        let pairs = collect_pairs(WindowStrategy::Sliding, 3, &[1, 2, 3, 4]);
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_sliding_contiguous_identical_emits_nothing() {
        let pairs = collect_pairs(WindowStrategy::Sliding, 3, &[1, 1, 1, 1]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_sliding_resident_arrival_is_silent() {
        // Second 1 arrives while 1 is still resident: no new pairs, and the
        // pair (1,2) is not double counted for this residency.
        let pairs = collect_pairs(WindowStrategy::Sliding, 4, &[1, 2, 1, 3]);
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_sliding_reentry_after_eviction_pairs_again() {
        // W=2 lookback 1: 1 leaves the window, then pairs with 2 again
        let pairs = collect_pairs(WindowStrategy::Sliding, 2, &[1, 2, 1, 2]);
        assert_eq!(pairs, vec![(1, 2), (1, 2), (1, 2)]);
    }

    #[test]
    fn test_sliding_weight_semantics_order_independent_edges() {
        // Same multiset of windows, different arrival interleave: same edges
        let a = collect_pairs(WindowStrategy::Sliding, 3, &[1, 2, 3]);
        let b = collect_pairs(WindowStrategy::Sliding, 3, &[3, 2, 1]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_adaptive_starts_at_base_size() {
        let w = Windower::new(WindowStrategy::Adaptive, 10).unwrap();
        assert_eq!(w.current_window(), 10);
    }

    #[test]
    fn test_adaptive_shrinks_on_high_locality() {
        let mut w = Windower::new(WindowStrategy::Adaptive, 4).unwrap();
        let mut sink = |_: NodeId, _: NodeId| {};
        // Two ids cycled: every arrival after the first two is resident
        for _ in 0..40 {
            w.push(1, &mut sink);
            w.push(2, &mut sink);
        }
        assert!(w.current_window() < 4);
        assert!(w.current_window() >= 2);
    }

    #[test]
    fn test_adaptive_grows_on_low_locality() {
        let mut w = Windower::new(WindowStrategy::Adaptive, 4).unwrap();
        let mut sink = |_: NodeId, _: NodeId| {};
        // Fresh id every arrival: locality stays zero
        for id in 0..200u64 {
            w.push(id, &mut sink);
        }
        assert!(w.current_window() > 4);
        assert!(w.current_window() <= 16, "capped at 4x base");
    }

    #[test]
    fn test_adaptive_never_shrinks_below_two() {
        let mut w = Windower::new(WindowStrategy::Adaptive, 2).unwrap();
        let mut sink = |_: NodeId, _: NodeId| {};
        for _ in 0..100 {
            w.push(9, &mut sink);
        }
        assert_eq!(w.current_window(), 2);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            "sliding".parse::<WindowStrategy>().unwrap(),
            WindowStrategy::Sliding
        );
        assert_eq!(
            "Fixed".parse::<WindowStrategy>().unwrap(),
            WindowStrategy::Fixed
        );
        assert!("hopping".parse::<WindowStrategy>().is_err());
    }
}
