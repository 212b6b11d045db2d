//! Synthetic trace generation
//!
//! One generator per reference pattern, used by the calibration tests and
//! the `generate` CLI command. All generators are deterministic for a given
//! seed and emit timestamps equal to the access index.

use crate::error::{MemGraphError, Result};
use crate::trace::{MemoryAccess, Operation, Trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Cache line size assumed by generators that think in lines
const LINE: u64 = 64;

/// Selectable synthetic pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticPattern {
    Sequential,
    Strided,
    Random,
    PointerChase,
    WorkingSet,
    ProducerConsumer,
}

impl SyntheticPattern {
    pub const ALL: [SyntheticPattern; 6] = [
        SyntheticPattern::Sequential,
        SyntheticPattern::Strided,
        SyntheticPattern::Random,
        SyntheticPattern::PointerChase,
        SyntheticPattern::WorkingSet,
        SyntheticPattern::ProducerConsumer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SyntheticPattern::Sequential => "sequential",
            SyntheticPattern::Strided => "strided",
            SyntheticPattern::Random => "random",
            SyntheticPattern::PointerChase => "pointer_chase",
            SyntheticPattern::WorkingSet => "working_set",
            SyntheticPattern::ProducerConsumer => "producer_consumer",
        }
    }

    /// Reference-pattern label this generator is calibrated against
    pub fn expected_label(&self) -> &'static str {
        match self {
            SyntheticPattern::Sequential => "SEQUENTIAL",
            SyntheticPattern::Strided => "STRIDED",
            SyntheticPattern::Random => "RANDOM",
            SyntheticPattern::PointerChase => "POINTER_CHASE",
            SyntheticPattern::WorkingSet => "WORKING_SET",
            SyntheticPattern::ProducerConsumer => "PRODUCER_CONSUMER",
        }
    }
}

impl std::str::FromStr for SyntheticPattern {
    type Err = MemGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(SyntheticPattern::Sequential),
            "strided" => Ok(SyntheticPattern::Strided),
            "random" => Ok(SyntheticPattern::Random),
            "pointer_chase" | "pointer-chase" => Ok(SyntheticPattern::PointerChase),
            "working_set" | "working-set" => Ok(SyntheticPattern::WorkingSet),
            "producer_consumer" | "producer-consumer" => Ok(SyntheticPattern::ProducerConsumer),
            other => Err(MemGraphError::config(format!(
                "unknown synthetic pattern: {other}"
            ))),
        }
    }
}

/// Generate `n` accesses of the given pattern with its default geometry
pub fn generate(pattern: SyntheticPattern, n: usize, seed: u64) -> Trace {
    match pattern {
        SyntheticPattern::Sequential => sequential(n, 0x1000, 4),
        SyntheticPattern::Strided => strided(n, 100, 100, 8, 0x1000),
        SyntheticPattern::Random => random(n, 1000, 0x1000, seed),
        SyntheticPattern::PointerChase => pointer_chase(n, 1000, 64, 0x10000, seed),
        SyntheticPattern::WorkingSet => working_set(n, 64, 0x1000),
        SyntheticPattern::ProducerConsumer => producer_consumer(n, 2, 0x1000, 0x8000),
    }
}

/// Linear scan: `start + i * stride`
pub fn sequential(n: usize, start: u64, stride: u64) -> Trace {
    let accesses = (0..n)
        .map(|i| MemoryAccess::read(start + i as u64 * stride, stride.min(64) as u32, i as u64))
        .collect();
    Trace::from_accesses(accesses, "<generated:sequential>", "synthetic")
}

/// Column-major walk over a row-major `rows x cols` matrix of
/// `elem_size`-byte elements: the canonical strided benchmark. Wraps around
/// until `n` accesses are emitted.
pub fn strided(n: usize, rows: u64, cols: u64, elem_size: u64, start: u64) -> Trace {
    let total = rows * cols;
    let accesses = (0..n)
        .map(|i| {
            let k = i as u64 % total;
            let (col, row) = (k / rows, k % rows);
            let addr = start + (row * cols + col) * elem_size;
            MemoryAccess::read(addr, elem_size as u32, i as u64)
        })
        .collect();
    Trace::from_accesses(accesses, "<generated:strided>", "synthetic")
}

/// Uniform random line picks over `distinct_lines` cache lines
pub fn random(n: usize, distinct_lines: u64, start: u64, seed: u64) -> Trace {
    let mut rng = StdRng::seed_from_u64(seed);
    let accesses = (0..n)
        .map(|i| {
            let line = rng.gen_range(0..distinct_lines);
            MemoryAccess::read(start + line * LINE, 8, i as u64)
        })
        .collect();
    Trace::from_accesses(accesses, "<generated:random>", "synthetic")
}

/// Linked-list search workload over a scrambled allocation.
///
/// `num_nodes` nodes of `node_size` bytes are laid out in shuffled order;
/// each search walks the list from the head to a random depth, the way list
/// lookups do, then the next search restarts at the head. The head region
/// ends up co-occurring with every search tail, which is what gives chased
/// structures their hub shape.
pub fn pointer_chase(n: usize, num_nodes: u64, node_size: u64, start: u64, seed: u64) -> Trace {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut slots: Vec<u64> = (0..num_nodes).collect();
    slots.shuffle(&mut rng);

    let mut accesses = Vec::with_capacity(n);
    let mut i = 0u64;
    while accesses.len() < n {
        let depth = rng.gen_range(1..=num_nodes) as usize;
        for &slot in slots.iter().take(depth) {
            if accesses.len() >= n {
                break;
            }
            accesses.push(MemoryAccess::read(start + slot * node_size, 8, i));
            i += 1;
        }
    }
    Trace::from_accesses(accesses, "<generated:pointer_chase>", "synthetic")
}

/// Tight loop over `resident_lines` distinct cache lines
pub fn working_set(n: usize, resident_lines: u64, start: u64) -> Trace {
    let accesses = (0..n)
        .map(|i| {
            let line = i as u64 % resident_lines;
            MemoryAccess::read(start + line * LINE, 8, i as u64)
        })
        .collect();
    Trace::from_accesses(accesses, "<generated:working_set>", "synthetic")
}

/// Two interleaved streams over swapped buffers: the producer writes its
/// slot, the consumer reads the matching slot of the other region.
pub fn producer_consumer(n: usize, slots: u64, producer_start: u64, consumer_start: u64) -> Trace {
    let accesses = (0..n)
        .map(|i| {
            let slot = (i as u64 / 2) % slots;
            if i % 2 == 0 {
                MemoryAccess::new(
                    Operation::Write,
                    producer_start + slot * LINE,
                    8,
                    i as u64,
                )
            } else {
                MemoryAccess::read(consumer_start + slot * LINE, 8, i as u64)
            }
        })
        .collect();
    Trace::from_accesses(accesses, "<generated:producer_consumer>", "synthetic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_addresses_and_stride() {
        let trace = sequential(10, 0x1000, 4);
        assert_eq!(trace.len(), 10);
        assert_eq!(trace.accesses[0].address, 0x1000);
        assert_eq!(trace.accesses[9].address, 0x1000 + 36);
        assert_eq!(trace.meta.unique_addresses, 10);
    }

    #[test]
    fn test_strided_column_major_steps() {
        // 4x4 matrix of 8-byte elements: column walk jumps a full row
        let trace = strided(8, 4, 4, 8, 0);
        assert_eq!(trace.accesses[0].address, 0);
        assert_eq!(trace.accesses[1].address, 32);
        assert_eq!(trace.accesses[2].address, 64);
        assert_eq!(trace.accesses[3].address, 96);
        // Next column starts one element over
        assert_eq!(trace.accesses[4].address, 8);
    }

    #[test]
    fn test_strided_wraps_around() {
        let trace = strided(40, 4, 4, 8, 0);
        assert_eq!(trace.accesses[16].address, trace.accesses[0].address);
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = random(100, 50, 0x1000, 9);
        let b = random(100, 50, 0x1000, 9);
        assert_eq!(a.accesses, b.accesses);
        let c = random(100, 50, 0x1000, 10);
        assert_ne!(a.accesses, c.accesses);
    }

    #[test]
    fn test_random_stays_in_line_range() {
        let trace = random(1000, 10, 0x1000, 1);
        for acc in trace.iter() {
            assert!(acc.address >= 0x1000);
            assert!(acc.address < 0x1000 + 10 * 64);
            assert_eq!((acc.address - 0x1000) % 64, 0);
        }
        assert!(trace.meta.unique_addresses <= 10);
    }

    #[test]
    fn test_pointer_chase_restarts_at_head() {
        let trace = pointer_chase(5000, 100, 64, 0x10000, 5);
        assert_eq!(trace.len(), 5000);
        // Every search begins at the same (shuffled) head node
        let head = trace.accesses[0].address;
        let head_visits = trace.iter().filter(|a| a.address == head).count();
        assert!(head_visits > 1, "head must be revisited across searches");
    }

    #[test]
    fn test_pointer_chase_uses_distinct_node_slots() {
        let trace = pointer_chase(10_000, 100, 64, 0x10000, 5);
        let distinct: HashSet<u64> = trace.iter().map(|a| a.address).collect();
        assert!(distinct.len() <= 100);
        for addr in distinct {
            assert_eq!((addr - 0x10000) % 64, 0);
        }
    }

    #[test]
    fn test_working_set_cycles_resident_lines() {
        let trace = working_set(640, 64, 0x1000);
        assert_eq!(trace.meta.unique_addresses, 64);
        assert_eq!(trace.accesses[0].address, trace.accesses[64].address);
    }

    #[test]
    fn test_producer_consumer_alternates_regions() {
        let trace = producer_consumer(8, 2, 0x1000, 0x8000);
        assert_eq!(trace.accesses[0].operation, Operation::Write);
        assert_eq!(trace.accesses[1].operation, Operation::Read);
        assert!(trace.accesses[0].address < 0x8000);
        assert!(trace.accesses[1].address >= 0x8000);
        // Two slots per side: four distinct lines total
        assert_eq!(trace.meta.unique_addresses, 4);
    }

    #[test]
    fn test_generate_dispatch_covers_all_patterns() {
        for pattern in SyntheticPattern::ALL {
            let trace = generate(pattern, 64, 0);
            assert_eq!(trace.len(), 64, "{} wrong length", pattern.name());
            assert!(trace.meta.source.contains(pattern.name()));
        }
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(
            "pointer_chase".parse::<SyntheticPattern>().unwrap(),
            SyntheticPattern::PointerChase
        );
        assert_eq!(
            "working-set".parse::<SyntheticPattern>().unwrap(),
            SyntheticPattern::WorkingSet
        );
        assert!("zigzag".parse::<SyntheticPattern>().is_err());
    }
}
