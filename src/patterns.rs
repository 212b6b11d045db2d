//! Reference access patterns
//!
//! Each pattern pairs a name with a canonical graphlet signature, the
//! characteristics a human would look for, and optimization advice. The
//! vectors are data: each one was recorded from the graphlet composition the
//! matching synthetic benchmark induces under the default construction
//! (derivations in DESIGN.md), and the calibration tests re-check the match
//! end to end.
//!
//! Signature intuition per pattern:
//! - SEQUENTIAL: a scan revisits nothing; each fresh cache line overlaps the
//!   tail of the window, a narrow band graph rich in 3-paths and tailed
//!   triangles.
//! - STRIDED: fixed skips alternate between two adjacent line strides; the
//!   resulting two-stride circulant carries open paths, claws, and the only
//!   chordless-square content outside producer/consumer.
//! - RANDOM: co-occurrence is coincidence; surviving edges are scattered and
//!   mostly isolated.
//! - POINTER_CHASE: hub nodes (list head, tree root) fan out to spokes that
//!   never meet each other; claws dominate.
//! - WORKING_SET: a resident set pairs all-with-all; near-clique content.
//! - PRODUCER_CONSUMER: two interleaved streams over swapped buffers close
//!   4-cycles without ever closing triangles.

use crate::signature::Signature;

/// Default minimum confidence for a pattern to be reported as matched
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

/// A named reference signature with human-facing guidance
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    pub name: &'static str,
    pub description: &'static str,
    pub signature: Signature,
    pub characteristics: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    /// Similarity below this is reported as low confidence
    pub min_confidence: f64,
}

/// The six built-in reference patterns, in a fixed order
pub fn builtin_patterns() -> Vec<ReferencePattern> {
    vec![
        ReferencePattern {
            name: "SEQUENTIAL",
            description: "Linear sequential access (array traversal, streaming)",
            signature: Signature::from_vector([
                0.018, 0.070, 0.053, 0.351, 0.000, 0.000, 0.281, 0.140, 0.088,
            ]),
            characteristics: vec![
                "Narrow band of co-occurrence along the address scan",
                "3-path and tailed-triangle dominated",
                "No hub or chordless-cycle content",
            ],
            recommendations: vec![
                "Hardware prefetching should be effective",
                "Consider software prefetch hints for large strides",
                "Good candidate for streaming stores if write-heavy",
                "Loop tiling may help if the working set exceeds cache",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
        ReferencePattern {
            name: "STRIDED",
            description: "Regular strided access (column-major, struct fields)",
            signature: Signature::from_vector([
                0.074, 0.222, 0.000, 0.519, 0.148, 0.037, 0.000, 0.000, 0.000,
            ]),
            characteristics: vec![
                "Two adjacent line strides alternate, no triangles close",
                "Open paths with claw and 4-cycle traces",
                "Consistent stride in address differences",
            ],
            recommendations: vec![
                "Align data structures to cache line boundaries",
                "Consider array-of-structs to struct-of-arrays transform",
                "Use streaming prefetch with a stride hint",
                "Loop interchange may improve cache utilization",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
        ReferencePattern {
            name: "RANDOM",
            description: "Uniform random access (hash tables, pointer-heavy code)",
            signature: Signature::from_vector([
                0.880, 0.105, 0.000, 0.005, 0.010, 0.000, 0.000, 0.000, 0.000,
            ]),
            characteristics: vec![
                "Edge-dominated: co-occurrences are isolated coincidences",
                "Very low clustering",
                "High unique-address count relative to accesses",
            ],
            recommendations: vec![
                "Prefetching will be ineffective",
                "Reduce working set size if possible",
                "Consider cache-oblivious data structures",
                "Batch accesses to improve spatial locality",
                "Profile for TLB misses (may be page-bound)",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
        ReferencePattern {
            name: "POINTER_CHASE",
            description: "Linked structure traversal (lists, trees, graphs)",
            signature: Signature::from_vector([
                0.006, 0.031, 0.000, 0.096, 0.862, 0.000, 0.005, 0.000, 0.000,
            ]),
            characteristics: vec![
                "Hub nodes fan out to spokes that never co-occur",
                "Claw-dominated signature",
                "Low clustering coefficient",
            ],
            recommendations: vec![
                "Hardware prefetching ineffective",
                "Linearize: convert to an array-based representation",
                "Consider a B-tree instead of a binary tree",
                "Use software prefetch if the next pointer is predictable",
                "Cache-oblivious layout (van Emde Boas)",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
        ReferencePattern {
            name: "WORKING_SET",
            description: "Dense reuse within a working set (hot loops, caches)",
            signature: Signature::from_vector([
                0.003, 0.000, 0.061, 0.000, 0.000, 0.000, 0.000, 0.000, 0.936,
            ]),
            characteristics: vec![
                "Resident set pairs all-with-all: near-clique structure",
                "Triangle and 4-clique dominated",
                "Small number of unique addresses",
            ],
            recommendations: vec![
                "Excellent cache behavior: the working set fits",
                "Consider pinning hot data in L1/L2",
                "Focus optimization on computation, not memory",
                "Verify alignment for SIMD if applicable",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
        ReferencePattern {
            name: "PRODUCER_CONSUMER",
            description: "Two interleaved access streams (pipelines, queues)",
            signature: Signature::from_vector([
                0.444, 0.444, 0.000, 0.000, 0.000, 0.112, 0.000, 0.000, 0.000,
            ]),
            characteristics: vec![
                "Bipartite-like structure between two address regions",
                "Chordless 4-cycles with no triangles",
                "Alternating access pattern",
            ],
            recommendations: vec![
                "Separate streams into distinct cache regions",
                "Use non-temporal stores for the producer if the consumer is delayed",
                "Consider double-buffering",
                "Align producer/consumer boundaries to cache lines",
            ],
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        },
    ]
}

/// Look up a built-in pattern by name
pub fn pattern_by_name(name: &str) -> Option<ReferencePattern> {
    builtin_patterns().into_iter().find(|p| p.name == name)
}
