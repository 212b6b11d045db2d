//! Graphlet taxonomy and count container
//!
//! The nine connected induced subgraphs on 2-4 nodes:
//!
//! ```text
//! G0 edge        o--o            G5 4-cycle          o--o
//! G1 wedge       o--o--o                             |  |
//! G2 triangle    o--o--o (closed)                    o--o
//! G3 3-path      o--o--o--o      G6 tailed triangle  triangle + pendant
//! G4 claw        o<(o,o,o)       G7 diamond          K4 minus one edge
//!                                G8 4-clique         K4
//! ```
//!
//! Counts are induced: a 4-node subset is attributed to exactly the shape
//! its induced edge set forms, so a 4-clique is never also six triangles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for one of the nine 2-4 node connected graphlets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graphlet {
    /// 2 nodes, 1 edge
    G0Edge,
    /// 3 nodes, 2 edges (wedge / 2-path)
    G1Wedge,
    /// 3 nodes, 3 edges
    G2Triangle,
    /// 4 nodes, 3 edges in a path
    G3Path,
    /// 4 nodes, 3 edges from one centre (claw)
    G4Star,
    /// 4 nodes, 4 edges, no triangle
    G5Cycle,
    /// 4 nodes, 4 edges, triangle plus pendant
    G6TailedTriangle,
    /// 4 nodes, 5 edges
    G7Diamond,
    /// 4 nodes, 6 edges
    G8Clique,
}

/// All graphlets in identifier order
pub const ALL_GRAPHLETS: [Graphlet; 9] = [
    Graphlet::G0Edge,
    Graphlet::G1Wedge,
    Graphlet::G2Triangle,
    Graphlet::G3Path,
    Graphlet::G4Star,
    Graphlet::G5Cycle,
    Graphlet::G6TailedTriangle,
    Graphlet::G7Diamond,
    Graphlet::G8Clique,
];

impl Graphlet {
    /// Position in the signature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short identifier (G0..G8)
    pub fn id(&self) -> &'static str {
        match self {
            Graphlet::G0Edge => "G0",
            Graphlet::G1Wedge => "G1",
            Graphlet::G2Triangle => "G2",
            Graphlet::G3Path => "G3",
            Graphlet::G4Star => "G4",
            Graphlet::G5Cycle => "G5",
            Graphlet::G6TailedTriangle => "G6",
            Graphlet::G7Diamond => "G7",
            Graphlet::G8Clique => "G8",
        }
    }

    /// Human-readable shape name
    pub fn shape_name(&self) -> &'static str {
        match self {
            Graphlet::G0Edge => "edge",
            Graphlet::G1Wedge => "2-path",
            Graphlet::G2Triangle => "triangle",
            Graphlet::G3Path => "3-path",
            Graphlet::G4Star => "3-star",
            Graphlet::G5Cycle => "4-cycle",
            Graphlet::G6TailedTriangle => "tailed-triangle",
            Graphlet::G7Diamond => "diamond",
            Graphlet::G8Clique => "4-clique",
        }
    }

    /// Number of nodes in the shape
    pub fn node_count(&self) -> usize {
        match self {
            Graphlet::G0Edge => 2,
            Graphlet::G1Wedge | Graphlet::G2Triangle => 3,
            _ => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Graphlet> {
        ALL_GRAPHLETS.get(index).copied()
    }
}

/// Result of a graphlet enumeration pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphletCounts {
    /// Count (or rounded estimate) per graphlet, indexed by `Graphlet::index`
    counts: [u64; 9],
    /// Nodes in the enumerated graph
    pub node_count: usize,
    /// Edges in the enumerated graph
    pub edge_count: usize,
    /// True when the counts came from the sampling estimator
    pub sampled: bool,
}

impl GraphletCounts {
    pub fn new(counts: [u64; 9], node_count: usize, edge_count: usize, sampled: bool) -> Self {
        Self {
            counts,
            node_count,
            edge_count,
            sampled,
        }
    }

    pub fn zero(node_count: usize, edge_count: usize) -> Self {
        Self::new([0; 9], node_count, edge_count, false)
    }

    pub fn get(&self, g: Graphlet) -> u64 {
        self.counts[g.index()]
    }

    /// Sum of all nine counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Frequencies summing to 1.0, or the zero vector when total is zero
    pub fn normalized(&self) -> [f64; 9] {
        let total = self.total();
        if total == 0 {
            return [0.0; 9];
        }
        let mut out = [0.0; 9];
        for (i, &c) in self.counts.iter().enumerate() {
            out[i] = c as f64 / total as f64;
        }
        out
    }

    /// Counts keyed by graphlet identifier, in G0..G8 order
    pub fn as_map(&self) -> BTreeMap<String, u64> {
        ALL_GRAPHLETS
            .iter()
            .map(|g| (g.id().to_string(), self.get(*g)))
            .collect()
    }

    /// The graphlet with the highest count, ties to the lower identifier
    pub fn dominant(&self) -> Option<Graphlet> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Graphlet::G0Edge;
        for g in ALL_GRAPHLETS {
            if self.get(g) > self.get(best) {
                best = g;
            }
        }
        Some(best)
    }
}
