//! Graphlet signatures and distance metrics
//!
//! A signature is the L1-normalized 9-vector of graphlet frequencies: the
//! structural fingerprint of a graph, comparable across graphs of any size.
//! Scale cancels out under normalization, so signatures built from sampled
//! estimates compare on equal footing with exact ones.

use crate::graphlets::{Graphlet, GraphletCounts, ALL_GRAPHLETS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distance metric for signature comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// 1 - cosine similarity; the classifier default
    Cosine,
    /// L2 distance between frequency vectors
    Euclidean,
    /// L1 distance between frequency vectors
    Manhattan,
}

impl std::str::FromStr for Metric {
    type Err = crate::error::MemGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            other => Err(crate::error::MemGraphError::config(format!(
                "unknown metric: {other} (expected cosine, euclidean, or manhattan)"
            ))),
        }
    }
}

/// Normalized graphlet frequency vector with derived ratios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    vector: [f64; 9],
}

impl Signature {
    /// Build from raw (or estimated) counts; normalization absorbs scale
    pub fn from_counts(counts: &GraphletCounts) -> Self {
        Self {
            vector: counts.normalized(),
        }
    }

    /// Build directly from a frequency vector (reference patterns)
    pub fn from_vector(vector: [f64; 9]) -> Self {
        Self { vector }
    }

    pub fn vector(&self) -> &[f64; 9] {
        &self.vector
    }

    pub fn get(&self, g: Graphlet) -> f64 {
        self.vector[g.index()]
    }

    /// True for the all-zero signature of an empty or edgeless graph
    pub fn is_zero(&self) -> bool {
        self.vector.iter().all(|&x| x == 0.0)
    }

    /// Fraction of isolated-edge structure
    pub fn edge_ratio(&self) -> f64 {
        self.get(Graphlet::G0Edge)
    }

    /// Combined open-path content (wedges plus 3-paths)
    pub fn path_ratio(&self) -> f64 {
        self.get(Graphlet::G1Wedge) + self.get(Graphlet::G3Path)
    }

    /// Claw content: hub-and-spoke structure
    pub fn star_ratio(&self) -> f64 {
        self.get(Graphlet::G4Star)
    }

    /// Combined closed-triangle content (triangle, tailed, diamond, clique)
    pub fn triangle_ratio(&self) -> f64 {
        self.get(Graphlet::G2Triangle)
            + self.get(Graphlet::G6TailedTriangle)
            + self.get(Graphlet::G7Diamond)
            + self.get(Graphlet::G8Clique)
    }

    /// Chordless 4-cycle content
    pub fn cycle_ratio(&self) -> f64 {
        self.get(Graphlet::G5Cycle)
    }

    /// Cosine similarity in [0, 1]; both vectors are non-negative.
    ///
    /// Zero when either vector is all-zero.
    pub fn cosine_similarity(&self, other: &Signature) -> f64 {
        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for i in 0..9 {
            dot += self.vector[i] * other.vector[i];
            norm_a += self.vector[i] * self.vector[i];
            norm_b += other.vector[i] * other.vector[i];
        }
        let norms = norm_a.sqrt() * norm_b.sqrt();
        if norms == 0.0 {
            return 0.0;
        }
        (dot / norms).clamp(0.0, 1.0)
    }

    /// Distance under the chosen metric (0 = identical)
    pub fn distance(&self, other: &Signature, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => 1.0 - self.cosine_similarity(other),
            Metric::Euclidean => {
                let mut sum = 0.0;
                for i in 0..9 {
                    let d = self.vector[i] - other.vector[i];
                    sum += d * d;
                }
                sum.sqrt()
            }
            Metric::Manhattan => {
                let mut sum = 0.0;
                for i in 0..9 {
                    sum += (self.vector[i] - other.vector[i]).abs();
                }
                sum
            }
        }
    }

    /// Similarity in [0, 1]. Cosine is used directly; the unbounded metrics
    /// map through exponential decay.
    pub fn similarity(&self, other: &Signature, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => self.cosine_similarity(other),
            Metric::Euclidean | Metric::Manhattan => (-self.distance(other, metric)).exp(),
        }
    }

    /// Per-component products with a reference vector, for evidence ranking
    pub fn contributions(&self, other: &Signature) -> [(Graphlet, f64); 9] {
        let mut out = [(Graphlet::G0Edge, 0.0); 9];
        for (i, g) in ALL_GRAPHLETS.iter().enumerate() {
            out[i] = (*g, self.vector[i] * other.vector[i]);
        }
        out
    }

    /// Frequencies keyed by graphlet identifier, in G0..G8 order
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        ALL_GRAPHLETS
            .iter()
            .map(|g| (g.id().to_string(), self.get(*g)))
            .collect()
    }
}
