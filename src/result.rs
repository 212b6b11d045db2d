//! Analysis result aggregate
//!
//! The single value the pipeline produces: trace metadata, graph statistics,
//! graphlet counts, the signature, and the ranked classifications. Reporters
//! consume this; the core depends on none of them. The serialized schema
//! keys (`trace_meta`, `graph_stats`, `graphlet_counts`, `classifications`)
//! are stable.

use crate::classifier::PatternMatch;
use crate::graph::GraphStats;
use crate::graphlets::GraphletCounts;
use crate::signature::Signature;
use crate::trace::TraceMeta;
use serde::{Deserialize, Serialize};

/// Configuration echo carried in the result for reproducibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub granularity: String,
    pub window_strategy: String,
    pub window_size: usize,
    pub min_edge_weight: u32,
    pub classifier_threshold: f64,
    pub top_k: usize,
    pub rng_seed: u64,
}

/// Complete output of one analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Crate version that produced the result
    pub version: String,
    pub trace_meta: TraceMeta,
    pub graph_stats: GraphStats,
    pub graphlet_counts: GraphletCounts,
    pub signature: Signature,
    /// Ranked pattern matches, best first; empty for empty input
    pub classifications: Vec<PatternMatch>,
    /// True when counts came from the sampling estimator
    pub sampled: bool,
    /// True when the trace contained no accesses
    pub empty_input: bool,
    pub config: ConfigSummary,
}

impl AnalysisResult {
    /// The winning classification, if any
    pub fn best_match(&self) -> Option<&PatternMatch> {
        self.classifications.first()
    }

    /// Label for display: best pattern, UNKNOWN, or a placeholder for empty
    /// input
    pub fn detected_pattern(&self) -> &str {
        match self.best_match() {
            Some(m) => m.display_label(),
            None => "(no data)",
        }
    }

    /// Pretty JSON of the full result
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Minimal JSON: pattern, confidence, recommendations
    pub fn to_minimal_json(&self) -> anyhow::Result<String> {
        let minimal = serde_json::json!({
            "pattern": self.detected_pattern(),
            "confidence": self.best_match().map(|m| m.similarity).unwrap_or(0.0),
            "recommendations": self
                .best_match()
                .map(|m| m.recommendations.clone())
                .unwrap_or_default(),
        });
        Ok(serde_json::to_string_pretty(&minimal)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<AnalysisResult> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::graphlets::GraphletCounts;
    use crate::trace::Trace;

    fn dummy_result() -> AnalysisResult {
        let counts = GraphletCounts::new([3, 1, 0, 0, 0, 0, 0, 0, 0], 4, 3, false);
        let trace = Trace::from_accesses(vec![], "test.trace", "native");
        AnalysisResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            trace_meta: trace.meta,
            graph_stats: GraphStats::from_graph(&Graph::new()),
            signature: Signature::from_counts(&counts),
            graphlet_counts: counts,
            classifications: vec![],
            sampled: false,
            empty_input: true,
            config: ConfigSummary {
                granularity: "cacheline".into(),
                window_strategy: "sliding".into(),
                window_size: 100,
                min_edge_weight: 1,
                classifier_threshold: 0.6,
                top_k: 3,
                rng_seed: 0,
            },
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let result = dummy_result();
        let json = result.to_json().unwrap();
        let back = AnalysisResult::from_json(&json).unwrap();
        assert_eq!(back.trace_meta, result.trace_meta);
        assert_eq!(back.graphlet_counts, result.graphlet_counts);
        assert_eq!(back.empty_input, result.empty_input);
    }

    #[test]
    fn test_schema_keys_stable() {
        let json = dummy_result().to_json().unwrap();
        for key in [
            "trace_meta",
            "graph_stats",
            "graphlet_counts",
            "classifications",
            "sampled",
            "empty_input",
        ] {
            assert!(json.contains(key), "missing schema key {key}");
        }
    }

    #[test]
    fn test_empty_result_detected_pattern() {
        let result = dummy_result();
        assert_eq!(result.detected_pattern(), "(no data)");
        assert!(result.best_match().is_none());
    }

    #[test]
    fn test_minimal_json_shape() {
        let json = dummy_result().to_minimal_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("pattern").is_some());
        assert!(value.get("confidence").is_some());
        assert!(value.get("recommendations").is_some());
    }
}
