//! Distance-based pattern classification
//!
//! Compares a signature against every reference pattern, ranks matches by
//! similarity, and reports the graphlet components that carried each match.
//! When nothing clears the confidence threshold the single best match is
//! still returned, flagged low-confidence, so reporting can show it as
//! UNKNOWN without losing the nearest label.

use crate::error::{MemGraphError, Result};
use crate::graphlets::Graphlet;
use crate::patterns::{builtin_patterns, ReferencePattern};
use crate::signature::{Metric, Signature};
use serde::{Deserialize, Serialize};

/// Label reported for a match that failed the confidence threshold
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// One graphlet component's share of a similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub graphlet: Graphlet,
    /// Product of observed and reference frequency for this component
    pub contribution: f64,
}

/// A ranked classification outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Name of the matched reference pattern
    pub pattern: String,
    /// Similarity score in [0, 1]
    pub similarity: f64,
    /// True when the similarity fell below the classifier threshold
    pub low_confidence: bool,
    /// The three largest-contributing graphlet components
    pub top_features: Vec<FeatureContribution>,
    /// Advice copied from the matched reference
    pub recommendations: Vec<String>,
}

impl PatternMatch {
    /// Name to display: the pattern, or UNKNOWN for low-confidence matches
    pub fn display_label(&self) -> &str {
        if self.low_confidence {
            UNKNOWN_LABEL
        } else {
            &self.pattern
        }
    }
}

/// Signature-to-pattern classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: Vec<ReferencePattern>,
    threshold: f64,
    top_k: usize,
    metric: Metric,
}

impl Classifier {
    /// Build a classifier over the built-in patterns.
    ///
    /// `threshold` must lie in [0, 1] and `top_k` must be at least 1; both
    /// are checked here so no partially-configured classifier exists.
    pub fn new(threshold: f64, top_k: usize) -> Result<Self> {
        Self::with_patterns(builtin_patterns(), threshold, top_k, Metric::Cosine)
    }

    /// Build a classifier over a custom pattern set
    pub fn with_patterns(
        patterns: Vec<ReferencePattern>,
        threshold: f64,
        top_k: usize,
        metric: Metric,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MemGraphError::config(format!(
                "classifier threshold must be in [0, 1], got {threshold}"
            )));
        }
        if top_k < 1 {
            return Err(MemGraphError::config("top_k must be >= 1, got 0"));
        }
        if patterns.is_empty() {
            return Err(MemGraphError::config("pattern set is empty"));
        }
        Ok(Self {
            patterns,
            threshold,
            top_k,
            metric,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rank the reference patterns against a signature.
    ///
    /// Returns up to `top_k` matches at or above the threshold, best first,
    /// ties broken by pattern name. Below-threshold signatures yield the
    /// single nearest pattern flagged low-confidence. The all-zero signature
    /// of an empty graph yields no matches at all.
    pub fn classify(&self, signature: &Signature) -> Vec<PatternMatch> {
        if signature.is_zero() {
            return Vec::new();
        }

        let mut scored: Vec<(&ReferencePattern, f64)> = self
            .patterns
            .iter()
            .map(|p| (p, signature.similarity(&p.signature, self.metric)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.name.cmp(b.0.name))
        });

        let passing: Vec<&(&ReferencePattern, f64)> = scored
            .iter()
            .filter(|(_, sim)| *sim >= self.threshold)
            .take(self.top_k)
            .collect();

        if passing.is_empty() {
            let (best, sim) = scored[0];
            return vec![self.build_match(signature, best, sim, true)];
        }

        passing
            .into_iter()
            .map(|&(pattern, sim)| self.build_match(signature, pattern, sim, false))
            .collect()
    }

    fn build_match(
        &self,
        signature: &Signature,
        pattern: &ReferencePattern,
        similarity: f64,
        low_confidence: bool,
    ) -> PatternMatch {
        let mut contributions = signature.contributions(&pattern.signature);
        contributions.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.index().cmp(&b.0.index()))
        });

        PatternMatch {
            pattern: pattern.name.to_string(),
            similarity,
            low_confidence,
            top_features: contributions
                .iter()
                .take(3)
                .map(|&(graphlet, contribution)| FeatureContribution {
                    graphlet,
                    contribution,
                })
                .collect(),
            recommendations: pattern
                .recommendations
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::pattern_by_name;

    #[test]
    fn test_threshold_range_validated() {
        assert!(Classifier::new(-0.1, 3).is_err());
        assert!(Classifier::new(1.5, 3).is_err());
        assert!(Classifier::new(0.6, 0).is_err());
        assert!(Classifier::new(0.6, 3).is_ok());
    }

    #[test]
    fn test_reference_signature_matches_itself_first() {
        let classifier = Classifier::new(0.6, 3).unwrap();
        for name in ["SEQUENTIAL", "RANDOM", "WORKING_SET", "POINTER_CHASE"] {
            let reference = pattern_by_name(name).unwrap();
            let matches = classifier.classify(&reference.signature);
            assert!(!matches.is_empty());
            assert_eq!(matches[0].pattern, name, "self-match failed for {name}");
            assert!(matches[0].similarity > 0.999);
            assert!(!matches[0].low_confidence);
        }
    }

    #[test]
    fn test_zero_signature_empty_classification() {
        let classifier = Classifier::new(0.6, 3).unwrap();
        let matches = classifier.classify(&Signature::from_vector([0.0; 9]));
        assert!(matches.is_empty());
    }

    #[test]
    fn test_below_threshold_reports_single_low_confidence_match() {
        // A vector orthogonal-ish to every reference
        let classifier = Classifier::new(0.99, 3).unwrap();
        let odd = Signature::from_vector([0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0]);
        let matches = classifier.classify(&odd);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].low_confidence);
        assert_eq!(matches[0].display_label(), UNKNOWN_LABEL);
        // The nearest pattern's name is preserved underneath
        assert!(!matches[0].pattern.is_empty());
    }

    #[test]
    fn test_top_k_limits_matches() {
        let classifier = Classifier::new(0.0, 2).unwrap();
        let seq = pattern_by_name("SEQUENTIAL").unwrap();
        let matches = classifier.classify(&seq.signature);
        assert_eq!(matches.len(), 2);
        // Descending similarity
        assert!(matches[0].similarity >= matches[1].similarity);
    }

    #[test]
    fn test_top_features_are_ranked() {
        let classifier = Classifier::new(0.6, 1).unwrap();
        let ws = pattern_by_name("WORKING_SET").unwrap();
        let matches = classifier.classify(&ws.signature);
        let features = &matches[0].top_features;
        assert_eq!(features.len(), 3);
        assert!(features[0].contribution >= features[1].contribution);
        assert!(features[1].contribution >= features[2].contribution);
        // Clique content dominates the working-set match
        assert_eq!(features[0].graphlet, Graphlet::G8Clique);
    }

    #[test]
    fn test_recommendations_copied_from_reference() {
        let classifier = Classifier::new(0.6, 1).unwrap();
        let random = pattern_by_name("RANDOM").unwrap();
        let matches = classifier.classify(&random.signature);
        assert_eq!(
            matches[0].recommendations.len(),
            random.recommendations.len()
        );
    }

    #[test]
    fn test_deterministic_tie_break_by_name() {
        // Two identical patterns differing only in name: ranking must be
        // alphabetical.
        let mut a = pattern_by_name("RANDOM").unwrap();
        let mut b = pattern_by_name("RANDOM").unwrap();
        a.name = "AAA";
        b.name = "BBB";
        let sig = a.signature.clone();
        let classifier =
            Classifier::with_patterns(vec![b, a], 0.5, 2, Metric::Cosine).unwrap();
        let matches = classifier.classify(&sig);
        assert_eq!(matches[0].pattern, "AAA");
        assert_eq!(matches[1].pattern, "BBB");
    }
}
