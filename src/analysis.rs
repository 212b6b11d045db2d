//! End-to-end analysis pipeline
//!
//! ```text
//! Trace -> GraphBuilder -> Graph -> enumeration -> GraphletCounts
//!                                                       |
//!                                                   Signature
//!                                                       |
//!                                          Classifier -> AnalysisResult
//! ```
//!
//! One pass, strictly one-directional, no I/O. The configuration struct
//! below is the whole tuning surface; everything is validated before any
//! trace data is touched.

use crate::builder::{BuilderConfig, GraphBuilder};
use crate::cancel::CancelToken;
use crate::classifier::Classifier;
use crate::coarsen::Granularity;
use crate::enumerate::{enumerate_exact, fits_exact};
use crate::error::{MemGraphError, Result};
use crate::graph::GraphStats;
use crate::result::{AnalysisResult, ConfigSummary};
use crate::sample::{enumerate_sampled, MIN_SAMPLE_SIZE};
use crate::signature::Signature;
use crate::trace::Trace;
use crate::window::WindowStrategy;
use serde::{Deserialize, Serialize};

/// When the sampling estimator replaces exact enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Sample only when the graph exceeds the exact-enumeration bounds
    Auto,
    /// Always sample
    Always,
    /// Never sample, regardless of graph size
    Never,
}

impl std::str::FromStr for SamplingMode {
    type Err = MemGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SamplingMode::Auto),
            "always" => Ok(SamplingMode::Always),
            "never" => Ok(SamplingMode::Never),
            other => Err(MemGraphError::config(format!(
                "unknown sampling mode: {other} (expected auto, always, or never)"
            ))),
        }
    }
}

/// Full configuration surface for one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub granularity: Granularity,
    pub window_strategy: WindowStrategy,
    pub window_size: usize,
    pub min_edge_weight: u32,
    pub sampling: SamplingMode,
    pub sample_size: usize,
    pub classifier_threshold: f64,
    pub top_k: usize,
    pub rng_seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Cacheline,
            window_strategy: WindowStrategy::Sliding,
            window_size: 100,
            min_edge_weight: 1,
            sampling: SamplingMode::Auto,
            sample_size: 100_000,
            classifier_threshold: 0.6,
            top_k: 3,
            rng_seed: 0,
        }
    }
}

impl AnalysisConfig {
    fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            granularity: self.granularity,
            window_strategy: self.window_strategy,
            window_size: self.window_size,
            min_edge_weight: self.min_edge_weight,
        }
    }

    /// Validate every range; individual components re-check their own slice
    pub fn validate(&self) -> Result<()> {
        self.builder_config().validate()?;
        if self.sample_size < MIN_SAMPLE_SIZE {
            return Err(MemGraphError::config(format!(
                "sample size must be >= {MIN_SAMPLE_SIZE}, got {}",
                self.sample_size
            )));
        }
        if !(0.0..=1.0).contains(&self.classifier_threshold) {
            return Err(MemGraphError::config(format!(
                "classifier threshold must be in [0, 1], got {}",
                self.classifier_threshold
            )));
        }
        if self.top_k < 1 {
            return Err(MemGraphError::config("top_k must be >= 1, got 0"));
        }
        Ok(())
    }

    fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            granularity: self.granularity.name().to_string(),
            window_strategy: self.window_strategy.name().to_string(),
            window_size: self.window_size,
            min_edge_weight: self.min_edge_weight,
            classifier_threshold: self.classifier_threshold,
            top_k: self.top_k,
            rng_seed: self.rng_seed,
        }
    }
}

/// Run the whole pipeline over a trace.
///
/// Empty input is not an error: the result carries an empty graph, an empty
/// classification list, and the `empty_input` flag. The optional token is
/// checked between accesses during the build and between edges during
/// enumeration.
pub fn analyze(
    trace: &Trace,
    config: &AnalysisConfig,
    cancel: Option<&CancelToken>,
) -> Result<AnalysisResult> {
    config.validate()?;

    let builder = GraphBuilder::new(config.builder_config())?;
    let classifier = Classifier::new(config.classifier_threshold, config.top_k)?;

    let graph = builder.build(trace.accesses.iter().copied(), cancel)?;

    let use_sampling = match config.sampling {
        SamplingMode::Always => true,
        SamplingMode::Never => false,
        SamplingMode::Auto => !fits_exact(&graph),
    };

    let counts = if use_sampling {
        enumerate_sampled(&graph, config.sample_size, config.rng_seed, cancel)?
    } else {
        enumerate_exact(&graph, cancel)?
    };

    let signature = Signature::from_counts(&counts);
    let classifications = classifier.classify(&signature);

    tracing::info!(
        pattern = classifications
            .first()
            .map(|m| m.pattern.as_str())
            .unwrap_or("none"),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        sampled = counts.sampled,
        "analysis complete"
    );

    Ok(AnalysisResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        trace_meta: trace.meta.clone(),
        graph_stats: GraphStats::from_graph(&graph),
        sampled: counts.sampled,
        empty_input: trace.is_empty(),
        signature,
        graphlet_counts: counts,
        classifications,
        config: config.summary(),
    })
}
