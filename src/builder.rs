//! Temporal adjacency graph construction
//!
//! Streams an access trace through the configured coarsener and window
//! strategy and accumulates co-occurrence edges. The trace is touched exactly
//! once; the builder retains only the window state plus the edge accumulator,
//! so arbitrarily long traces can be fed from an iterator.
//!
//! Edge weights below `min_edge_weight` are dropped in a post-pass, after the
//! whole trace has been consumed; the filter never runs online. Nodes survive
//! the filter even when all of their edges are dropped.

use crate::cancel::CancelToken;
use crate::coarsen::{coarsen, Granularity, NodeId};
use crate::error::{MemGraphError, Result};
use crate::graph::Graph;
use crate::trace::MemoryAccess;
use crate::window::{WindowStrategy, Windower};
use std::collections::{HashMap, HashSet};

/// Graph construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    pub granularity: Granularity,
    pub window_strategy: WindowStrategy,
    pub window_size: usize,
    pub min_edge_weight: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Cacheline,
            window_strategy: WindowStrategy::Sliding,
            window_size: 100,
            min_edge_weight: 1,
        }
    }
}

impl BuilderConfig {
    /// Validate parameter ranges; called by `GraphBuilder::new`
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(MemGraphError::config(format!(
                "window size must be >= 2, got {}",
                self.window_size
            )));
        }
        if self.min_edge_weight < 1 {
            return Err(MemGraphError::config(
                "min edge weight must be >= 1, got 0",
            ));
        }
        Ok(())
    }
}

/// Builds a weighted co-occurrence graph from an access stream
#[derive(Debug)]
pub struct GraphBuilder {
    config: BuilderConfig,
}

impl GraphBuilder {
    /// Create a builder; invalid configuration is rejected here, before any
    /// trace data is consumed.
    pub fn new(config: BuilderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Consume an access stream and build the graph.
    ///
    /// Non-monotonic timestamps are ignored: ordering follows the stream.
    /// An empty stream yields an empty graph. The optional token is checked
    /// between accesses.
    pub fn build<I>(&self, accesses: I, cancel: Option<&CancelToken>) -> Result<Graph>
    where
        I: IntoIterator<Item = MemoryAccess>,
    {
        let mut windower = Windower::new(self.config.window_strategy, self.config.window_size)?;

        // First-sighting order of nodes, kept separately so isolated nodes
        // and filtered-out endpoints still appear in the graph.
        let mut node_order: Vec<NodeId> = Vec::new();
        let mut node_seen: HashSet<NodeId> = HashSet::new();
        let mut weights: HashMap<(NodeId, NodeId), u32> = HashMap::new();

        let mut sink = |a: NodeId, b: NodeId| {
            let key = if a < b { (a, b) } else { (b, a) };
            *weights.entry(key).or_insert(0) += 1;
        };

        let mut processed = 0u64;
        for access in accesses {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(MemGraphError::Cancelled);
                }
            }
            let id = coarsen(access.address, self.config.granularity);
            if node_seen.insert(id) {
                node_order.push(id);
            }
            windower.push(id, &mut sink);
            processed += 1;
        }
        windower.finish(&mut sink);

        tracing::debug!(
            accesses = processed,
            nodes = node_order.len(),
            raw_edges = weights.len(),
            "graph construction pass complete"
        );

        let mut graph = Graph::new();
        for id in node_order {
            graph.add_node(id);
        }
        for ((u, v), w) in weights {
            if w >= self.config.min_edge_weight {
                graph.add_edge(u, v, w)?;
            }
        }
        Ok(graph)
    }
}
