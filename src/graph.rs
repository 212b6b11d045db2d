//! Weighted undirected graph over coarsened addresses
//!
//! Adjacency lists keyed by node id: a hash map from `NodeId` to a sorted
//! vector of `(neighbour, weight)`. This keeps neighbour iteration
//! deterministic and edge lookups at a binary search, with none of the
//! per-edge overhead a general graph library would add to enumeration.
//!
//! Invariants: no self-loops, parallel edges merged by summing weights,
//! `weight(u,v) == weight(v,u)`, isolated nodes permitted. Node insertion
//! order is preserved for stable iteration.

use crate::coarsen::NodeId;
use crate::error::{MemGraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Weighted undirected simple graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes in first-sighting order
    order: Vec<NodeId>,
    /// NodeId -> sorted (neighbour, weight) list
    adj: HashMap<NodeId, Vec<(NodeId, u32)>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if unseen; returns true when newly added
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.adj.contains_key(&id) {
            return false;
        }
        self.adj.insert(id, Vec::new());
        self.order.push(id);
        true
    }

    /// Insert or reinforce an undirected edge.
    ///
    /// Self-loops are rejected. Endpoints are inserted lazily. An existing
    /// edge has `weight` added to it.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: u32) -> Result<()> {
        if u == v {
            return Err(MemGraphError::InvariantViolation(format!(
                "self-loop on node {u:#x}"
            )));
        }
        self.add_node(u);
        self.add_node(v);

        let created = Self::insert_half_edge(self.adj.get_mut(&u).unwrap(), v, weight);
        Self::insert_half_edge(self.adj.get_mut(&v).unwrap(), u, weight);
        if created {
            self.edge_count += 1;
        }
        Ok(())
    }

    fn insert_half_edge(list: &mut Vec<(NodeId, u32)>, to: NodeId, weight: u32) -> bool {
        match list.binary_search_by_key(&to, |&(n, _)| n) {
            Ok(pos) => {
                list[pos].1 += weight;
                false
            }
            Err(pos) => {
                list.insert(pos, (to, weight));
                true
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.adj.contains_key(&id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adj.get(&id).map(|l| l.len()).unwrap_or(0)
    }

    /// Neighbours of `id` in ascending id order
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj
            .get(&id)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&(n, _)| n)
    }

    /// `(neighbour, weight)` pairs of `id` in ascending id order
    pub fn edges(&self, id: NodeId) -> &[(NodeId, u32)] {
        self.adj.get(&id).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adj
            .get(&u)
            .map(|l| l.binary_search_by_key(&v, |&(n, _)| n).is_ok())
            .unwrap_or(false)
    }

    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<u32> {
        self.adj.get(&u).and_then(|l| {
            l.binary_search_by_key(&v, |&(n, _)| n)
                .ok()
                .map(|pos| l[pos].1)
        })
    }

    /// Every unordered edge once, as `(u, v, weight)` with `u < v`
    pub fn edge_list(&self) -> Vec<(NodeId, NodeId, u32)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for &u in &self.order {
            for &(v, w) in &self.adj[&u] {
                if u < v {
                    edges.push((u, v, w));
                }
            }
        }
        edges
    }

    /// `2E / (V * (V - 1))`; zero for fewer than two nodes
    pub fn density(&self) -> f64 {
        let v = self.node_count();
        if v < 2 {
            return 0.0;
        }
        (2 * self.edge_count()) as f64 / (v as f64 * (v as f64 - 1.0))
    }
}

/// Summary statistics for a built graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub connected_components: usize,
    pub largest_component_size: usize,
    pub avg_clustering: f64,
}

impl GraphStats {
    pub fn from_graph(graph: &Graph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let (avg_degree, max_degree) = if node_count > 0 {
            let degrees: Vec<f32> = graph.nodes().map(|n| graph.degree(n) as f32).collect();
            let avg = trueno::Vector::from_slice(&degrees).mean().unwrap_or(0.0) as f64;
            let max = graph.nodes().map(|n| graph.degree(n)).max().unwrap_or(0);
            (avg, max)
        } else {
            (0.0, 0)
        };

        let (connected_components, largest_component_size) = component_stats(graph);

        Self {
            node_count,
            edge_count,
            density: graph.density(),
            avg_degree,
            max_degree,
            connected_components,
            largest_component_size,
            avg_clustering: average_clustering(graph),
        }
    }
}

fn component_stats(graph: &Graph) -> (usize, usize) {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut components = 0;
    let mut largest = 0;

    for start in graph.nodes() {
        if visited.contains(&start) {
            continue;
        }
        components += 1;
        let mut size = 0;
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(node) = stack.pop() {
            size += 1;
            for next in graph.neighbors(node) {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        largest = largest.max(size);
    }

    (components, largest)
}

/// Mean local clustering coefficient; nodes of degree < 2 contribute zero
fn average_clustering(graph: &Graph) -> f64 {
    if graph.node_count() == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    for node in graph.nodes() {
        let nbrs = graph.edges(node);
        let d = nbrs.len();
        if d < 2 {
            continue;
        }
        let mut links = 0usize;
        for i in 0..d {
            for j in (i + 1)..d {
                if graph.has_edge(nbrs[i].0, nbrs[j].0) {
                    links += 1;
                }
            }
        }
        total += (2 * links) as f64 / (d * (d - 1)) as f64;
    }
    total / graph.node_count() as f64
}
