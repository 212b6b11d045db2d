//! Exact graphlet enumeration
//!
//! Counts the nine connected induced graphlets on 2-4 nodes.
//!
//! 3-node shapes are counted per centre: for each node, every unordered pair
//! of its neighbours is a triangle if the pair is adjacent and a wedge
//! otherwise. A wedge has a unique centre so the wedge tally is final; each
//! triangle is seen from all three of its vertices, so triangle incidences
//! are divided by three.
//!
//! 4-node subsets are generated by edge expansion: for each edge `(u,v)`,
//! every unordered pair of distinct nodes drawn from `N(u) ∪ N(v) \ {u,v}`
//! completes a connected 4-set. Every connected 4-node subgraph has a
//! spanning tree that is a path or a star, and the middle edge of that path
//! (or any star edge) is a generating edge, so the expansion is exhaustive.
//! Subsets are de-duplicated and each is classified once by its induced edge
//! count and degree sequence.

use crate::cancel::CancelToken;
use crate::coarsen::NodeId;
use crate::error::{MemGraphError, Result};
use crate::graph::Graph;
use crate::graphlets::{Graphlet, GraphletCounts};
use std::collections::HashSet;

/// Exact node-count bound below which enumeration is automatic
pub const EXACT_NODE_LIMIT: usize = 10_000;
/// Exact edge-count bound below which enumeration is automatic
pub const EXACT_EDGE_LIMIT: usize = 250_000;

/// Whether the automatic mode picks exact enumeration for this graph
pub fn fits_exact(graph: &Graph) -> bool {
    graph.node_count() < EXACT_NODE_LIMIT || graph.edge_count() < EXACT_EDGE_LIMIT
}

/// Count all nine graphlets exactly.
///
/// The optional token is checked between edges. A graph with fewer than two
/// nodes yields all-zero counts; a malformed adjacency list (duplicate
/// neighbour entries) is an invariant violation.
pub fn enumerate_exact(graph: &Graph, cancel: Option<&CancelToken>) -> Result<GraphletCounts> {
    verify_simple(graph)?;

    if graph.node_count() < 2 {
        return Ok(GraphletCounts::zero(
            graph.node_count(),
            graph.edge_count(),
        ));
    }

    let mut counts = [0u64; 9];
    counts[Graphlet::G0Edge.index()] = graph.edge_count() as u64;

    let (wedges, triangles) = count_three_node(graph);
    counts[Graphlet::G1Wedge.index()] = wedges;
    counts[Graphlet::G2Triangle.index()] = triangles;

    count_four_node(graph, &mut counts, cancel)?;

    Ok(GraphletCounts::new(
        counts,
        graph.node_count(),
        graph.edge_count(),
        false,
    ))
}

/// Duplicate entries in an adjacency list would mean a multi-edge survived
/// construction; that is a bug upstream, not recoverable input.
pub(crate) fn verify_simple(graph: &Graph) -> Result<()> {
    for node in graph.nodes() {
        let edges = graph.edges(node);
        for pair in edges.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(MemGraphError::InvariantViolation(format!(
                    "multi-edge {node:#x} -> {:#x} reached the enumerator",
                    pair[0].0
                )));
            }
        }
    }
    Ok(())
}

fn count_three_node(graph: &Graph) -> (u64, u64) {
    let mut wedges = 0u64;
    let mut triangle_incidences = 0u64;

    for centre in graph.nodes() {
        let nbrs = graph.edges(centre);
        for i in 0..nbrs.len() {
            for j in (i + 1)..nbrs.len() {
                if graph.has_edge(nbrs[i].0, nbrs[j].0) {
                    triangle_incidences += 1;
                } else {
                    wedges += 1;
                }
            }
        }
    }

    (wedges, triangle_incidences / 3)
}

fn count_four_node(
    graph: &Graph,
    counts: &mut [u64; 9],
    cancel: Option<&CancelToken>,
) -> Result<()> {
    let mut seen: HashSet<[NodeId; 4]> = HashSet::new();
    let mut candidates: Vec<NodeId> = Vec::new();

    for (u, v, _) in graph.edge_list() {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Err(MemGraphError::Cancelled);
            }
        }

        merge_neighbourhoods(graph, u, v, &mut candidates);

        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                let mut key = [u, v, candidates[i], candidates[j]];
                key.sort_unstable();
                if seen.insert(key) {
                    let shape = classify_four(graph, key);
                    counts[shape.index()] += 1;
                }
            }
        }
    }
    Ok(())
}

/// Sorted union of the two endpoint neighbourhoods, minus the endpoints
pub(crate) fn merge_neighbourhoods(graph: &Graph, u: NodeId, v: NodeId, out: &mut Vec<NodeId>) {
    out.clear();
    let a = graph.edges(u);
    let b = graph.edges(v);
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&(x, _)), Some(&(y, _))) => {
                if x < y {
                    i += 1;
                    x
                } else if y < x {
                    j += 1;
                    y
                } else {
                    i += 1;
                    j += 1;
                    x
                }
            }
            (Some(&(x, _)), None) => {
                i += 1;
                x
            }
            (None, Some(&(y, _))) => {
                j += 1;
                y
            }
            (None, None) => break,
        };
        if next != u && next != v {
            out.push(next);
        }
    }
}

/// Classify a connected 4-set by induced edge count and degree sequence
pub(crate) fn classify_four(graph: &Graph, nodes: [NodeId; 4]) -> Graphlet {
    let mut degree = [0u8; 4];
    let mut edges = 0u8;
    for i in 0..4 {
        for j in (i + 1)..4 {
            if graph.has_edge(nodes[i], nodes[j]) {
                edges += 1;
                degree[i] += 1;
                degree[j] += 1;
            }
        }
    }

    match edges {
        3 => {
            if degree.iter().any(|&d| d == 3) {
                Graphlet::G4Star
            } else {
                Graphlet::G3Path
            }
        }
        4 => {
            if degree.iter().all(|&d| d == 2) {
                Graphlet::G5Cycle
            } else {
                Graphlet::G6TailedTriangle
            }
        }
        5 => Graphlet::G7Diamond,
        6 => Graphlet::G8Clique,
        // Generated sets always carry the seed edge plus one edge per added
        // node, so fewer than three edges cannot happen.
        _ => unreachable!("connected 4-set with {edges} edges"),
    }
}
