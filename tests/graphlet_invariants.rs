//! Graphlet counting invariants: fixture graphs where induced and
//! homomorphic counts diverge, brute-force agreement on random graphs, and
//! sampling convergence.

use memgraph::enumerate::enumerate_exact;
use memgraph::graph::Graph;
use memgraph::graphlets::{Graphlet, GraphletCounts, ALL_GRAPHLETS};
use memgraph::sample::enumerate_sampled;
use memgraph::signature::Signature;
use proptest::prelude::*;

fn graph_from_edges(edges: &[(u64, u64)]) -> Graph {
    let mut g = Graph::new();
    for &(u, v) in edges {
        if u != v {
            g.add_edge(u, v, 1).unwrap();
        }
    }
    g
}

/// Reference enumerator: examine every 3- and 4-node subset directly.
/// Quartic and slow, but obviously correct.
fn brute_force_counts(graph: &Graph) -> [u64; 9] {
    let nodes: Vec<u64> = graph.nodes().collect();
    let n = nodes.len();
    let mut counts = [0u64; 9];
    counts[Graphlet::G0Edge.index()] = graph.edge_count() as u64;

    // 3-node subsets
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let trio = [nodes[i], nodes[j], nodes[k]];
                let mut m = 0;
                for a in 0..3 {
                    for b in (a + 1)..3 {
                        if graph.has_edge(trio[a], trio[b]) {
                            m += 1;
                        }
                    }
                }
                match m {
                    2 => counts[Graphlet::G1Wedge.index()] += 1,
                    3 => counts[Graphlet::G2Triangle.index()] += 1,
                    _ => {} // 0 or 1 edge: not connected
                }
            }
        }
    }

    // 4-node subsets
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let quad = [nodes[i], nodes[j], nodes[k], nodes[l]];
                    if let Some(shape) = classify_quad(graph, quad) {
                        counts[shape.index()] += 1;
                    }
                }
            }
        }
    }

    counts
}

fn classify_quad(graph: &Graph, quad: [u64; 4]) -> Option<Graphlet> {
    let mut degree = [0u8; 4];
    let mut m = 0u8;
    for a in 0..4 {
        for b in (a + 1)..4 {
            if graph.has_edge(quad[a], quad[b]) {
                m += 1;
                degree[a] += 1;
                degree[b] += 1;
            }
        }
    }
    if degree.contains(&0) {
        return None; // isolated vertex: not connected
    }
    match m {
        3 => {
            // Three edges touching all four nodes is a tree: star or path
            if degree.iter().any(|&d| d == 3) {
                Some(Graphlet::G4Star)
            } else {
                Some(Graphlet::G3Path)
            }
        }
        4 => {
            if degree.iter().all(|&d| d == 2) {
                Some(Graphlet::G5Cycle)
            } else {
                Some(Graphlet::G6TailedTriangle)
            }
        }
        5 => Some(Graphlet::G7Diamond),
        6 => Some(Graphlet::G8Clique),
        _ => None, // two disjoint edges or fewer: not connected
    }
}

fn assert_counts_match(exact: &GraphletCounts, brute: &[u64; 9], context: &str) {
    for g in ALL_GRAPHLETS {
        assert_eq!(
            exact.get(g),
            brute[g.index()],
            "{context}: {} mismatch",
            g.id()
        );
    }
}

#[test]
fn k4_homomorphic_and_induced_counts_diverge() {
    // K4 contains 12 two-edge walks and C(4,3) = 4 triangles; induced
    // counting must report the triangles and the clique, and no wedges.
    let g = graph_from_edges(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let counts = enumerate_exact(&g, None).unwrap();

    assert_eq!(counts.get(Graphlet::G0Edge), 6);
    assert_eq!(counts.get(Graphlet::G1Wedge), 0, "K4 has no induced wedge");
    assert_eq!(counts.get(Graphlet::G2Triangle), 4);
    assert_eq!(counts.get(Graphlet::G8Clique), 1);
    for g in [
        Graphlet::G3Path,
        Graphlet::G4Star,
        Graphlet::G5Cycle,
        Graphlet::G6TailedTriangle,
        Graphlet::G7Diamond,
    ] {
        assert_eq!(counts.get(g), 0);
    }
}

#[test]
fn diamond_is_not_two_triangles_plus_cycle() {
    // The diamond contains two triangle subsets and a 4-cycle subgraph, but
    // induced classification attributes the 4-set to the diamond alone.
    let g = graph_from_edges(&[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    let counts = enumerate_exact(&g, None).unwrap();

    assert_eq!(counts.get(Graphlet::G2Triangle), 2);
    assert_eq!(counts.get(Graphlet::G7Diamond), 1);
    assert_eq!(counts.get(Graphlet::G5Cycle), 0, "the cycle has a chord");
    assert_eq!(counts.get(Graphlet::G6TailedTriangle), 0);
}

#[test]
fn path_graph_pinned_counts() {
    for n in [4u64, 6, 10, 20] {
        let edges: Vec<(u64, u64)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let g = graph_from_edges(&edges);
        let counts = enumerate_exact(&g, None).unwrap();

        assert_eq!(counts.get(Graphlet::G1Wedge), n - 2);
        assert_eq!(counts.get(Graphlet::G3Path), n - 3);
        for shape in [
            Graphlet::G2Triangle,
            Graphlet::G4Star,
            Graphlet::G5Cycle,
            Graphlet::G6TailedTriangle,
            Graphlet::G7Diamond,
            Graphlet::G8Clique,
        ] {
            assert_eq!(counts.get(shape), 0, "P{n} has no {}", shape.id());
        }
    }
}

#[test]
fn star_graph_pinned_counts() {
    fn choose(n: u64, k: u64) -> u64 {
        let mut r = 1u64;
        for i in 0..k {
            r = r * (n - i) / (i + 1);
        }
        r
    }
    for leaves in [3u64, 5, 8, 12] {
        let edges: Vec<(u64, u64)> = (1..=leaves).map(|i| (0, i)).collect();
        let g = graph_from_edges(&edges);
        let counts = enumerate_exact(&g, None).unwrap();

        assert_eq!(counts.get(Graphlet::G1Wedge), choose(leaves, 2));
        assert_eq!(counts.get(Graphlet::G4Star), choose(leaves, 3));
        assert_eq!(counts.get(Graphlet::G2Triangle), 0);
    }
}

#[test]
fn exact_matches_brute_force_on_fixture_zoo() {
    let fixtures: Vec<(&str, Vec<(u64, u64)>)> = vec![
        ("triangle+tail", vec![(0, 1), (1, 2), (0, 2), (2, 3)]),
        ("two components", vec![(0, 1), (1, 2), (10, 11), (11, 12), (10, 12)]),
        ("cycle5", vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]),
        (
            "book graph",
            vec![(0, 1), (0, 2), (1, 2), (0, 3), (1, 3), (0, 4), (1, 4)],
        ),
        (
            "cube",
            vec![
                (0, 1), (1, 2), (2, 3), (3, 0),
                (4, 5), (5, 6), (6, 7), (7, 4),
                (0, 4), (1, 5), (2, 6), (3, 7),
            ],
        ),
    ];

    for (name, edges) in fixtures {
        let g = graph_from_edges(&edges);
        let exact = enumerate_exact(&g, None).unwrap();
        let brute = brute_force_counts(&g);
        assert_counts_match(&exact, &brute, name);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_exact_enumerator_matches_brute_force(
        n in 5u64..28,
        edge_picks in prop::collection::vec((0u64..28, 0u64..28), 0..120),
    ) {
        let edges: Vec<(u64, u64)> = edge_picks
            .into_iter()
            .map(|(a, b)| (a % n, b % n))
            .filter(|(a, b)| a != b)
            .collect();
        let g = graph_from_edges(&edges);

        let exact = enumerate_exact(&g, None).unwrap();
        let brute = brute_force_counts(&g);
        for shape in ALL_GRAPHLETS {
            prop_assert_eq!(
                exact.get(shape),
                brute[shape.index()],
                "{} mismatch on n={} graph",
                shape.id(),
                n
            );
        }
    }

    #[test]
    fn prop_normalized_frequencies_sum_to_one(
        n in 4u64..24,
        edge_picks in prop::collection::vec((0u64..24, 0u64..24), 1..80),
    ) {
        let edges: Vec<(u64, u64)> = edge_picks
            .into_iter()
            .map(|(a, b)| (a % n, b % n))
            .filter(|(a, b)| a != b)
            .collect();
        let g = graph_from_edges(&edges);
        let counts = enumerate_exact(&g, None).unwrap();

        let sum: f64 = counts.normalized().iter().sum();
        if counts.total() > 0 {
            prop_assert!((sum - 1.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(sum, 0.0);
        }
    }
}

#[test]
fn sampling_converges_to_exact_counts() {
    // Bandwidth-3 band graph: near-homogeneous local structure, so the
    // estimator's variance is small and a generous sample pins every shape.
    let mut edges = Vec::new();
    let n = 40u64;
    for i in 0..n {
        for d in 1..=3u64 {
            if i + d < n {
                edges.push((i, i + d));
            }
        }
    }
    let g = graph_from_edges(&edges);

    let exact = enumerate_exact(&g, None).unwrap();
    let sampled = enumerate_sampled(&g, 30_000, 1234, None).unwrap();

    assert!(sampled.sampled);
    assert_eq!(sampled.get(Graphlet::G0Edge), exact.get(Graphlet::G0Edge));

    for shape in ALL_GRAPHLETS {
        let want = exact.get(shape) as f64;
        let got = sampled.get(shape) as f64;
        if want >= 20.0 {
            let rel = (got - want).abs() / want;
            assert!(
                rel < 0.15,
                "{}: exact {want}, sampled {got}, relative error {rel:.3}",
                shape.id()
            );
        }
    }
}

#[test]
fn sampled_signature_still_normalizes() {
    let mut edges = Vec::new();
    for i in 0..20u64 {
        for j in (i + 1)..20 {
            edges.push((i, j));
        }
    }
    let g = graph_from_edges(&edges);
    let sampled = enumerate_sampled(&g, 5_000, 7, None).unwrap();
    let sig = Signature::from_counts(&sampled);

    let sum: f64 = sig.vector().iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!((sig.cosine_similarity(&sig) - 1.0).abs() < 1e-9);
}
