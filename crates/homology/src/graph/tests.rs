//! Graph edits, rebuild semantics and clique enumeration.

use super::*;
use crate::error::TopologyError;
use crate::points::PointCloud;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn graph_of(n: usize) -> ProximityGraph {
    let rows: Vec<[f64; 2]> = (0..n).map(|i| [i as f64 * 10.0, 0.0]).collect();
    ProximityGraph::new(PointCloud::new(&rows).unwrap())
}

fn graph_with_edges(n: usize, edges: &[(usize, usize)]) -> ProximityGraph {
    let mut g = graph_of(n);
    for &(u, v) in edges {
        g.add_edge(u, v).unwrap();
    }
    g
}

fn sorted_cliques(g: &ProximityGraph) -> Vec<Vec<usize>> {
    let mut out: Vec<Vec<usize>> = maximal_cliques(g).collect();
    out.sort();
    out
}

#[test]
fn add_edge_is_idempotent_and_symmetric() {
    let mut g = graph_of(3);
    g.add_edge(0, 2).unwrap();
    g.add_edge(2, 0).unwrap();
    assert_eq!(g.n_edges(), 1);
    assert!(g.has_edge(0, 2) && g.has_edge(2, 0));
    assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2)]);
}

#[test]
fn add_edge_rejects_unknown_nodes_and_loops() {
    let mut g = graph_of(2);
    assert_eq!(
        g.add_edge(0, 5),
        Err(TopologyError::InvalidNode {
            node: 5,
            n_nodes: 2
        })
    );
    assert_eq!(g.add_edge(1, 1), Err(TopologyError::SelfLoop { node: 1 }));
    assert_eq!(g.n_edges(), 0);
}

#[test]
fn remove_absent_edge_is_noop() {
    let mut g = graph_with_edges(3, &[(0, 1)]);
    assert!(!g.remove_edge(1, 2));
    assert!(!g.remove_edge(7, 8));
    assert!(g.remove_edge(1, 0));
    assert!(!g.remove_edge(0, 1));
    assert_eq!(g.n_edges(), 0);
}

#[test]
fn rebuild_tracks_non_monotonic_radius() {
    // Points at x = 0, 10, 20, 30.
    let mut g = graph_of(4);
    assert_eq!(g.rebuild(0.0), 0);
    assert_eq!(g.n_edges(), 0);
    g.rebuild(5.0); // neighbours touch exactly
    assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
    g.rebuild(15.0);
    assert_eq!(g.n_edges(), 6);
    g.rebuild(4.9);
    assert_eq!(g.n_edges(), 0);
}

#[test]
fn rebuild_twice_is_stable() {
    let mut g = graph_of(5);
    g.rebuild(7.5);
    let first: Vec<_> = g.edges().collect();
    assert_eq!(g.rebuild(7.5), 0);
    assert_eq!(first, g.edges().collect::<Vec<_>>());
}

#[test]
fn cliques_of_edgeless_graph_are_singletons() {
    let g = graph_of(3);
    assert_eq!(sorted_cliques(&g), vec![vec![0], vec![1], vec![2]]);
    let empty = graph_of(0);
    assert_eq!(maximal_cliques(&empty).count(), 0);
}

#[test]
fn cliques_triangle_plus_tail() {
    let g = graph_with_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
    assert_eq!(
        sorted_cliques(&g),
        vec![vec![0, 1, 2], vec![2, 3], vec![4]]
    );
}

#[test]
fn cliques_square_without_diagonals() {
    let g = graph_with_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    assert_eq!(
        sorted_cliques(&g),
        vec![vec![0, 1], vec![0, 3], vec![1, 2], vec![2, 3]]
    );
}

#[test]
fn clique_stream_is_single_pass() {
    let g = graph_with_edges(3, &[(0, 1)]);
    let mut it = maximal_cliques(&g);
    assert_eq!(it.by_ref().count(), 2);
    assert!(it.next().is_none());
    assert_eq!(maximal_cliques(&g).count(), 2);
}

/// Brute force: maximal vertex subsets whose pairs are all adjacent.
fn brute_force_maximal(n: usize, g: &ProximityGraph) -> BTreeSet<Vec<usize>> {
    let is_clique = |mask: u32| {
        (0..n).all(|u| {
            (u + 1..n).all(|v| (mask & (1 << u)) == 0 || (mask & (1 << v)) == 0 || g.has_edge(u, v))
        })
    };
    let mut out = BTreeSet::new();
    for mask in 1u32..(1 << n) {
        if !is_clique(mask) {
            continue;
        }
        let maximal = (0..n).all(|w| (mask & (1 << w)) != 0 || !is_clique(mask | (1 << w)));
        if maximal {
            out.insert((0..n).filter(|&u| (mask & (1 << u)) != 0).collect());
        }
    }
    out
}

proptest! {
    #[test]
    fn bron_kerbosch_matches_brute_force(
        n in 1usize..9,
        raw in proptest::collection::vec((0usize..9, 0usize..9), 0..30),
    ) {
        let mut g = graph_of(n);
        for (u, v) in raw {
            let (u, v) = (u % n, v % n);
            if u != v {
                g.add_edge(u, v).unwrap();
            }
        }
        let found: Vec<Vec<usize>> = maximal_cliques(&g).collect();
        let unique: BTreeSet<Vec<usize>> = found.iter().cloned().collect();
        prop_assert_eq!(unique.len(), found.len());
        prop_assert_eq!(unique, brute_force_maximal(n, &g));
    }
}
