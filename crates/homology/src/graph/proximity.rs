//! Adjacency-set graph over a `PointCloud`.

use std::collections::BTreeSet;

use crate::error::TopologyError;
use crate::points::{touches, PointCloud};

/// Undirected simple graph whose nodes are the points of a cloud.
///
/// Invariants:
/// - `adj.len() == points.len()`; `v ∈ adj[u]` iff `u ∈ adj[v]`.
/// - No self-loops.
#[derive(Clone, Debug)]
pub struct ProximityGraph {
    points: PointCloud,
    adj: Vec<BTreeSet<usize>>,
}

impl ProximityGraph {
    /// Isolated nodes `0..points.len()`.
    pub fn new(points: PointCloud) -> Self {
        let adj = vec![BTreeSet::new(); points.len()];
        Self { points, adj }
    }

    #[inline]
    pub fn points(&self) -> &PointCloud {
        &self.points
    }
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.adj.len()
    }
    pub fn n_edges(&self) -> usize {
        self.adj.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    fn check_node(&self, node: usize) -> Result<(), TopologyError> {
        if node < self.n_nodes() {
            Ok(())
        } else {
            Err(TopologyError::InvalidNode {
                node,
                n_nodes: self.n_nodes(),
            })
        }
    }

    /// Insert the unordered edge `{u, v}`; inserting an existing edge is a no-op.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), TopologyError> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(TopologyError::SelfLoop { node: u });
        }
        self.adj[u].insert(v);
        self.adj[v].insert(u);
        Ok(())
    }

    /// Delete `{u, v}` if present. Returns whether an edge was removed; never fails.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if u >= self.n_nodes() || v >= self.n_nodes() {
            return false;
        }
        let removed = self.adj[u].remove(&v);
        self.adj[v].remove(&u);
        removed
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj.get(u).is_some_and(|n| n.contains(&v))
    }

    /// Neighbours of `u` (empty for unknown nodes).
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj.get(u).into_iter().flat_map(|n| n.iter().copied())
    }

    pub(crate) fn adjacency(&self) -> &[BTreeSet<usize>] {
        &self.adj
    }

    /// All edges as `(u, v)` with `u < v`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, n)| n.range(u + 1..).map(move |&v| (u, v)))
    }

    /// Re-evaluate the contact predicate for every unordered pair with `r1 = r2 = radius`.
    ///
    /// Full O(n²) pass; edges are added or removed to match the predicate.
    /// Returns the number of edges that changed.
    pub fn rebuild(&mut self, radius: f64) -> usize {
        let n = self.n_nodes();
        let mut changed = 0;
        for u in 0..n {
            for v in u + 1..n {
                let hit = match (self.points.get(u), self.points.get(v)) {
                    (Some(p), Some(q)) => touches(p, q, radius, radius),
                    _ => false,
                };
                let present = self.adj[u].contains(&v);
                if hit && !present {
                    self.adj[u].insert(v);
                    self.adj[v].insert(u);
                    changed += 1;
                } else if !hit && present {
                    self.remove_edge(u, v);
                    changed += 1;
                }
            }
        }
        tracing::trace!(radius, changed, edges = self.n_edges(), "graph rebuilt");
        changed
    }
}
