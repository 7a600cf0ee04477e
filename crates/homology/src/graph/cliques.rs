//! Maximal cliques via Bron–Kerbosch with pivoting.
//!
//! Iterative version of the classic recursion `BK(R, P, X)`: every stack frame
//! owns its `R`, `P`, `X` and the vertices of `P \ N(pivot)` still to branch on.
//! The pivot maximises `|P ∩ N(u)|` over `u ∈ P ∪ X` (Tomita et al.).

use std::collections::BTreeSet;

use super::ProximityGraph;

struct Frame {
    clique: Vec<usize>,
    cand: BTreeSet<usize>,
    excl: BTreeSet<usize>,
    todo: Vec<usize>,
}

impl Frame {
    fn new(
        clique: Vec<usize>,
        cand: BTreeSet<usize>,
        excl: BTreeSet<usize>,
        adj: &[BTreeSet<usize>],
    ) -> Self {
        let pivot = cand
            .iter()
            .chain(excl.iter())
            .max_by_key(|&&u| adj[u].intersection(&cand).count())
            .copied();
        let mut todo: Vec<usize> = match pivot {
            Some(p) => cand.difference(&adj[p]).copied().collect(),
            None => Vec::new(),
        };
        // `pop` then branches in ascending vertex order.
        todo.reverse();
        Self {
            clique,
            cand,
            excl,
            todo,
        }
    }
}

/// Lazy stream of maximal cliques, each a sorted vector of node ids.
///
/// Borrowing the graph keeps it immutable while the stream is alive. Once
/// exhausted it stays exhausted; call [`maximal_cliques`] again to re-enumerate.
pub struct MaximalCliques<'g> {
    adj: &'g [BTreeSet<usize>],
    stack: Vec<Frame>,
}

/// Enumerate all maximal cliques of `graph` (isolated nodes are singletons).
pub fn maximal_cliques(graph: &ProximityGraph) -> MaximalCliques<'_> {
    let adj = graph.adjacency();
    let mut stack = Vec::new();
    if !adj.is_empty() {
        let all: BTreeSet<usize> = (0..adj.len()).collect();
        stack.push(Frame::new(Vec::new(), all, BTreeSet::new(), adj));
    }
    MaximalCliques { adj, stack }
}

impl Iterator for MaximalCliques<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(v) = frame.todo.pop() else {
                self.stack.pop();
                continue;
            };
            let nv = &self.adj[v];
            let cand: BTreeSet<usize> = frame.cand.intersection(nv).copied().collect();
            let excl: BTreeSet<usize> = frame.excl.intersection(nv).copied().collect();
            let mut clique = frame.clique.clone();
            clique.push(v);
            frame.cand.remove(&v);
            frame.excl.insert(v);

            if cand.is_empty() {
                if excl.is_empty() {
                    clique.sort_unstable();
                    return Some(clique);
                }
                continue;
            }
            let child = Frame::new(clique, cand, excl, self.adj);
            self.stack.push(child);
        }
    }
}
