//! Proximity graph and maximal-clique enumeration.
//!
//! Purpose
//! - Hold the point set as nodes with a symmetric edge relation that is
//!   recomputed from scratch for every radius (radius is not monotonic across
//!   calls, edges can appear and disappear).
//! - Enumerate the maximal cliques; these are the maximal simplices of the
//!   Vietoris–Rips complex at that radius.
//!
//! Layout: `proximity.rs` (graph + rebuild), `cliques.rs` (Bron–Kerbosch).

mod cliques;
mod proximity;

pub use cliques::{maximal_cliques, MaximalCliques};
pub use proximity::ProximityGraph;

#[cfg(test)]
mod tests;
