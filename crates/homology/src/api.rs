//! Curated surface for orchestration code (UNSTABLE).
//!
//! The cli and benches import from here so the module layout underneath can
//! move without touching callers.

// Geometry and graph
pub use crate::graph::{maximal_cliques, MaximalCliques, ProximityGraph};
pub use crate::points::{touches, PointCloud};
// Complex and homology
pub use crate::betti::{betti, betti_numbers, betti_numbers_parallel, BettiCfg, BettiNumbers, RankMethod};
pub use crate::complex::{BoundaryMatrix, ComplexCfg, Simplex, SimplicialComplex};
// Threshold driver
pub use crate::rips::{RipsComplex, Sweep, ThresholdCfg};
