//! Vietoris–Rips complexes and their Betti numbers.
//!
//! Pipeline per threshold value:
//! points → proximity graph → maximal cliques → face set + boundary matrices → (B0, B1, B2).
//!
//! API Policy
//! - The core never touches files. Point generation, rendering and result
//!   persistence live with the callers (see the `cli` crate).
//! - Breaking changes are fine when they improve clarity.

pub mod api;
pub mod betti;
pub(crate) mod cfg;
pub mod complex;
pub mod error;
pub mod graph;
pub mod points;
pub mod rips;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::TopologyError;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::betti::{BettiCfg, BettiNumbers, RankMethod};
    pub use crate::complex::{ComplexCfg, Simplex, SimplicialComplex};
    pub use crate::graph::{maximal_cliques, ProximityGraph};
    pub use crate::points::{touches, PointCloud};
    pub use crate::rips::{RipsComplex, ThresholdCfg};
    pub use crate::TopologyError;
}
