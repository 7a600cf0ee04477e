//! Betti numbers from boundary-operator ranks.
//!
//! `β_i = (cols(∂_i) − rank ∂_i) − rank ∂_{i+1}` with `rank ∂_0 := 0`, so that
//! β_0 counts connected components.
//!
//! Fallback policy (numeric mode)
//! - If the SVD does not converge, or the matrix is empty, the rank is taken
//!   to be the column count (full column rank). For empty matrices this is
//!   exact; after a genuine SVD failure it can overstate the rank and thus
//!   misstate β. The event is logged, the sweep continues.
//! - `RankMethod::Exact` sidesteps the heuristic entirely.

mod rank;

use serde::Serialize;

use crate::complex::{BoundaryMatrix, SimplicialComplex};
use crate::error::TopologyError;
use rank::{exact_rank, svd_rank, RankNonConvergence};

/// How boundary ranks are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankMethod {
    /// Floating-point SVD with the full-column-rank fallback.
    #[default]
    Svd,
    /// Exact elimination over a large prime field; never falls back.
    Exact,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BettiCfg {
    pub rank: RankMethod,
}

/// B0, B1, B2 at one filtration value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BettiNumbers {
    pub b0: usize,
    pub b1: usize,
    pub b2: usize,
    pub epsilon: f64,
}

impl BettiNumbers {
    pub fn new(b0: usize, b1: usize, b2: usize, epsilon: f64) -> Self {
        Self { b0, b1, b2, epsilon }
    }

    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Total topological complexity.
    pub fn total(&self) -> usize {
        self.b0 + self.b1 + self.b2
    }

    /// χ = β₀ − β₁ + β₂
    pub fn euler_characteristic(&self) -> i64 {
        self.b0 as i64 - self.b1 as i64 + self.b2 as i64
    }
}

fn rank_with_fallback(m: &BoundaryMatrix, method: RankMethod, dim: usize) -> usize {
    match method {
        RankMethod::Exact => exact_rank(m),
        RankMethod::Svd => match svd_rank(m) {
            Ok(r) => r,
            Err(RankNonConvergence::EmptyMatrix) => {
                tracing::debug!(dim, shape = ?m.shape(), "empty boundary matrix; rank = cols");
                m.cols()
            }
            Err(RankNonConvergence::SvdDiverged) => {
                tracing::warn!(
                    dim,
                    shape = ?m.shape(),
                    "rank did not converge; assuming full column rank"
                );
                m.cols()
            }
        },
    }
}

/// Betti number `i` of `complex`.
///
/// Errors on structural defects (`InvariantViolation`) and on a skeleton
/// truncated below dimension `i + 1`; numeric trouble degrades to the
/// fallback rank.
pub fn betti(complex: &SimplicialComplex, i: usize, cfg: BettiCfg) -> Result<usize, TopologyError> {
    if let Some(max_face_dim) = complex.cfg().max_face_dim {
        if max_face_dim < i + 1 {
            return Err(TopologyError::SkeletonTooShallow { dim: i, max_face_dim });
        }
    }
    let bi = complex.boundary_operator(i)?;
    let bip1 = complex.boundary_operator(i + 1)?;
    if bi.cols() > 0 && bip1.rows() != bi.cols() {
        return Err(TopologyError::invariant(format!(
            "boundary shapes disagree: ∂{i} is {:?}, ∂{} is {:?}",
            bi.shape(),
            i + 1,
            bip1.shape()
        )));
    }

    let rank_i = if i == 0 {
        0
    } else {
        rank_with_fallback(&bi, cfg.rank, i)
    };
    let rank_ip1 = rank_with_fallback(&bip1, cfg.rank, i + 1);

    let value = (bi.cols() as i64 - rank_i as i64) - rank_ip1 as i64;
    if value < 0 {
        tracing::warn!(
            dim = i,
            value,
            "negative Betti number after rank fallback; clamping to 0"
        );
        return Ok(0);
    }
    Ok(value as usize)
}

/// B0, B1, B2 against one complex snapshot, sequentially.
pub fn betti_numbers(
    complex: &SimplicialComplex,
    epsilon: f64,
    cfg: BettiCfg,
) -> Result<BettiNumbers, TopologyError> {
    Ok(BettiNumbers::new(
        betti(complex, 0, cfg)?,
        betti(complex, 1, cfg)?,
        betti(complex, 2, cfg)?,
        epsilon,
    ))
}

/// Same as [`betti_numbers`], one scoped thread per dimension.
///
/// The shared borrow pins the snapshot: nothing can mutate the complex until
/// all three computations are joined.
pub fn betti_numbers_parallel(
    complex: &SimplicialComplex,
    epsilon: f64,
    cfg: BettiCfg,
) -> Result<BettiNumbers, TopologyError> {
    let [b0, b1, b2] = std::thread::scope(|s| {
        let handles = [0, 1, 2].map(|i| s.spawn(move || betti(complex, i, cfg)));
        handles.map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
    });
    Ok(BettiNumbers::new(b0?, b1?, b2?, epsilon))
}
