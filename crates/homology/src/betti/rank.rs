//! Matrix rank of boundary operators.
//!
//! - `svd_rank`: numeric rank from singular values above the cutoff
//!   `σ_max · max(rows, cols) · ε`.
//! - `exact_rank`: Gaussian elimination over F_p, p = 2^31 − 1. Boundary
//!   entries are ±1, so this matches the rank over Q unless p divides a torsion
//!   coefficient.

use nalgebra::SVD;

use crate::cfg::{RANK_PRIME, SVD_EPS, SVD_MAX_ITER};
use crate::complex::BoundaryMatrix;

/// Why a numeric rank could not be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RankNonConvergence {
    /// Zero rows or zero columns; there are no singular values to threshold.
    EmptyMatrix,
    /// SVD iteration cap reached.
    SvdDiverged,
}

pub(crate) fn svd_rank(m: &BoundaryMatrix) -> Result<usize, RankNonConvergence> {
    if m.is_empty() {
        return Err(RankNonConvergence::EmptyMatrix);
    }
    let dense = m.to_dense();
    let svd = SVD::try_new(dense, false, false, SVD_EPS, SVD_MAX_ITER)
        .ok_or(RankNonConvergence::SvdDiverged)?;
    let s = &svd.singular_values;
    let smax = s.iter().copied().fold(0.0_f64, f64::max);
    if !smax.is_finite() {
        return Err(RankNonConvergence::SvdDiverged);
    }
    let tol = smax * m.rows().max(m.cols()) as f64 * f64::EPSILON;
    Ok(s.iter().filter(|&&x| x > tol).count())
}

fn pow_mod(mut base: u64, mut exp: u64) -> u64 {
    let mut acc = 1;
    base %= RANK_PRIME;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % RANK_PRIME;
        }
        base = base * base % RANK_PRIME;
        exp >>= 1;
    }
    acc
}

pub(crate) fn exact_rank(m: &BoundaryMatrix) -> usize {
    if m.is_empty() {
        return 0;
    }
    let (rows, cols) = m.shape();
    let mut a = vec![vec![0u64; cols]; rows];
    for ((r, c), v) in m.entries() {
        a[r][c] = if v < 0 { RANK_PRIME - 1 } else { 1 };
    }
    let mut rank = 0;
    for col in 0..cols {
        let Some(pivot) = (rank..rows).find(|&r| a[r][col] != 0) else {
            continue;
        };
        a.swap(rank, pivot);
        let inv = pow_mod(a[rank][col], RANK_PRIME - 2);
        for c in col..cols {
            a[rank][c] = a[rank][c] * inv % RANK_PRIME;
        }
        for r in 0..rows {
            if r == rank || a[r][col] == 0 {
                continue;
            }
            let factor = a[r][col];
            for c in col..cols {
                let sub = factor * a[rank][c] % RANK_PRIME;
                a[r][c] = (a[r][c] + RANK_PRIME - sub) % RANK_PRIME;
            }
        }
        rank += 1;
        if rank == rows {
            break;
        }
    }
    rank
}
