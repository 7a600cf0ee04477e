//! Numeric defaults (internal).
//!
//! Policy
//! - Fixed constants; user-facing knobs live in `ThresholdCfg`/`BettiCfg`.

/// Unit conversion from slider/sweep value to epsilon.
pub(crate) const DEFAULT_SCALE: f64 = 0.1;
/// Disk radius as a fraction of epsilon (disks of diameter epsilon).
pub(crate) const DEFAULT_RADIUS_RATIO: f64 = 0.5;
/// Iteration cap handed to `SVD::try_new`; `0` would mean "until convergence".
pub(crate) const SVD_MAX_ITER: usize = 1_000;
/// Convergence epsilon for the SVD sweeps.
pub(crate) const SVD_EPS: f64 = 1e-14;
/// Modulus for exact rank; `2^31 - 1` keeps products inside `u64`.
pub(crate) const RANK_PRIME: u64 = 2_147_483_647;
