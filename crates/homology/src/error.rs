//! Error type shared by ingestion, graph edits and boundary construction.
//!
//! Rank non-convergence is deliberately absent: it is recovered inside
//! `betti` and only reported through `tracing`.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// Edge operation referenced a node id outside `0..n_nodes`.
    InvalidNode { node: usize, n_nodes: usize },
    /// Edge operation with `u == v`.
    SelfLoop { node: usize },
    /// Point `index` has `found` coordinates while earlier points had `expected`.
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// Coordinates must be 2D or 3D.
    UnsupportedDimension { dim: usize },
    NonFiniteCoordinate { index: usize },
    /// Thresholds are non-negative finite reals.
    InvalidThreshold { value: f64 },
    /// Threshold-to-radius factors are finite and non-negative.
    InvalidScaling { scale: f64, radius_ratio: f64 },
    /// Betti number `dim` needs faces of dimension `dim + 1`, but the
    /// complex was truncated at `max_face_dim`.
    SkeletonTooShallow { dim: usize, max_face_dim: usize },
    /// Boundary shapes disagree or the face set is not a closed complex.
    InvariantViolation { reason: String },
}

impl TopologyError {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode { node, n_nodes } => {
                write!(f, "invalid node {node} (graph has {n_nodes} nodes)")
            }
            Self::SelfLoop { node } => write!(f, "self-loop on node {node} is not allowed"),
            Self::DimensionMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "point {index} has {found} coordinates, expected {expected}"
            ),
            Self::UnsupportedDimension { dim } => {
                write!(f, "points must have 2 or 3 coordinates, got {dim}")
            }
            Self::NonFiniteCoordinate { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "threshold must be finite and >= 0, got {value}")
            }
            Self::InvalidScaling {
                scale,
                radius_ratio,
            } => write!(
                f,
                "scale and radius_ratio must be finite and >= 0, got {scale} and {radius_ratio}"
            ),
            Self::SkeletonTooShallow { dim, max_face_dim } => write!(
                f,
                "B{dim} needs faces up to dimension {}, complex keeps only {max_face_dim}",
                dim + 1
            ),
            Self::InvariantViolation { reason } => write!(f, "invariant violated: {reason}"),
        }
    }
}

impl std::error::Error for TopologyError {}
