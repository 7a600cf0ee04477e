//! Simplicial complexes generated by maximal simplices.
//!
//! Purpose
//! - Store maximal simplices, derive the downward-closed face set, index it by
//!   dimension, and build the signed boundary operators between consecutive
//!   dimensions.
//!
//! Conventions
//! - Faces of one dimension are kept sorted; row/column order of every
//!   boundary matrix follows that order.
//! - `boundary_operator(0)` maps onto the empty simplex: one row of ones.
//! - State changes only by wholesale replacement (`import_simplices`).
//!
//! Caveat: a maximal simplex with k vertices contributes 2^k − 1 faces. Set
//! `ComplexCfg::max_face_dim` when only low-dimensional homology is needed.

mod boundary;
mod simplex;

pub use boundary::BoundaryMatrix;
pub use simplex::Simplex;

use simplex::for_each_combination;

use std::collections::BTreeSet;

use crate::betti::{self, BettiCfg};
use crate::error::TopologyError;

/// Complex construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComplexCfg {
    /// Highest face dimension materialised; `None` keeps the full face set.
    /// Betti number `i` needs faces up to dimension `i + 1`.
    pub max_face_dim: Option<usize>,
}

/// Maximal simplices plus their full face set, grouped by dimension.
#[derive(Clone, Debug, Default)]
pub struct SimplicialComplex {
    cfg: ComplexCfg,
    simplices: Vec<Simplex>,
    by_dim: Vec<Vec<Simplex>>,
}

impl SimplicialComplex {
    pub fn new<I, S>(simplices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        Self::with_cfg(simplices, ComplexCfg::default())
    }

    pub fn with_cfg<I, S>(simplices: I, cfg: ComplexCfg) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        let mut out = Self {
            cfg,
            ..Self::default()
        };
        out.import_simplices(simplices);
        out
    }

    /// Skeleton truncation shortcut: faces up to dimension `d`.
    pub fn with_max_dim<I, S>(simplices: I, d: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        Self::with_cfg(
            simplices,
            ComplexCfg {
                max_face_dim: Some(d),
            },
        )
    }

    #[inline]
    pub fn cfg(&self) -> ComplexCfg {
        self.cfg
    }

    /// Replace the stored simplices and recompute the face set.
    ///
    /// Each input is sorted and deduplicated; empty inputs are ignored.
    pub fn import_simplices<I, S>(&mut self, simplices: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        self.simplices = simplices
            .into_iter()
            .filter_map(|s| Simplex::new(s.as_ref().iter().copied()))
            .collect();
        self.by_dim = self.faces();
    }

    fn faces(&self) -> Vec<Vec<Simplex>> {
        let mut faceset: BTreeSet<Simplex> = BTreeSet::new();
        for simplex in &self.simplices {
            let top = match self.cfg.max_face_dim {
                Some(d) => simplex.len().min(d + 1),
                None => simplex.len(),
            };
            for k in (1..=top).rev() {
                for_each_combination(simplex.vertices(), k, |face| {
                    if !faceset.contains(face) {
                        faceset.insert(Simplex::from_sorted(face.to_vec()));
                    }
                });
            }
        }
        let mut by_dim: Vec<Vec<Simplex>> = Vec::new();
        // BTreeSet order is lexicographic, so each bucket ends up sorted.
        for face in faceset {
            let d = face.dim();
            if by_dim.len() <= d {
                by_dim.resize_with(d + 1, Vec::new);
            }
            by_dim[d].push(face);
        }
        by_dim
    }

    /// Stored (maximal) simplices in import order.
    #[inline]
    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    /// Faces of dimension `n`, sorted.
    pub fn n_faces(&self, n: usize) -> &[Simplex] {
        self.by_dim.get(n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every face, by ascending dimension.
    pub fn face_set(&self) -> impl Iterator<Item = &Simplex> + '_ {
        self.by_dim.iter().flatten()
    }

    pub fn n_faces_total(&self) -> usize {
        self.by_dim.iter().map(Vec::len).sum()
    }

    /// Highest face dimension present; `None` for the empty complex.
    pub fn dimension(&self) -> Option<usize> {
        self.by_dim.len().checked_sub(1)
    }

    pub fn contains(&self, face: &Simplex) -> bool {
        self.n_faces(face.dim()).binary_search(face).is_ok()
    }

    fn face_index(&self, face: &Simplex) -> Option<usize> {
        self.n_faces(face.dim()).binary_search(face).ok()
    }

    /// Signed boundary map from `i`-faces to `(i-1)`-faces.
    ///
    /// Shape is `|n_faces(i-1)| × |n_faces(i)|`, or `1 × |n_faces(i)|` (all
    /// ones) when there are no `(i-1)`-faces, which always holds for `i = 0`.
    pub fn boundary_operator(&self, i: usize) -> Result<BoundaryMatrix, TopologyError> {
        let source = self.n_faces(i);
        let target: &[Simplex] = match i {
            0 => &[],
            _ => self.n_faces(i - 1),
        };
        if target.is_empty() {
            return Ok(BoundaryMatrix::augmentation(source.len()));
        }
        let mut matrix = BoundaryMatrix::zeros(target.len(), source.len());
        for (j, simplex) in source.iter().enumerate() {
            for (face, sign) in simplex.boundary() {
                let k = self.face_index(&face).ok_or_else(|| {
                    TopologyError::invariant(format!(
                        "face {face} of {simplex} missing from dimension {}",
                        i - 1
                    ))
                })?;
                matrix.set(k, j, sign);
            }
        }
        Ok(matrix)
    }

    /// Betti number `i` with the default rank policy.
    pub fn betti_number(&self, i: usize) -> Result<usize, TopologyError> {
        betti::betti(self, i, BettiCfg::default())
    }

    /// Downward closure, and every face lies inside some stored simplex.
    pub fn check_invariants(&self) -> Result<(), TopologyError> {
        for (d, bucket) in self.by_dim.iter().enumerate() {
            for face in bucket {
                if face.dim() != d {
                    return Err(TopologyError::invariant(format!(
                        "face {face} filed under dimension {d}"
                    )));
                }
                if let Some((missing, _)) = face.boundary().find(|(f, _)| !self.contains(f)) {
                    return Err(TopologyError::invariant(format!(
                        "face set not downward closed: {missing} of {face} absent"
                    )));
                }
                if !self.simplices.iter().any(|s| face.is_face_of(s)) {
                    return Err(TopologyError::invariant(format!(
                        "face {face} is not contained in any maximal simplex"
                    )));
                }
            }
        }
        Ok(())
    }
}
