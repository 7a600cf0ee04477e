//! Point ingestion and the disk-contact predicate.
//!
//! Node ids are positions in the cloud; they stay fixed for the lifetime of
//! the graph built from it.

use nalgebra::DVector;

use crate::error::TopologyError;

/// Validated point set: every point has the same number (2 or 3) of finite coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    dim: usize,
    coords: Vec<DVector<f64>>,
}

impl PointCloud {
    /// Validate rows before any graph work happens.
    ///
    /// An empty input is accepted (dimension 0, no nodes).
    pub fn new<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TopologyError> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let dim = first.as_ref().len();
        if !(2..=3).contains(&dim) {
            return Err(TopologyError::UnsupportedDimension { dim });
        }
        let mut coords = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(TopologyError::DimensionMismatch {
                    index,
                    expected: dim,
                    found: row.len(),
                });
            }
            if row.iter().any(|x| !x.is_finite()) {
                return Err(TopologyError::NonFiniteCoordinate { index });
            }
            coords.push(DVector::from_column_slice(row));
        }
        Ok(Self { dim, coords })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
    /// Coordinates of node `id`, if it exists.
    #[inline]
    pub fn get(&self, id: usize) -> Option<&DVector<f64>> {
        self.coords.get(id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &DVector<f64>> {
        self.coords.iter()
    }
}

/// Closed-annulus test: disks of radius `r1`, `r2` at `p1`, `p2` touch or overlap.
///
/// True iff `(r1 - r2)^2 <= |p1 - p2|^2 <= (r1 + r2)^2`. Works for any
/// dimension as long as both points agree.
#[inline]
pub fn touches(p1: &DVector<f64>, p2: &DVector<f64>, r1: f64, r2: f64) -> bool {
    debug_assert_eq!(p1.len(), p2.len(), "points of different dimension");
    let d2 = (p1 - p2).norm_squared();
    let lo = (r1 - r2) * (r1 - r2);
    let hi = (r1 + r2) * (r1 + r2);
    lo <= d2 && d2 <= hi
}
