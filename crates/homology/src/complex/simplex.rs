//! Simplex value type and subset enumeration.

use std::borrow::Borrow;
use std::fmt;

/// Sorted tuple of distinct node ids; dimension is `len - 1`.
///
/// Ordering is lexicographic on the vertex ids, which gives every face list a
/// fixed enumeration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Simplex(Vec<usize>);

impl Simplex {
    /// Sort and deduplicate `vertices`; `None` for the empty set.
    pub fn new(vertices: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut v: Vec<usize> = vertices.into_iter().collect();
        if v.is_empty() {
            return None;
        }
        v.sort_unstable();
        v.dedup();
        Some(Self(v))
    }

    /// Caller guarantees `v` is sorted, distinct and non-empty.
    pub(crate) fn from_sorted(v: Vec<usize>) -> Self {
        debug_assert!(!v.is_empty() && v.windows(2).all(|w| w[0] < w[1]));
        Self(v)
    }

    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.0
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len() - 1
    }

    /// Signed codimension-1 faces: deleting the vertex at position `a` gives sign `(-1)^a`.
    ///
    /// Empty for 0-simplices (their boundary is the empty simplex).
    pub fn boundary(&self) -> impl Iterator<Item = (Simplex, i8)> + '_ {
        let n = if self.0.len() > 1 { self.0.len() } else { 0 };
        (0..n).map(move |a| {
            let mut face = self.0.clone();
            face.remove(a);
            let sign = if a % 2 == 1 { -1 } else { 1 };
            (Simplex(face), sign)
        })
    }

    /// `self ⊆ other` as vertex sets (both sorted).
    pub fn is_face_of(&self, other: &Simplex) -> bool {
        let mut it = other.0.iter();
        self.0.iter().all(|v| it.any(|w| w == v))
    }
}

// Lets face sets be probed with plain vertex slices.
impl Borrow<[usize]> for Simplex {
    fn borrow(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Call `f` with every k-subset of `items` in lexicographic index order.
pub(crate) fn for_each_combination<T: Copy>(items: &[T], k: usize, mut f: impl FnMut(&[T])) {
    let n = items.len();
    if k == 0 || k > n {
        return;
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut buf: Vec<T> = idxs.iter().map(|&i| items[i]).collect();
    loop {
        f(&buf);
        // Rightmost index that can still move.
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            return;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
        for j in i..k {
            buf[j] = items[idxs[j]];
        }
    }
}
