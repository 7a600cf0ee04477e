//! Vietoris–Rips driver: a proximity graph feeding a simplicial complex.
//!
//! `RipsComplex` owns the graph (geometry-driven edge source) and a generic
//! complex; the complex is rebuilt wholesale every time the threshold moves.

use crate::betti::{betti_numbers, betti_numbers_parallel, BettiCfg, BettiNumbers};
use crate::cfg::{DEFAULT_RADIUS_RATIO, DEFAULT_SCALE};
use crate::complex::{ComplexCfg, SimplicialComplex};
use crate::error::TopologyError;
use crate::graph::{maximal_cliques, ProximityGraph};
use crate::points::PointCloud;

/// Mapping from a raw sweep value to epsilon and the disk radius.
///
/// `epsilon = threshold · scale`, `radius = epsilon · radius_ratio`. The
/// defaults (0.1, 0.5) give `radius = threshold · scale / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdCfg {
    pub scale: f64,
    pub radius_ratio: f64,
}

impl Default for ThresholdCfg {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            radius_ratio: DEFAULT_RADIUS_RATIO,
        }
    }
}

impl ThresholdCfg {
    #[inline]
    pub fn epsilon_for(&self, threshold: f64) -> f64 {
        threshold * self.scale
    }
    #[inline]
    pub fn radius_for(&self, threshold: f64) -> f64 {
        self.epsilon_for(threshold) * self.radius_ratio
    }

    /// Both factors must be finite and non-negative.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let ok = |x: f64| x.is_finite() && x >= 0.0;
        if ok(self.scale) && ok(self.radius_ratio) {
            Ok(())
        } else {
            Err(TopologyError::InvalidScaling {
                scale: self.scale,
                radius_ratio: self.radius_ratio,
            })
        }
    }
}

/// Graph + complex pair for one point set.
///
/// Invariant: `complex` always holds the clique complex of `graph` as of the
/// last `update`/`update_simplices` call.
#[derive(Clone, Debug)]
pub struct RipsComplex {
    graph: ProximityGraph,
    complex: SimplicialComplex,
    threshold_cfg: ThresholdCfg,
    betti_cfg: BettiCfg,
    epsilon: f64,
}

impl RipsComplex {
    /// Edgeless graph over `points`; the initial complex is one vertex per point.
    pub fn new(points: PointCloud) -> Self {
        let graph = ProximityGraph::new(points);
        let complex = SimplicialComplex::new(maximal_cliques(&graph));
        Self {
            graph,
            complex,
            threshold_cfg: ThresholdCfg::default(),
            betti_cfg: BettiCfg::default(),
            epsilon: 0.0,
        }
    }

    /// Like [`RipsComplex::new`] with explicit configs. Rejects non-finite or
    /// negative threshold factors.
    pub fn with_cfg(
        points: PointCloud,
        threshold_cfg: ThresholdCfg,
        complex_cfg: ComplexCfg,
        betti_cfg: BettiCfg,
    ) -> Result<Self, TopologyError> {
        threshold_cfg.validate()?;
        let graph = ProximityGraph::new(points);
        let complex = SimplicialComplex::with_cfg(maximal_cliques(&graph), complex_cfg);
        Ok(Self {
            graph,
            complex,
            threshold_cfg,
            betti_cfg,
            epsilon: 0.0,
        })
    }

    /// Validate raw rows, then build.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TopologyError> {
        Ok(Self::new(PointCloud::new(rows)?))
    }

    #[inline]
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }
    /// Manual edge edits; call `update_simplices` afterwards.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut ProximityGraph {
        &mut self.graph
    }
    #[inline]
    pub fn complex(&self) -> &SimplicialComplex {
        &self.complex
    }
    #[inline]
    pub fn threshold_cfg(&self) -> ThresholdCfg {
        self.threshold_cfg
    }
    /// Epsilon of the last `update`.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Independent copy of the current complex for fan-out to other threads.
    pub fn snapshot(&self) -> SimplicialComplex {
        self.complex.clone()
    }

    /// Re-derive simplices from the maximal cliques of the current graph.
    pub fn update_simplices(&mut self) {
        self.complex.import_simplices(maximal_cliques(&self.graph));
    }

    /// Rebuild the graph for `threshold` and replace the complex.
    pub fn update(&mut self, threshold: f64) -> Result<(), TopologyError> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(TopologyError::InvalidThreshold { value: threshold });
        }
        let radius = self.threshold_cfg.radius_for(threshold);
        self.graph.rebuild(radius);
        self.update_simplices();
        self.epsilon = self.threshold_cfg.epsilon_for(threshold);
        tracing::debug!(
            threshold,
            epsilon = self.epsilon,
            radius,
            edges = self.graph.n_edges(),
            simplices = self.complex.simplices().len(),
            faces = self.complex.n_faces_total(),
            "complex updated"
        );
        Ok(())
    }

    /// B0..B2 of the current snapshot.
    pub fn betti_numbers(&self) -> Result<BettiNumbers, TopologyError> {
        betti_numbers(&self.complex, self.epsilon, self.betti_cfg)
    }

    /// B0..B2 of the current snapshot, one thread per dimension.
    pub fn betti_numbers_parallel(&self) -> Result<BettiNumbers, TopologyError> {
        betti_numbers_parallel(&self.complex, self.epsilon, self.betti_cfg)
    }

    /// `update` followed by `betti_numbers`.
    pub fn evaluate(&mut self, threshold: f64) -> Result<BettiNumbers, TopologyError> {
        self.update(threshold)?;
        self.betti_numbers()
    }

    /// Lazily evaluate a sequence of thresholds. Dropping the iterator early
    /// leaves the complex at the last evaluated threshold.
    pub fn sweep<I>(&mut self, thresholds: I) -> Sweep<'_, I::IntoIter>
    where
        I: IntoIterator<Item = f64>,
    {
        Sweep {
            rips: self,
            thresholds: thresholds.into_iter(),
        }
    }
}

/// Iterator returned by [`RipsComplex::sweep`].
pub struct Sweep<'a, I> {
    rips: &'a mut RipsComplex,
    thresholds: I,
}

impl<I: Iterator<Item = f64>> Iterator for Sweep<'_, I> {
    type Item = Result<BettiNumbers, TopologyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.thresholds.next()?;
        Some(self.rips.evaluate(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betti::RankMethod;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn rips(rows: &[[f64; 2]]) -> RipsComplex {
        RipsComplex::from_rows(rows).unwrap()
    }

    /// Threshold whose radius is exactly `r` under the default cfg.
    fn threshold_for_radius(r: f64) -> f64 {
        let cfg = ThresholdCfg::default();
        r / (cfg.scale * cfg.radius_ratio)
    }

    #[test]
    fn default_radius_is_half_scaled_threshold() {
        let cfg = ThresholdCfg::default();
        assert!((cfg.radius_for(10.0) - 0.5).abs() < 1e-12);
        assert!((cfg.epsilon_for(10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_threshold_factors() {
        let points = PointCloud::new(&[[0.0, 0.0], [1.0, 0.0]]).unwrap();
        for (scale, radius_ratio) in [
            (f64::NAN, 0.5),
            (-0.1, 0.5),
            (0.1, f64::INFINITY),
            (0.1, -1.0),
        ] {
            let cfg = ThresholdCfg {
                scale,
                radius_ratio,
            };
            assert!(matches!(
                RipsComplex::with_cfg(
                    points.clone(),
                    cfg,
                    ComplexCfg::default(),
                    BettiCfg::default()
                ),
                Err(TopologyError::InvalidScaling { .. })
            ));
        }
        assert!(ThresholdCfg::default().validate().is_ok());
    }

    #[test]
    fn truncated_rips_skeleton_errors_instead_of_misreporting() {
        let points = PointCloud::new(&[[0.0, 0.0], [1.0, 0.0], [0.5, 0.8]]).unwrap();
        let mut vr = RipsComplex::with_cfg(
            points,
            ThresholdCfg::default(),
            ComplexCfg {
                max_face_dim: Some(1),
            },
            BettiCfg::default(),
        )
        .unwrap();
        assert!(matches!(
            vr.evaluate(threshold_for_radius(0.6)),
            Err(TopologyError::SkeletonTooShallow {
                dim: 1,
                max_face_dim: 1
            })
        ));
    }

    #[test]
    fn isolated_points_at_threshold_zero() {
        let mut vr = rips(&[[0.0, 0.0], [3.0, 0.0], [0.0, 7.0], [5.0, 5.0]]);
        let b = vr.evaluate(0.0).unwrap();
        assert_eq!(vr.graph().n_edges(), 0);
        assert_eq!(vr.complex().simplices().len(), 4);
        assert!(vr.complex().simplices().iter().all(|s| s.len() == 1));
        assert_eq!(b.as_array(), [4, 0, 0]);
    }

    #[test]
    fn single_edge() {
        let mut vr = rips(&[[0.0, 0.0], [1.0, 0.0], [20.0, 0.0], [0.0, 20.0]]);
        let b = vr.evaluate(threshold_for_radius(0.6)).unwrap();
        assert_eq!(vr.graph().edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(b.as_array(), [3, 0, 0]);
    }

    #[test]
    fn unit_square_cycle_without_diagonals() {
        // Side 2, diagonal 2√2 ≈ 2.83: radius 1.2 reaches sides (2.4) not diagonals.
        let mut vr = rips(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
        let b = vr.evaluate(threshold_for_radius(1.2)).unwrap();
        assert_eq!(vr.graph().n_edges(), 4);
        assert_eq!(b.as_array(), [1, 1, 0]);
        // Diagonals appear at radius √2: the loop fills in.
        let b = vr.evaluate(threshold_for_radius(1.5)).unwrap();
        assert_eq!(vr.graph().n_edges(), 6);
        assert_eq!(b.as_array(), [1, 0, 0]);
    }

    #[test]
    fn filled_triangle() {
        let mut vr = rips(&[[0.0, 0.0], [1.0, 0.0], [0.5, 0.8]]);
        let b = vr.evaluate(threshold_for_radius(0.6)).unwrap();
        assert_eq!(vr.complex().n_faces(2).len(), 1);
        assert_eq!(b.as_array(), [1, 0, 0]);
    }

    #[test]
    fn repeated_update_is_idempotent() {
        let mut vr = rips(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.5], [0.3, 1.1], [5.0, 5.0]]);
        let t = threshold_for_radius(0.7);
        vr.update(t).unwrap();
        let edges: Vec<_> = vr.graph().edges().collect();
        let faces: Vec<_> = vr.complex().face_set().cloned().collect();
        vr.update(t).unwrap();
        assert_eq!(edges, vr.graph().edges().collect::<Vec<_>>());
        assert_eq!(faces, vr.complex().face_set().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn rejects_bad_thresholds() {
        let mut vr = rips(&[[0.0, 0.0]]);
        assert!(matches!(
            vr.update(-1.0),
            Err(TopologyError::InvalidThreshold { .. })
        ));
        assert!(vr.update(f64::NAN).is_err());
    }

    #[test]
    fn malformed_rows_abort_before_graph_work() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            RipsComplex::from_rows(&rows),
            Err(TopologyError::DimensionMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn manual_edges_then_update_simplices() {
        let mut vr = rips(&[[0.0, 0.0], [9.0, 0.0], [0.0, 9.0]]);
        vr.graph_mut().add_edge(0, 1).unwrap();
        vr.graph_mut().add_edge(1, 2).unwrap();
        vr.graph_mut().add_edge(0, 2).unwrap();
        vr.update_simplices();
        assert_eq!(vr.betti_numbers().unwrap().as_array(), [1, 0, 0]);
    }

    #[test]
    fn sweep_reports_scaled_epsilon_and_can_stop_early() {
        let mut vr = rips(&[[0.0, 0.0], [1.0, 0.0]]);
        let out: Vec<BettiNumbers> = vr
            .sweep((0..100).map(f64::from))
            .take(12)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(out.len(), 12);
        assert_eq!(out[0].as_array(), [2, 0, 0]);
        // Contact at radius 0.5, i.e. threshold 10.
        assert_eq!(out[9].as_array(), [2, 0, 0]);
        assert_eq!(out[10].as_array(), [1, 0, 0]);
        assert!((out[10].epsilon - 1.0).abs() < 1e-12);
        assert!((vr.epsilon() - 1.1).abs() < 1e-12);
    }

    /// Points on a circle: a ring of contacts encloses one hole.
    #[test]
    fn circle_sample_has_one_loop_at_intermediate_scale() {
        let n = 12;
        let rows: Vec<[f64; 2]> = (0..n)
            .map(|k| {
                let th = std::f64::consts::TAU * k as f64 / n as f64;
                [10.0 * th.cos(), 10.0 * th.sin()]
            })
            .collect();
        let mut vr = RipsComplex::from_rows(&rows).unwrap();
        // Chord between neighbours ≈ 5.18; next-nearest ≈ 10.
        let b = vr.evaluate(threshold_for_radius(3.0)).unwrap();
        assert_eq!(b.as_array(), [1, 1, 0]);
    }

    #[test]
    fn exact_and_svd_agree_on_random_clouds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let rows: Vec<[f64; 3]> = (0..9)
                .map(|_| {
                    [
                        rng.gen_range(0.0..10.0),
                        rng.gen_range(0.0..10.0),
                        rng.gen_range(0.0..10.0),
                    ]
                })
                .collect();
            let points = PointCloud::new(&rows).unwrap();
            let mut svd = RipsComplex::new(points.clone());
            let mut exact = RipsComplex::with_cfg(
                points,
                ThresholdCfg::default(),
                ComplexCfg::default(),
                BettiCfg {
                    rank: RankMethod::Exact,
                },
            )
            .unwrap();
            for t in [0.0, 20.0, 40.0, 60.0, 90.0] {
                assert_eq!(
                    svd.evaluate(t).unwrap().as_array(),
                    exact.evaluate(t).unwrap().as_array()
                );
            }
        }
    }

    #[test]
    fn maximal_closure_equals_all_cliques() {
        // The face set of the maximal cliques is exactly the set of all cliques.
        let mut rng = StdRng::seed_from_u64(11);
        let rows: Vec<[f64; 2]> = (0..10)
            .map(|_| [rng.gen_range(0.0..6.0), rng.gen_range(0.0..6.0)])
            .collect();
        let mut vr = RipsComplex::from_rows(&rows).unwrap();
        vr.update(threshold_for_radius(1.2)).unwrap();
        let g = vr.graph();
        let n = g.n_nodes();
        let mut all_cliques = 0;
        for mask in 1u32..(1 << n) {
            let members: Vec<usize> = (0..n).filter(|&u| (mask & (1 << u)) != 0).collect();
            let is_clique = members
                .iter()
                .enumerate()
                .all(|(i, &u)| members[i + 1..].iter().all(|&v| g.has_edge(u, v)));
            if is_clique {
                all_cliques += 1;
                let s = crate::complex::Simplex::new(members).unwrap();
                assert!(vr.complex().contains(&s));
            }
        }
        assert_eq!(all_cliques, vr.complex().n_faces_total());
    }

    #[test]
    fn parallel_snapshot_matches() {
        let mut vr = rips(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [9.0, 9.0]]);
        vr.update(threshold_for_radius(1.2)).unwrap();
        assert_eq!(
            vr.betti_numbers().unwrap(),
            vr.betti_numbers_parallel().unwrap()
        );
        let snap = vr.snapshot();
        vr.update(0.0).unwrap();
        assert_eq!(snap.n_faces(1).len(), 4);
        assert_eq!(vr.complex().n_faces(1).len(), 0);
    }
}
