use tracing::debug;

use crate::config::RibbonConfig;
use crate::math::polygon_2d::{left_normal, unit_or_none};
use crate::math::{Point2, Vector2, MITER_EPSILON};

/// How the offset at a centerline vertex was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Offset along the bisector of the two segment normals, lengthened so the
    /// edges stay `h` away from both segments.
    Miter,
    /// Offset along the outgoing segment's normal at length `h`; used where a
    /// miter would spike or the turn folds back.
    Bevel,
    /// Both adjacent segments have zero length; the vertex is not offset.
    Degenerate,
}

/// Tie-break settings deciding between miter and bevel joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinLimits {
    /// Minimum dot product of adjacent segment normals for a miter.
    pub dot_threshold: f64,
    /// Maximum miter length as a multiple of the half-width (at least 1).
    pub miter_limit: f64,
}

impl JoinLimits {
    /// Creates join limits. The miter limit is clamped to at least 1 so the
    /// bevel (length `h`) always stays within it.
    #[must_use]
    pub fn new(dot_threshold: f64, miter_limit: f64) -> Self {
        Self {
            dot_threshold,
            miter_limit: miter_limit.max(1.0),
        }
    }
}

impl Default for JoinLimits {
    fn default() -> Self {
        Self::from(&RibbonConfig::default())
    }
}

impl From<&RibbonConfig> for JoinLimits {
    fn from(config: &RibbonConfig) -> Self {
        Self::new(config.miter_dot_threshold, config.miter_limit)
    }
}

/// Left and right ribbon edges, index-aligned with the centerline.
///
/// "Left" is relative to the driving direction (centerline order): the
/// infield of a counter-clockwise loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonEdges {
    /// `center[i] + offset[i]`
    pub left: Vec<Point2>,
    /// `center[i] - offset[i]`
    pub right: Vec<Point2>,
    /// Join used at each vertex.
    pub joins: Vec<JoinKind>,
}

impl RibbonEdges {
    /// Number of vertices on each edge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns `true` if there are no edge vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Number of vertices that fell back to a bevel.
    #[must_use]
    pub fn bevel_count(&self) -> usize {
        self.joins.iter().filter(|j| **j == JoinKind::Bevel).count()
    }
}

/// Offsets a closed centerline to both sides by a half-width.
///
/// # Algorithm
///
/// Per vertex, with wrapped neighbors:
///
/// 1. Left normals `n_in`, `n_out` of the incoming and outgoing segments
/// 2. Miter direction `m = normalize(n_in + n_out)`, length `h / |m · n_in|`
/// 3. Bevel instead when `n_in · n_out` is below the dot threshold or
///    negative (fold-back), or the miter exceeds `miter_limit * h`
/// 4. `left = c + offset`, `right = c - offset`
///
/// A zero-length neighbor segment borrows the other segment's normal.
#[derive(Debug)]
pub struct RibbonOffset<'a> {
    centerline: &'a [Point2],
    half_width: f64,
    limits: JoinLimits,
}

impl<'a> RibbonOffset<'a> {
    /// Creates a new ribbon offset operation.
    #[must_use]
    pub fn new(centerline: &'a [Point2], half_width: f64, limits: JoinLimits) -> Self {
        Self {
            centerline,
            half_width: half_width.max(0.0),
            limits,
        }
    }

    /// Computes both edges.
    #[must_use]
    pub fn execute(&self) -> RibbonEdges {
        let n = self.centerline.len();
        let mut edges = RibbonEdges {
            left: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            joins: Vec::with_capacity(n),
        };

        for i in 0..n {
            let prev = &self.centerline[(i + n - 1) % n];
            let cur = &self.centerline[i];
            let next = &self.centerline[(i + 1) % n];

            let (offset, join) = corner_offset(prev, cur, next, self.half_width, &self.limits);
            edges.left.push(cur + offset);
            edges.right.push(cur - offset);
            edges.joins.push(join);
        }

        debug!(
            vertices = n,
            bevels = edges.bevel_count(),
            half_width = self.half_width,
            "offset ribbon edges"
        );
        edges
    }
}

/// Computes the left-side offset vector at `cur`.
///
/// The returned vector never exceeds `limits.miter_limit * half_width`.
#[must_use]
pub fn corner_offset(
    prev: &Point2,
    cur: &Point2,
    next: &Point2,
    half_width: f64,
    limits: &JoinLimits,
) -> (Vector2, JoinKind) {
    let n_in = unit_or_none(cur - prev).map(left_normal);
    let n_out = unit_or_none(next - cur).map(left_normal);

    let (n_in, n_out) = match (n_in, n_out) {
        (Some(a), Some(b)) => (a, b),
        (Some(n), None) | (None, Some(n)) => return (n * half_width, JoinKind::Bevel),
        (None, None) => return (Vector2::zeros(), JoinKind::Degenerate),
    };
    let bevel = (n_out * half_width, JoinKind::Bevel);

    // Antiparallel normals: the bisector is undefined.
    let Some(miter) = unit_or_none(n_in + n_out) else {
        return bevel;
    };

    let normal_dot = n_in.dot(&n_out);
    let miter_length = half_width / miter.dot(&n_in).abs().max(MITER_EPSILON);

    let near_perpendicular = normal_dot.abs() < limits.dot_threshold;
    let folds_back = normal_dot < 0.0;
    let too_long = miter_length > limits.miter_limit * half_width;

    if near_perpendicular || folds_back || too_long {
        bevel
    } else {
        (miter * miter_length, JoinKind::Miter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn regular_polygon(sides: u32, radius: f64) -> Vec<Point2> {
        (0..sides)
            .map(|i| {
                let a = std::f64::consts::TAU * f64::from(i) / f64::from(sides);
                Point2::new(radius * a.cos(), radius * a.sin())
            })
            .collect()
    }

    fn offset_lengths(center: &[Point2], edge: &[Point2]) -> Vec<f64> {
        center.iter().zip(edge).map(|(c, e)| (e - c).norm()).collect()
    }

    #[test]
    fn smooth_circle_uses_miters_at_constant_width() {
        let center = regular_polygon(72, 200.0);
        let edges = RibbonOffset::new(&center, 10.0, JoinLimits::default()).execute();

        assert_eq!(edges.len(), 72);
        assert!(edges.joins.iter().all(|j| *j == JoinKind::Miter));
        for d in offset_lengths(&center, &edges.left) {
            assert_relative_eq!(d, 10.0, max_relative = 0.01);
        }
        for d in offset_lengths(&center, &edges.right) {
            assert_relative_eq!(d, 10.0, max_relative = 0.01);
        }
    }

    #[test]
    fn left_is_inside_of_ccw_loop() {
        let center = regular_polygon(36, 100.0);
        let edges = RibbonOffset::new(&center, 5.0, JoinLimits::default()).execute();
        for i in 0..center.len() {
            let c = center[i].coords.norm();
            assert!(edges.left[i].coords.norm() < c);
            assert!(edges.right[i].coords.norm() > c);
        }
    }

    #[test]
    fn edges_mirror_each_other() {
        let center = regular_polygon(12, 50.0);
        let edges = RibbonOffset::new(&center, 4.0, JoinLimits::default()).execute();
        for i in 0..center.len() {
            let l = edges.left[i] - center[i];
            let r = edges.right[i] - center[i];
            assert!((l + r).norm() < 1e-12);
        }
    }

    #[test]
    fn right_angle_corners_fall_back_to_bevel() {
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ];
        let edges = RibbonOffset::new(&square, 10.0, JoinLimits::default()).execute();
        assert_eq!(edges.bevel_count(), 4);
        // Corner (100, 0): outgoing segment heads +y, left normal is -x.
        assert!((edges.left[1] - Point2::new(90.0, 0.0)).norm() < 1e-12);
        assert!((edges.right[1] - Point2::new(110.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn hexagon_miter_length() {
        // 60° turns: normals dot 0.5, miter = h / cos(30°).
        let hex = regular_polygon(6, 50.0);
        let edges = RibbonOffset::new(&hex, 10.0, JoinLimits::default()).execute();
        assert_eq!(edges.bevel_count(), 0);
        let expected = 10.0 / (std::f64::consts::FRAC_PI_6).cos();
        for d in offset_lengths(&hex, &edges.left) {
            assert_relative_eq!(d, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn dot_threshold_is_configurable() {
        let hex = regular_polygon(6, 50.0);
        let edges = RibbonOffset::new(&hex, 10.0, JoinLimits::new(0.6, 2.0)).execute();
        assert_eq!(edges.bevel_count(), 6);
    }

    #[test]
    fn miter_limit_forces_bevel() {
        let hex = regular_polygon(6, 50.0);
        let edges = RibbonOffset::new(&hex, 10.0, JoinLimits::new(0.35, 1.1)).execute();
        assert_eq!(edges.bevel_count(), 6);
        for d in offset_lengths(&hex, &edges.left) {
            assert_relative_eq!(d, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn miter_limit_below_one_is_clamped() {
        assert_relative_eq!(JoinLimits::new(0.35, 0.2).miter_limit, 1.0);
    }

    #[test]
    fn hairpin_does_not_produce_nan() {
        let (offset, join) = corner_offset(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(0.0, 0.0),
            5.0,
            &JoinLimits::default(),
        );
        assert_eq!(join, JoinKind::Bevel);
        assert!(offset.x.is_finite() && offset.y.is_finite());
        assert_relative_eq!(offset.norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn coincident_neighbor_borrows_other_normal() {
        let (offset, join) = corner_offset(
            &Point2::new(10.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(20.0, 0.0),
            3.0,
            &JoinLimits::default(),
        );
        assert_eq!(join, JoinKind::Bevel);
        assert!((offset - Vector2::new(0.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn fully_degenerate_vertex_is_not_offset() {
        let p = Point2::new(1.0, 1.0);
        let (offset, join) = corner_offset(&p, &p, &p, 3.0, &JoinLimits::default());
        assert_eq!(join, JoinKind::Degenerate);
        assert!(offset.norm() < f64::EPSILON);
    }

    #[test]
    fn offset_never_exceeds_miter_limit() {
        // Zigzag with turns of every sharpness.
        let center: Vec<Point2> = (0..40)
            .map(|i| {
                let x = f64::from(i) * 7.0;
                let y = if i % 2 == 0 { 0.0 } else { f64::from(i % 7) * 4.0 };
                Point2::new(x, y)
            })
            .collect();
        let limits = JoinLimits::default();
        let h = 6.0;
        let edges = RibbonOffset::new(&center, h, limits).execute();
        for d in offset_lengths(&center, &edges.left) {
            assert!(d <= limits.miter_limit * h + 1e-9, "spike {d}");
            assert!(d.is_finite());
        }
    }

    #[test]
    fn empty_centerline() {
        let edges = RibbonOffset::new(&[], 5.0, JoinLimits::default()).execute();
        assert!(edges.is_empty());
    }
}
