use tracing::debug;

use crate::math::{Point2, CHORD_EPSILON};

/// Knot exponent for centripetal parametrization (0 = uniform, 1 = chordal).
pub const CENTRIPETAL_ALPHA: f64 = 0.5;

/// Fits a closed centripetal Catmull-Rom spline through control points and
/// samples it densely.
///
/// # Algorithm
///
/// For every control point `i` the segment `P[i] → P[i+1]` is evaluated from
/// the wrapped neighborhood `P[i-1], P[i], P[i+1], P[i+2]`. Knots are spaced
/// by `|P[k+1] - P[k]|^0.5`, which keeps the curve from overshooting or
/// looping where control points are unevenly spaced. Each segment emits
/// `subdivisions` samples starting at `P[i]`; the first sample is appended
/// again at the end so the output closes exactly.
///
/// Coincident control points are tolerated: knot intervals are clamped to
/// [`CHORD_EPSILON`].
#[derive(Debug)]
pub struct CatmullRomDensify<'a> {
    points: &'a [Point2],
    subdivisions: usize,
}

impl<'a> CatmullRomDensify<'a> {
    /// Creates a new densify operation.
    #[must_use]
    pub fn new(points: &'a [Point2], subdivisions: usize) -> Self {
        Self {
            points,
            subdivisions: subdivisions.max(1),
        }
    }

    /// Samples the closed curve.
    ///
    /// Returns `n * subdivisions + 1` points, or an empty vector when fewer
    /// than 2 control points are given.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Vec<Point2> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }

        let mut dense = Vec::with_capacity(n * self.subdivisions + 1);
        for i in 0..n {
            let p0 = self.points[(i + n - 1) % n];
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];
            let p3 = self.points[(i + 2) % n];

            for s in 0..self.subdivisions {
                let u = s as f64 / self.subdivisions as f64;
                dense.push(catmull_rom_point(p0, p1, p2, p3, u));
            }
        }
        dense.push(dense[0]);

        debug!(
            control_points = n,
            dense_points = dense.len(),
            "densified centerline"
        );
        dense
    }
}

/// Evaluates the centripetal Catmull-Rom segment `p1 → p2` at `u ∈ [0, 1]`.
///
/// Uses the Barry–Goldman pyramid over non-uniform knots. `u = 0` returns `p1`
/// exactly.
#[must_use]
pub fn catmull_rom_point(p0: Point2, p1: Point2, p2: Point2, p3: Point2, u: f64) -> Point2 {
    let t0 = 0.0;
    let t1 = t0 + knot_interval(&p0, &p1);
    let t2 = t1 + knot_interval(&p1, &p2);
    let t3 = t2 + knot_interval(&p2, &p3);

    let t = t1 + (t2 - t1) * u;

    let a1 = blend(&p0, &p1, t0, t1, t);
    let a2 = blend(&p1, &p2, t1, t2, t);
    let a3 = blend(&p2, &p3, t2, t3, t);

    let b1 = blend(&a1, &a2, t0, t2, t);
    let b2 = blend(&a2, &a3, t1, t3, t);

    blend(&b1, &b2, t1, t2, t)
}

/// `|b - a|^alpha`, clamped away from zero.
fn knot_interval(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm().powf(CENTRIPETAL_ALPHA).max(CHORD_EPSILON)
}

/// Interpolates between `a` (at knot `ta`) and `b` (at knot `tb`) for `t`.
fn blend(a: &Point2, b: &Point2, ta: f64, tb: f64, t: f64) -> Point2 {
    let span = tb - ta;
    let wa = (tb - t) / span;
    let wb = (t - ta) / span;
    Point2::from(a.coords * wa + b.coords * wb)
}
