use tracing::debug;

use crate::math::polyline_2d::lerp;
use crate::math::{Point2, SEGMENT_EPSILON};

/// A final emitted point closer than `step * CLOSE_MERGE_FRACTION` to the
/// first point is merged into it, so the closing segment never degenerates.
pub const CLOSE_MERGE_FRACTION: f64 = 1e-3;

/// Re-emits a closed polyline at uniform arc-length spacing.
///
/// The input is treated as closed: the walk follows every segment including
/// the one from the last point back to the first (skipped when the input
/// already repeats its first point). The output starts at the first input
/// point and does not repeat it at the end; consecutive outputs are exactly
/// `step` apart along the source polyline, and the implicit closing segment
/// is at most `step` long.
///
/// Resampling an output again is only approximately stable: the second walk
/// measures chords, which are shorter than the arcs the first walk measured.
/// Sample `i` of the second pass lies within `i * step - chord_sum(i)` of
/// sample `i` of the first, see [`chord_deficits`].
#[derive(Debug)]
pub struct ArcLengthResample<'a> {
    points: &'a [Point2],
    step: f64,
}

impl<'a> ArcLengthResample<'a> {
    /// Creates a new resample operation.
    #[must_use]
    pub fn new(points: &'a [Point2], step: f64) -> Self {
        Self { points, step }
    }

    /// Executes the walk.
    ///
    /// Returns an empty vector for empty input or a step that is not finite
    /// and positive.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let Some(&first) = self.points.first() else {
            return Vec::new();
        };
        if !(self.step.is_finite() && self.step > 0.0) {
            return Vec::new();
        }

        let path = self.closed_path(first);
        let mut walk = ResampleWalk::new(first);
        let mut out = vec![first];

        while let Some(target) = path.get(walk.source_index) {
            if let Some(emitted) = walk.advance(target, self.step) {
                out.push(emitted);
            }
        }

        let merge_radius = self.step * CLOSE_MERGE_FRACTION;
        if out.len() > 1 && out.last().is_some_and(|last| (last - first).norm() < merge_radius) {
            out.pop();
        }

        debug!(
            source_points = self.points.len(),
            resampled_points = out.len(),
            step = self.step,
            "resampled centerline"
        );
        out
    }

    /// The source points followed by the first point, unless already closed.
    fn closed_path(&self, first: Point2) -> Vec<Point2> {
        let mut path = Vec::with_capacity(self.points.len() + 1);
        path.extend_from_slice(&self.points[1..]);
        let already_closed = path
            .last()
            .is_some_and(|last| (last - first).norm() < SEGMENT_EPSILON);
        if !already_closed {
            path.push(first);
        }
        path
    }
}

/// Cumulative chord deficit of an evenly resampled polyline: entry `i` is
/// `i * step` minus the length of the polyline from point 0 to point `i`.
///
/// This bounds how far sample `i` moves when the polyline is resampled again
/// with the same step.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn chord_deficits(points: &[Point2], step: f64) -> Vec<f64> {
    let mut walked = 0.0;
    let mut deficits = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            walked += (p - points[i - 1]).norm();
        }
        deficits.push(i as f64 * step - walked);
    }
    deficits
}

/// State of the arc-length walk.
///
/// The walk always measures from `anchor`, the last position it passed
/// through: either a source vertex or a freshly emitted sample. Rebasing on
/// emitted samples keeps spacing uniform along long source segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleWalk {
    /// Arc length covered since the last emitted sample.
    pub accumulated: f64,
    /// Position the next segment is measured from.
    pub anchor: Point2,
    /// Index of the next source vertex to walk toward.
    pub source_index: usize,
}

impl ResampleWalk {
    /// Starts a walk at `start`, heading for source index 0.
    #[must_use]
    pub fn new(start: Point2) -> Self {
        Self {
            accumulated: 0.0,
            anchor: start,
            source_index: 0,
        }
    }

    /// Takes one transition toward `target` (the source vertex at
    /// `source_index`).
    ///
    /// - Zero-length segment: the vertex is consumed without measuring.
    /// - Target reachable within the remaining step: consumed, distance
    ///   accumulated.
    /// - Otherwise: the sample at exactly `step` is returned, becoming the new
    ///   anchor; the same target is walked toward again next time.
    pub fn advance(&mut self, target: &Point2, step: f64) -> Option<Point2> {
        let seg_len = (target - self.anchor).norm();
        if seg_len < SEGMENT_EPSILON {
            self.anchor = *target;
            self.source_index += 1;
            return None;
        }

        if self.accumulated + seg_len >= step {
            let t = (step - self.accumulated) / seg_len;
            let sample = lerp(&self.anchor, target, t);
            self.anchor = sample;
            self.accumulated = 0.0;
            Some(sample)
        } else {
            self.accumulated += seg_len;
            self.anchor = *target;
            self.source_index += 1;
            None
        }
    }
}
