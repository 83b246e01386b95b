use super::Point2;

/// Total length of a polyline. For `closed` polylines the segment from the
/// last point back to the first is included.
#[must_use]
pub fn polyline_length(points: &[Point2], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    if closed {
        open + closing_gap(points)
    } else {
        open
    }
}

/// Distance between the last and first point of a closed polyline.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
pub fn closing_gap(points: &[Point2]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => (first - last).norm(),
        _ => 0.0,
    }
}

/// Linear interpolation: `a + (b - a) * t`.
#[inline]
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}
