use super::{Point2, Vector2, SEGMENT_EPSILON};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the left-pointing normal of a direction vector: `(-dy, dx)`.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Normalizes `v`, or returns `None` if it is shorter than [`SEGMENT_EPSILON`].
#[must_use]
pub fn unit_or_none(v: Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < SEGMENT_EPSILON || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// Point-in-polygon test using the winding number.
///
/// Returns `true` for points inside the polygon. Works for non-convex and
/// self-overlapping outlines (non-zero rule).
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    winding_number(point, polygon) != 0
}

fn winding_number(p: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let side = cross_2d(b - a, p - a);

        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `a.x * b.y - a.y * b.x`.
#[inline]
#[must_use]
pub fn cross_2d(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
