mod aabb;
pub mod polygon_2d;
pub mod polyline_2d;

pub use aabb::Aabb;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Lower bound for centripetal chord-length powers in spline knot spacing.
pub const CHORD_EPSILON: f64 = 1e-6;

/// Segments shorter than this are treated as zero-length.
pub const SEGMENT_EPSILON: f64 = 1e-6;

/// Lower bound for the miter-length denominator.
pub const MITER_EPSILON: f64 = 1e-6;
