use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::math::Point2;

/// A centerline control point as it appears in authored track files.
///
/// Both the point digitizer's `[x, y]` pairs and `{"x": .., "y": ..}` objects
/// are accepted. This type only exists at the boundary: the pipeline works on
/// [`Point2`] exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ControlPoint {
    /// `[x, y]`
    Pair([f64; 2]),
    /// `{"x": .., "y": ..}`
    Named { x: f64, y: f64 },
}

impl ControlPoint {
    /// Returns the point as a uniform coordinate.
    #[must_use]
    pub fn to_point(self) -> Point2 {
        match self {
            Self::Pair([x, y]) | Self::Named { x, y } => Point2::new(x, y),
        }
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Pair([x, y])
    }
}

impl From<[f64; 2]> for ControlPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self::Pair(pair)
    }
}

impl From<ControlPoint> for Point2 {
    fn from(cp: ControlPoint) -> Self {
        cp.to_point()
    }
}

/// Converts control points to the uniform coordinate type, preserving
/// authored order.
///
/// Points with non-finite coordinates are dropped. Duplicates are kept; later
/// stages guard against coincident points.
pub fn normalize_points<I>(points: I) -> Vec<Point2>
where
    I: IntoIterator,
    I::Item: Into<ControlPoint>,
{
    points
        .into_iter()
        .enumerate()
        .filter_map(|(i, cp)| {
            let p = cp.into().to_point();
            if p.x.is_finite() && p.y.is_finite() {
                Some(p)
            } else {
                warn!(index = i, "dropping control point with non-finite coordinates");
                None
            }
        })
        .collect()
}

/// Parses a centerline document: a JSON array of `[x, y]` pairs and/or
/// `{"x", "y"}` objects.
///
/// # Errors
///
/// Returns `RibbonError::Input` if the document is not such an array.
pub fn parse_control_points(json: &str) -> Result<Vec<Point2>> {
    let raw: Vec<ControlPoint> = serde_json::from_str(json)?;
    Ok(normalize_points(raw))
}

/// Exports points in the digitizer format: `[[x, y], ...]` rounded to integers.
///
/// # Errors
///
/// Returns `RibbonError::Input` if serialization fails.
#[allow(clippy::cast_possible_truncation)]
pub fn control_points_to_json(points: &[Point2]) -> Result<String> {
    let pairs: Vec<[i64; 2]> = points
        .iter()
        .map(|p| [p.x.round() as i64, p.y.round() as i64])
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_digitizer_integer_pairs() {
        let pts = parse_control_points("[[12,34],[56,78],[90,12]]").unwrap();
        assert_eq!(
            pts,
            vec![
                Point2::new(12.0, 34.0),
                Point2::new(56.0, 78.0),
                Point2::new(90.0, 12.0),
            ]
        );
    }

    #[test]
    fn parses_named_fields_and_mixtures() {
        let pts = parse_control_points(r#"[{"x": 1.5, "y": -2}, [3, 4.25]]"#).unwrap();
        assert_eq!(pts, vec![Point2::new(1.5, -2.0), Point2::new(3.0, 4.25)]);
    }

    #[test]
    fn parses_whitespace_and_empty_array() {
        let pts = parse_control_points(" [ ]\n").unwrap();
        assert!(pts.is_empty());
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse_control_points("{\"x\": 1}").is_err());
        assert!(parse_control_points("[[1]]").is_err());
        assert!(parse_control_points("[[1, \"a\"]]").is_err());
        assert!(parse_control_points("[[1, 2]").is_err());
    }

    #[test]
    fn normalize_drops_non_finite() {
        let pts = normalize_points([(0.0, 0.0), (f64::NAN, 1.0), (2.0, f64::INFINITY), (3.0, 3.0)]);
        assert_eq!(pts, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 3.0)]);
    }

    #[test]
    fn normalize_keeps_duplicates() {
        let pts = normalize_points([[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn export_rounds_to_digitizer_format() {
        let json =
            control_points_to_json(&[Point2::new(1.4, 2.6), Point2::new(-0.6, 10.0)]).unwrap();
        assert_eq!(json, "[[1,3],[-1,10]]");
        let back = parse_control_points(&json).unwrap();
        assert_eq!(back[0], Point2::new(1.0, 3.0));
    }
}
