use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Parameters controlling ribbon construction.
///
/// Every field has a default, so partial JSON documents such as
/// `{"resample_step": 8}` are valid configurations.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Spacing between resampled centerline points, in track units.
    pub resample_step: f64,
    /// Edge length of a spatial grid cell, in track units.
    pub cell_size: f64,
    /// Spline samples emitted per control-point segment.
    pub subdivisions: usize,
    /// Below this dot product of adjacent segment normals the corner is
    /// beveled instead of mitered.
    pub miter_dot_threshold: f64,
    /// Maximum miter length as a multiple of the half-width.
    pub miter_limit: f64,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            resample_step: 12.0,
            cell_size: 400.0,
            subdivisions: 10,
            miter_dot_threshold: 0.35,
            miter_limit: 2.0,
        }
    }
}

impl RibbonConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// - `RibbonError::Input` if the document is not a JSON object of config
    ///   fields
    /// - `RibbonError::Config` if a value fails [`RibbonConfig::validate`]
    pub fn from_json(json: &str) -> Result<Self> {
        // Derived `Deserialize` would also fill fields from an array by
        // position; only objects are configuration documents.
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let config: Self = serde_json::from_value(serde_json::Value::Object(fields))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings describe a terminating, meaningful build.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending parameter.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        ensure_positive("resample_step", self.resample_step)?;
        ensure_positive("cell_size", self.cell_size)?;
        if self.subdivisions == 0 {
            return Err(ConfigError::NoSubdivisions);
        }
        ensure_range("miter_dot_threshold", self.miter_dot_threshold, 0.0, 1.0)?;
        ensure_range("miter_limit", self.miter_limit, 1.0, f64::MAX)?;
        Ok(())
    }
}

fn ensure_positive(parameter: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { parameter, value })
    }
}

fn ensure_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// Full width of the drivable surface.
///
/// Widths that are not finite and positive collapse the ribbon onto its
/// centerline (half-width 0) instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackWidth(f64);

impl TrackWidth {
    /// Creates a track width.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self(width)
    }

    /// Returns the full width as given.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.0
    }

    /// Returns the offset distance from the centerline to each edge.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        if self.0.is_finite() && self.0 > 0.0 {
            self.0 * 0.5
        } else {
            0.0
        }
    }
}

impl From<f64> for TrackWidth {
    fn from(width: f64) -> Self {
        Self::new(width)
    }
}
