use thiserror::Error;

/// Top-level error type for track ribbon building.
///
/// Geometry never fails: degenerate centerlines produce empty ribbons.
/// Only the boundaries (parsing input documents, validating settings) report
/// errors.
#[derive(Debug, Error)]
pub enum RibbonError {
    #[error("invalid centerline input: {0}")]
    Input(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to ribbon configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} = {value} must be finite and positive")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("subdivisions must be at least 1")]
    NoSubdivisions,
}

/// Convenience type alias for results using [`RibbonError`].
pub type Result<T> = std::result::Result<T, RibbonError>;
