pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use builder::{TrackBuilder, TrackRibbon, MIN_RESAMPLED_POINTS};
pub use config::{RibbonConfig, TrackWidth};
pub use error::{ConfigError, Result, RibbonError};
