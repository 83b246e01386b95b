use tracing::{debug, warn};

use crate::config::{RibbonConfig, TrackWidth};
use crate::error::Result;
use crate::geometry::parse_control_points;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::polyline_2d::polyline_length;
use crate::math::Point2;
use crate::operations::offset::{JoinLimits, RibbonEdges, RibbonOffset};
use crate::operations::{ArcLengthResample, CatmullRomDensify};
use crate::tessellation::{Quad, RibbonMesh, SpatialGrid, TessellateRibbon};

/// Fewest resampled centerline points that still give a usable ribbon.
pub const MIN_RESAMPLED_POINTS: usize = 8;

/// Result of a track build. Immutable once built; rebuild to change it.
#[derive(Debug, Clone, Default)]
pub struct TrackRibbon {
    /// Evenly spaced closed centerline.
    pub centerline: Vec<Point2>,
    /// Left/right edges, index-aligned with `centerline`.
    pub edges: RibbonEdges,
    /// Quads and their spatial grid.
    pub mesh: RibbonMesh,
}

impl TrackRibbon {
    /// Returns `true` if the build produced no drivable surface.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.mesh.is_empty()
    }

    /// The ribbon quads in centerline order.
    #[must_use]
    pub fn quads(&self) -> &[Quad] {
        &self.mesh.quads
    }

    /// The broad-phase grid over [`TrackRibbon::quads`].
    #[must_use]
    pub fn grid(&self) -> &SpatialGrid {
        &self.mesh.grid
    }

    /// Length of the closed centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.centerline, true)
    }

    /// Returns `true` if the centerline runs counter-clockwise.
    ///
    /// Edges are offset along the left normal of the driving direction, so
    /// for counter-clockwise loops `edges.left` is the infield side and for
    /// clockwise loops it is the outfield side.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        signed_area_2d(&self.centerline) > 0.0
    }
}

/// Builds a track ribbon from centerline control points.
///
/// # Pipeline
///
/// 1. [`CatmullRomDensify`]: smooth closed curve through the control points
/// 2. [`ArcLengthResample`]: evenly spaced centerline at `resample_step`
/// 3. [`RibbonOffset`]: left/right edges at half the track width
/// 4. [`TessellateRibbon`]: quads bucketed into a `cell_size` grid
///
/// Degenerate input never fails: fewer than 2 control points give an empty
/// ribbon, fewer than [`MIN_RESAMPLED_POINTS`] resampled points give a
/// centerline without edges or quads. A ribbon whose quads are too large for
/// the grid keeps its edges but has no quads.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    width: TrackWidth,
    config: RibbonConfig,
}

impl TrackBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns `RibbonError::Config` if `config` fails validation.
    pub fn new(width: impl Into<TrackWidth>, config: RibbonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            width: width.into(),
            config,
        })
    }

    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn with_width(width: impl Into<TrackWidth>) -> Self {
        Self {
            width: width.into(),
            config: RibbonConfig::default(),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    /// The track width in use.
    #[must_use]
    pub fn width(&self) -> TrackWidth {
        self.width
    }

    /// Runs the full pipeline on normalized control points.
    #[must_use]
    pub fn execute(&self, control_points: &[Point2]) -> TrackRibbon {
        if control_points.len() < 2 {
            warn!(
                control_points = control_points.len(),
                "too few control points, track is empty"
            );
            return TrackRibbon {
                mesh: self.empty_mesh(),
                ..TrackRibbon::default()
            };
        }

        let dense = CatmullRomDensify::new(control_points, self.config.subdivisions).execute();
        let centerline = ArcLengthResample::new(&dense, self.config.resample_step).execute();

        if centerline.len() < MIN_RESAMPLED_POINTS {
            warn!(
                resampled_points = centerline.len(),
                minimum = MIN_RESAMPLED_POINTS,
                "centerline too short or degenerate, ribbon is empty"
            );
            return TrackRibbon {
                centerline,
                edges: RibbonEdges::default(),
                mesh: self.empty_mesh(),
            };
        }

        let edges = RibbonOffset::new(
            &centerline,
            self.width.half_width(),
            JoinLimits::from(&self.config),
        )
        .execute();
        let mesh = TessellateRibbon::new(&edges, self.config.cell_size).execute();

        debug!(
            centerline = centerline.len(),
            counter_clockwise = signed_area_2d(&centerline) > 0.0,
            quads = mesh.quads.len(),
            cells = mesh.grid.len(),
            "built track ribbon"
        );
        TrackRibbon {
            centerline,
            edges,
            mesh,
        }
    }

    /// Parses a digitizer JSON document and builds it.
    ///
    /// # Errors
    ///
    /// Returns `RibbonError::Input` if `json` is not a point array.
    pub fn execute_json(&self, json: &str) -> Result<TrackRibbon> {
        let points = parse_control_points(json)?;
        Ok(self.execute(&points))
    }

    fn empty_mesh(&self) -> RibbonMesh {
        RibbonMesh {
            quads: Vec::new(),
            grid: SpatialGrid::new(self.config.cell_size),
        }
    }
}
