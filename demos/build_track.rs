//! Builds a track ribbon from a point-digitizer file and logs a summary.
//!
//! Usage:
//! ```text
//! cargo run --example build_track                          # built-in oval
//! cargo run --example build_track -- track.json 60         # file, width 60
//! cargo run --example build_track -- track.json 60 cfg.json
//! ```
//!
//! `track.json` is a `[[x, y], ...]` array; `cfg.json` is an optional partial
//! ribbon configuration such as `{"resample_step": 8}`.

use std::error::Error;
use std::fs;

use track_ribbon::geometry::{control_points_to_json, parse_control_points};
use track_ribbon::math::{Aabb, Point2, Vector2};
use track_ribbon::{RibbonConfig, TrackBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, DEBUG for the ribbon pipeline.
    // Override with RUST_LOG (e.g. RUST_LOG=track_ribbon=warn).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("build_track=info".parse().unwrap_or_default())
        .add_directive("track_ribbon=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let points = match args.first() {
        Some(path) => parse_control_points(&fs::read_to_string(path)?)?,
        None => builtin_oval(),
    };
    let width = match args.get(1) {
        Some(w) => w.parse::<f64>()?,
        None => 60.0,
    };
    let config = match args.get(2) {
        Some(path) => RibbonConfig::from_json(&fs::read_to_string(path)?)?,
        None => RibbonConfig::default(),
    };

    let track = TrackBuilder::new(width, config)?.execute(&points);
    if track.is_degenerate() {
        tracing::warn!(control_points = points.len(), "no drivable ribbon");
        return Ok(());
    }

    tracing::info!(
        control_points = points.len(),
        centerline = track.centerline.len(),
        length = track.length(),
        bevels = track.edges.bevel_count(),
        quads = track.quads().len(),
        cells = track.grid().len(),
        "track built"
    );

    if let Some(bounds) = Aabb::from_points(&track.edges.right) {
        let center = Point2::from((bounds.min.coords + bounds.max.coords) * 0.5);
        let view = Aabb::new(
            center - Vector2::new(config.cell_size, config.cell_size),
            center + Vector2::new(config.cell_size, config.cell_size),
        );
        tracing::info!(
            visible = track.mesh.visible_quads(&view).len(),
            on_track = track.mesh.is_on_track(&track.centerline[0]),
            "sample queries around the track center"
        );
    }

    println!("{}", control_points_to_json(&track.centerline)?);
    Ok(())
}

fn builtin_oval() -> Vec<Point2> {
    (0..24)
        .map(|i| {
            let a = std::f64::consts::TAU * f64::from(i) / 24.0;
            Point2::new(900.0 * a.cos(), 500.0 * a.sin())
        })
        .collect()
}
