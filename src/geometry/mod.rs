pub mod control_point;

pub use control_point::{
    control_points_to_json, normalize_points, parse_control_points, ControlPoint,
};
