pub mod densify;
pub mod offset;
pub mod resample;

pub use densify::CatmullRomDensify;
pub use offset::{JoinKind, JoinLimits, RibbonEdges, RibbonOffset};
pub use resample::ArcLengthResample;
