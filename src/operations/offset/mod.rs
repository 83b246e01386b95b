mod ribbon_offset;

pub use ribbon_offset::{corner_offset, JoinKind, JoinLimits, RibbonEdges, RibbonOffset};
