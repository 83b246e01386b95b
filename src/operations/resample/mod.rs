mod arc_length;

pub use arc_length::{chord_deficits, ArcLengthResample, ResampleWalk, CLOSE_MERGE_FRACTION};
