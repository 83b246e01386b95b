mod catmull_rom;

pub use catmull_rom::{catmull_rom_point, CatmullRomDensify, CENTRIPETAL_ALPHA};
