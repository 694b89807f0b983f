pub mod geometry;
pub mod glyphs;
pub mod raster;

pub use raster::{Badge, BadgeError, DEFAULT_SIZE, render_badge};
