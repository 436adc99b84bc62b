//! CPU rendering of automaton grids to pixel buffers

mod pixel_renderer;

pub use pixel_renderer::{LIFE_ALIVE_COLOR, LIFE_DEAD_COLOR, PixelRenderer};
