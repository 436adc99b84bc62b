//! Headless stepping with PNG and GIF output

mod gif_capture;
mod runner;

pub use gif_capture::GifCapture;
pub use runner::{RunOptions, RunSummary, run_automaton, run_life};

pub use crate::render::PixelRenderer;
