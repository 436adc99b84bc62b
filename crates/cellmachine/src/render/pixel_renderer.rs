//! CPU-based pixel buffer renderer
//!
//! Each cell becomes a `scale` x `scale` block of its material color. Row 0
//! is the top of the image, matching grid coordinates.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::prelude::*;

pub const LIFE_ALIVE_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const LIFE_DEAD_COLOR: [u8; 4] = [0, 0, 0, 255];

/// CPU renderer that outputs to an RGBA pixel buffer
pub struct PixelRenderer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixels per cell along each axis
    pub scale: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Renderer sized for a `cols` x `rows` grid; a scale of 0 is treated as 1
    pub fn new(cols: usize, rows: usize, scale: u32) -> Self {
        let scale = scale.max(1) as usize;
        let width = cols * scale;
        let height = rows * scale;
        Self {
            width,
            height,
            scale,
            buffer: vec![0u8; width * height * 4],
        }
    }

    /// Renderer matching `grid`'s dimensions
    pub fn for_grid(grid: &Grid, scale: u32) -> Self {
        Self::new(grid.width(), grid.height(), scale)
    }

    /// Draw every cell of a falling-sand grid
    pub fn render_grid(&mut self, grid: &Grid) {
        for (y, row) in grid.rows().enumerate() {
            for (x, material) in row.iter().enumerate() {
                self.fill_cell(x, y, material.color());
            }
        }
    }

    /// Draw a Life grid, live cells white on black
    pub fn render_life(&mut self, life: &LifeGrid) {
        for (i, &alive) in life.cells().iter().enumerate() {
            let color = if alive {
                LIFE_ALIVE_COLOR
            } else {
                LIFE_DEAD_COLOR
            };
            self.fill_cell(i % life.width(), i / life.width(), color);
        }
    }

    fn fill_cell(&mut self, cell_x: usize, cell_y: usize, color: [u8; 4]) {
        let x0 = cell_x * self.scale;
        let y0 = cell_y * self.scale;
        if x0 >= self.width || y0 >= self.height {
            return;
        }

        for py in y0..(y0 + self.scale).min(self.height) {
            let start = (py * self.width + x0) * 4;
            let end = (py * self.width + (x0 + self.scale).min(self.width)) * 4;
            for pixel in self.buffer[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    /// RGBA value at pixel (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(rgba)
    }

    /// Get the pixel buffer as RGB (without alpha) for GIF encoding
    pub fn get_rgb_buffer(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for chunk in self.buffer.chunks_exact(4) {
            rgb.extend_from_slice(&chunk[..3]);
        }
        rgb
    }

    /// Write the current buffer as a PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let width = u32::try_from(self.width).context("Image too wide")?;
        let height = u32::try_from(self.height).context("Image too tall")?;
        let image = RgbaImage::from_raw(width, height, self.buffer.clone())
            .context("Pixel buffer does not match image size")?;
        image
            .save(path.as_ref())
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }
}
