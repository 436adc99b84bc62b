//! GIF capture for simulation runs
//!
//! Collects rendered frames and encodes them as an animated GIF.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use gif::{Encoder, Frame, Repeat};

use super::PixelRenderer;

/// Captures frames and encodes them as GIF
pub struct GifCapture {
    /// Collected frames (RGB data)
    frames: Vec<Vec<u8>>,
    width: u16,
    height: u16,
    /// Delay between frames in centiseconds (100ths of a second)
    frame_delay: u16,
}

impl GifCapture {
    /// Capture sized for `renderer`'s output. GIF frames are limited to
    /// 65535 pixels per side.
    pub fn for_renderer(renderer: &PixelRenderer, fps: u16) -> Result<Self> {
        let width = u16::try_from(renderer.width).context("Frame too wide for GIF")?;
        let height = u16::try_from(renderer.height).context("Frame too tall for GIF")?;
        Ok(Self::new(width, height, fps))
    }

    pub fn new(width: u16, height: u16, fps: u16) -> Self {
        // Convert FPS to centisecond delay
        let frame_delay = if fps > 0 { (100 / fps).max(1) } else { 10 };

        Self {
            frames: Vec::new(),
            width,
            height,
            frame_delay,
        }
    }

    /// Capture the renderer's current buffer
    pub fn capture_frame(&mut self, renderer: &PixelRenderer) {
        self.frames.push(renderer.get_rgb_buffer());
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Save captured frames as an animated GIF
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.frames.is_empty() {
            anyhow::bail!("No frames to save");
        }

        let file = File::create(path.as_ref()).context("Failed to create GIF file")?;

        let mut encoder = Encoder::new(file, self.width, self.height, &[])
            .context("Failed to create GIF encoder")?;

        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to set GIF repeat")?;

        for rgb in &self.frames {
            let mut frame = Frame::from_rgb(self.width, self.height, rgb);
            frame.delay = self.frame_delay;

            encoder
                .write_frame(&frame)
                .context("Failed to write GIF frame")?;
        }

        log::debug!(
            "Wrote {} frame GIF to {}",
            self.frames.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
