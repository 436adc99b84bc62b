//! Drives a session for a fixed number of steps and writes its outputs

use std::path::PathBuf;

use anyhow::Result;
use cellmachine_core::simulation::MaterialType;
use cellmachine_core::world::CellRng;

use super::{GifCapture, PixelRenderer};
use crate::controls::{LifeSession, Session};
use crate::prelude::*;

/// What to run and where to write it
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub steps: u64,
    /// Capture a GIF frame every N steps (0 means first and last only)
    pub frame_every: u64,
    pub scale: u32,
    pub gif_fps: u16,
    /// Final frame as PNG
    pub png: Option<PathBuf>,
    pub gif: Option<PathBuf>,
}

/// Outcome of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Updates that actually advanced the grid
    pub steps_run: u64,
    pub generation: u64,
    /// Non-empty cells (automaton) or live cells (Life)
    pub population: usize,
    /// Per-material cell counts, empty for Life
    pub materials: Vec<(Material, usize)>,
    pub frames: usize,
}

impl RunSummary {
    /// Cell counts grouped by physical behavior, in first-seen order
    pub fn type_counts(&self) -> Vec<(MaterialType, usize)> {
        let mut counts: Vec<(MaterialType, usize)> = Vec::new();
        for &(material, count) in &self.materials {
            let kind = material.material_type();
            match counts.iter_mut().find(|(seen, _)| *seen == kind) {
                Some((_, total)) => *total += count,
                None => counts.push((kind, count)),
            }
        }
        counts
    }
}

/// Shared frame bookkeeping for both simulations
struct Recorder {
    renderer: PixelRenderer,
    capture: Option<GifCapture>,
    frame_every: u64,
}

impl Recorder {
    fn new(renderer: PixelRenderer, options: &RunOptions) -> Result<Self> {
        let capture = match options.gif {
            Some(_) => Some(GifCapture::for_renderer(&renderer, options.gif_fps)?),
            None => None,
        };
        Ok(Self {
            renderer,
            capture,
            frame_every: options.frame_every,
        })
    }

    fn wants_frame(&self, step: u64, last: bool) -> bool {
        self.capture.is_some()
            && (last || (self.frame_every > 0 && step % self.frame_every == 0))
    }

    fn capture(&mut self) {
        if let Some(capture) = self.capture.as_mut() {
            capture.capture_frame(&self.renderer);
        }
    }

    fn finish(self, options: &RunOptions) -> Result<usize> {
        if let Some(path) = &options.png {
            self.renderer.save_png(path)?;
            log::info!("Saved PNG to {}", path.display());
        }

        let mut frames = 0;
        if let (Some(capture), Some(path)) = (self.capture, &options.gif) {
            capture.save(path)?;
            frames = capture.frame_count();
            log::info!("Saved {} frame GIF to {}", frames, path.display());
        }
        Ok(frames)
    }
}

/// Step the falling-sand session, rendering frames along the way
pub fn run_automaton<R: CellRng>(
    session: &mut Session<R>,
    options: &RunOptions,
) -> Result<RunSummary> {
    let mut recorder = Recorder::new(
        PixelRenderer::for_grid(session.automaton.grid(), options.scale),
        options,
    )?;

    recorder.renderer.render_grid(session.automaton.grid());
    recorder.capture();

    let mut steps_run = 0;
    for step in 1..=options.steps {
        if session.should_quit() {
            log::info!("Quit requested, stopping after {} steps", steps_run);
            break;
        }
        if !session.automaton.update() {
            log::info!("Simulation paused, stopping after {} steps", steps_run);
            break;
        }
        steps_run += 1;

        let stats = session.automaton.last_step_stats();
        log::debug!(
            "Step {}: {} moved, {} state changes, {} reactions",
            step,
            stats.cells_moved,
            stats.state_changes,
            stats.reactions
        );

        if recorder.wants_frame(step, step == options.steps) {
            recorder.renderer.render_grid(session.automaton.grid());
            recorder.capture();
        }
    }

    let grid = session.automaton.grid();
    recorder.renderer.render_grid(grid);
    let frames = recorder.finish(options)?;

    let summary = RunSummary {
        steps_run,
        generation: session.automaton.generation(),
        population: grid.count_non_empty(),
        materials: Material::ALL
            .iter()
            .filter(|material| !material.is_empty())
            .map(|&material| (material, grid.count(material)))
            .collect(),
        frames,
    };
    log::info!(
        "Ran {} steps on {}x{} grid: {} non-empty cells",
        summary.steps_run,
        grid.width(),
        grid.height(),
        summary.population
    );
    for (kind, count) in summary.type_counts() {
        log::info!("  {:?}: {}", kind, count);
    }
    Ok(summary)
}

/// Step the Life session, rendering frames along the way
pub fn run_life<R: CellRng>(
    session: &mut LifeSession<R>,
    options: &RunOptions,
) -> Result<RunSummary> {
    let mut recorder = Recorder::new(
        PixelRenderer::new(session.life.width(), session.life.height(), options.scale),
        options,
    )?;

    recorder.renderer.render_life(&session.life);
    recorder.capture();

    let mut steps_run = 0;
    for step in 1..=options.steps {
        if session.should_quit() {
            log::info!("Quit requested, stopping after {} generations", steps_run);
            break;
        }
        if !session.life.step() {
            log::info!("Life paused, stopping after {} generations", steps_run);
            break;
        }
        steps_run += 1;

        if recorder.wants_frame(step, step == options.steps) {
            recorder.renderer.render_life(&session.life);
            recorder.capture();
        }
    }

    recorder.renderer.render_life(&session.life);
    let frames = recorder.finish(options)?;

    let summary = RunSummary {
        steps_run,
        generation: session.life.generation(),
        population: session.life.population(),
        materials: Vec::new(),
        frames,
    };
    log::info!(
        "Ran {} generations of Life: {} alive",
        summary.steps_run,
        summary.population
    );
    Ok(summary)
}
