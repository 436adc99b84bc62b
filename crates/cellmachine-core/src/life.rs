//! Conway's Game of Life on a wrapping grid
//!
//! Unlike the falling-sand grid, edges wrap around: a cell on the left edge
//! neighbors the right edge.

use crate::error::AutomatonError;
use crate::world::{CellRng, RunState};

/// Default share of live cells for `randomize`
pub const DEFAULT_LIFE_DENSITY: f32 = 0.5;

/// Toroidal B3/S23 grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    /// Next-generation buffer
    next: Vec<bool>,
    state: RunState,
    generation: u64,
}

impl LifeGrid {
    pub fn new(width: usize, height: usize) -> Result<Self, AutomatonError> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            next: vec![false; width * height],
            state: RunState::Running,
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        in_bounds.then(|| y as usize * self.width + x as usize)
    }

    /// Whether (x, y) is alive; out-of-range coordinates read as dead
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = alive;
                true
            }
            None => false,
        }
    }

    /// Flip a cell, returning its new state (None when out of range)
    pub fn toggle(&mut self, x: i32, y: i32) -> Option<bool> {
        let i = self.index(x, y)?;
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Make each cell alive with probability `density`
    pub fn randomize<R: CellRng>(&mut self, rng: &mut R, density: f32) {
        for cell in &mut self.cells {
            *cell = rng.check_probability(density);
        }
        log::debug!(
            "Randomized {}x{} life grid: {} alive",
            self.width,
            self.height,
            self.population()
        );
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells among the 8 wrapped neighbors of (x, y)
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width as i64, self.height as i64);
        let mut count = 0;
        for dy in -1..=1_i64 {
            for dx in -1..=1_i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as i64 + dx).rem_euclid(w) as usize;
                let ny = (y as i64 + dy).rem_euclid(h) as usize;
                count += u8::from(self.cells[ny * self.width + nx]);
            }
        }
        count
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.state = self.state.toggled();
        self.state
    }

    /// Advance one generation. Returns false (and changes nothing) while paused.
    pub fn step(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let neighbors = self.live_neighbors(x, y);
                self.next[i] = matches!((self.cells[i], neighbors), (true, 2 | 3) | (false, 3));
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
        true
    }
}
