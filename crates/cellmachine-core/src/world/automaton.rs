//! Automaton - owns the grid and advances it one step at a time

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ca_update::CellularAutomataUpdater;
use super::generation::{BlobConfig, GridGenerator, SeedPolicy};
use super::grid::Grid;
use super::neighbor_queries::{NeighborQueries, Neighborhood};
use super::rng_trait::CellRng;
use super::stats::StepStats;
use crate::error::AutomatonError;
use crate::simulation::Material;
use crate::tools::{Brush, draw_circle};

/// Whether `update()` advances the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Order in which rows are visited during a step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrder {
    /// Bottom row first, each row once: the classic loop walks
    /// `height - 1` down to `0`. Falling material lands in rows that were
    /// already visited, so nothing moves twice in one step.
    #[default]
    BottomUp,
    TopDown,
}

/// Direction each row is walked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOrder {
    #[default]
    LeftToRight,
    RightToLeft,
    /// Flip direction on every visited row
    Alternating,
}

/// Sweep order for `Automaton::update`.
///
/// When two cells compete for the same target, whichever is visited first
/// wins, so the sweep order is part of the rule set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOrder {
    pub rows: RowOrder,
    pub columns: ColumnOrder,
}

/// Falling-sand automaton over a fixed grid.
///
/// Each `update()` evaluates every cell against the grid as it was before the
/// step and writes into a separate buffer, which becomes the grid once the
/// sweep is complete.
pub struct Automaton<R: CellRng = Xoshiro256StarStar> {
    grid: Grid,
    /// Write buffer, kept around between steps to avoid reallocating
    buffer: Grid,
    rng: R,
    state: RunState,
    sweep: SweepOrder,
    reset_policy: SeedPolicy,
    generation: u64,
    last_stats: StepStats,
}

impl Automaton<Xoshiro256StarStar> {
    /// Create an empty automaton with a random seed
    pub fn new(width: usize, height: usize) -> Result<Self, AutomatonError> {
        Self::with_seed(width, height, rand::random())
    }

    /// Create an empty automaton with a reproducible RNG
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, AutomatonError> {
        log::debug!("Creating {}x{} automaton with seed {}", width, height, seed);
        Self::with_rng(width, height, Xoshiro256StarStar::seed_from_u64(seed))
    }
}

impl<R: CellRng> Automaton<R> {
    /// Create an empty automaton driven by `rng`
    pub fn with_rng(width: usize, height: usize, rng: R) -> Result<Self, AutomatonError> {
        let grid = Grid::new(width, height)?;
        Ok(Self {
            buffer: grid.clone(),
            grid,
            rng,
            state: RunState::Running,
            sweep: SweepOrder::default(),
            reset_policy: SeedPolicy::Blobs(BlobConfig::default()),
            generation: 0,
            last_stats: StepStats::default(),
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only view of the current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Material at (x, y), or None when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Material> {
        self.grid.get(x, y)
    }

    /// Neighbors of (x, y) in the current grid
    pub fn neighbors(&self, x: i32, y: i32, neighborhood: Neighborhood) -> SmallVec<[Material; 8]> {
        NeighborQueries::materials(&self.grid, x, y, neighborhood)
    }

    /// Number of steps actually executed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counters from the most recent executed step
    pub fn last_step_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn sweep_order(&self) -> SweepOrder {
        self.sweep
    }

    pub fn set_sweep_order(&mut self, sweep: SweepOrder) {
        self.sweep = sweep;
    }

    /// Policy used by `reset()`
    pub fn set_reset_policy(&mut self, policy: SeedPolicy) {
        self.reset_policy = policy;
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn pause(&mut self) {
        self.state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.state = RunState::Running;
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.state = self.state.toggled();
        log::debug!("Automaton {:?}", self.state);
        self.state
    }

    /// Replace the grid contents according to `policy`
    pub fn initialize(&mut self, policy: &SeedPolicy) {
        GridGenerator::generate(&mut self.grid, policy, &mut self.rng);
    }

    /// Re-seed with the reset policy (blobs by default)
    pub fn reset(&mut self) {
        let policy = self.reset_policy.clone();
        self.initialize(&policy);
    }

    /// Fill the grid with Empty
    pub fn clear(&mut self) {
        self.grid.fill(Material::Empty);
    }

    /// Paint a disc of `material` and return the number of cells written.
    /// Cells outside the grid are clipped.
    pub fn paint(&mut self, x: i32, y: i32, radius: u32, material: Material) -> usize {
        draw_circle(&mut self.grid, x, y, radius, material)
    }

    pub fn paint_with(&mut self, brush: &Brush, x: i32, y: i32) -> usize {
        brush.apply(&mut self.grid, x, y)
    }

    /// Advance one step. Returns false (and changes nothing) while paused.
    pub fn update(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }

        self.buffer.copy_from(&self.grid);
        let mut stats = StepStats::default();

        let width = self.grid.width();
        let height = self.grid.height();
        for visit in 0..height {
            let y = match self.sweep.rows {
                RowOrder::BottomUp => height - 1 - visit,
                RowOrder::TopDown => visit,
            };
            let left_to_right = match self.sweep.columns {
                ColumnOrder::LeftToRight => true,
                ColumnOrder::RightToLeft => false,
                ColumnOrder::Alternating => visit % 2 == 0,
            };

            for column in 0..width {
                let x = if left_to_right {
                    column
                } else {
                    width - 1 - column
                };
                CellularAutomataUpdater::update_cell(
                    &self.grid,
                    &mut self.buffer,
                    x as i32,
                    y as i32,
                    &mut stats,
                    &mut self.rng,
                );
            }
        }

        std::mem::swap(&mut self.grid, &mut self.buffer);
        self.generation += 1;
        self.last_stats = stats;

        log::trace!(
            "Step {}: {} moved, {} state changes, {} reactions",
            self.generation,
            stats.cells_moved,
            stats.state_changes,
            stats.reactions
        );
        true
    }

    /// Run up to `steps` updates, returning how many executed
    pub fn run(&mut self, steps: u64) -> u64 {
        (0..steps).take_while(|_| self.update()).count() as u64
    }
}
