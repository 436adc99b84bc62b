//! Cellular automata update logic - per-material rule table
//!
//! Every handler reads two grids:
//! - `prev`: the grid as it was before the step. Reactive checks (is there
//!   fire next to this plant, water next to this fire) only look here.
//! - `next`: the write buffer. Destination checks for anything that replaces
//!   a neighbor's material look here, so two movers never claim the same
//!   cell and a cell filled earlier in the sweep is not overwritten.

use glam::IVec2;

use super::grid::Grid;
use super::neighbor_queries::{NeighborQueries, Neighborhood};
use super::rng_trait::CellRng;
use super::stats::SimStats;
use crate::simulation::Material;

/// Chance per step that a plant tries to grow
pub const PLANT_GROWTH_CHANCE: f32 = 0.01;
/// Chance per step that a plant next to lava or fire catches fire
pub const PLANT_IGNITE_CHANCE: f32 = 0.3;
/// Chance per neighboring plant that fire spreads to it
pub const FIRE_SPREAD_CHANCE: f32 = 0.4;
/// Chance per step that fire burns out on its own
pub const FIRE_BURNOUT_CHANCE: f32 = 0.1;

const DOWN: IVec2 = IVec2::new(0, 1);
const DOWN_LEFT: IVec2 = IVec2::new(-1, 1);
const DOWN_RIGHT: IVec2 = IVec2::new(1, 1);
const LEFT: IVec2 = IVec2::new(-1, 0);
const RIGHT: IVec2 = IVec2::new(1, 0);
const UP: IVec2 = IVec2::new(0, -1);

/// Cellular automata updater - applies the rule for one cell
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Apply the rule for the material `prev` holds at (x, y).
    ///
    /// A cell whose buffer contents no longer match `prev` has already been
    /// displaced by an earlier write this step and is skipped.
    pub fn update_cell<R: CellRng>(
        prev: &Grid,
        next: &mut Grid,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(material) = prev.get(x, y) else {
            return;
        };
        if next.get(x, y) != Some(material) {
            return;
        }

        let pos = IVec2::new(x, y);
        match material {
            Material::Empty | Material::Stone => {}
            Material::Sand => Self::update_sand(next, pos, stats, rng),
            Material::Water => Self::update_water(next, pos, stats, rng),
            Material::Plant => Self::update_plant(prev, next, pos, stats, rng),
            Material::Fire => Self::update_fire(prev, next, pos, stats, rng),
            Material::Lava => Self::update_lava(next, pos, stats, rng),
        }
    }

    /// Sand falls straight or diagonally, sinking through water
    fn update_sand<R: CellRng>(
        next: &mut Grid,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let mut dirs = [DOWN_LEFT, DOWN_RIGHT, DOWN];
        rng.shuffle(&mut dirs);

        for dir in dirs {
            let target = pos + dir;
            if let Some(displaced @ (Material::Empty | Material::Water)) = next.get_at(target) {
                next.set_at(pos, displaced);
                next.set_at(target, Material::Sand);
                stats.record_cell_moved();
                return;
            }
        }
    }

    /// Water falls (straight first, then diagonals), otherwise spreads sideways
    fn update_water<R: CellRng>(
        next: &mut Grid,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let mut diagonals = [DOWN_LEFT, DOWN_RIGHT];
        let mut sides = [LEFT, RIGHT];
        rng.shuffle(&mut diagonals);
        rng.shuffle(&mut sides);

        let candidates = [DOWN, diagonals[0], diagonals[1], sides[0], sides[1]];
        for dir in candidates {
            if Self::try_move(next, pos, pos + dir, Material::Water) {
                stats.record_cell_moved();
                return;
            }
        }
    }

    /// Plants occasionally grow into empty cells above and beside them, and
    /// catch fire next to lava or fire.
    fn update_plant<R: CellRng>(
        prev: &Grid,
        next: &mut Grid,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        if pos.y > 0 && rng.check_probability(PLANT_GROWTH_CHANCE) {
            // A single roll covers all three directions
            for dir in [UP, LEFT, RIGHT] {
                let target = pos + dir;
                if next.get_at(target) == Some(Material::Empty) {
                    next.set_at(target, Material::Plant);
                    stats.record_state_change();
                }
            }
        }

        let near_heat = NeighborQueries::any(prev, pos.x, pos.y, Neighborhood::Moore, |m| {
            matches!(m, Material::Lava | Material::Fire)
        });
        if near_heat && rng.check_probability(PLANT_IGNITE_CHANCE) {
            next.set_at(pos, Material::Fire);
            stats.record_state_change();
        }
    }

    /// Fire spreads to neighboring plants, then goes out when touching water
    /// or by chance.
    fn update_fire<R: CellRng>(
        prev: &Grid,
        next: &mut Grid,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let neighbors = NeighborQueries::positions(prev, pos.x, pos.y, Neighborhood::Moore);
        for (neighbor, material) in neighbors {
            if material == Material::Plant
                && next.get_at(neighbor) == Some(Material::Plant)
                && rng.check_probability(FIRE_SPREAD_CHANCE)
            {
                next.set_at(neighbor, Material::Fire);
                stats.record_state_change();
            }
        }

        let doused = NeighborQueries::any(prev, pos.x, pos.y, Neighborhood::VonNeumann, |m| {
            m == Material::Water
        });
        if doused || rng.check_probability(FIRE_BURNOUT_CHANCE) {
            next.set_at(pos, Material::Empty);
            stats.record_state_change();
        }
    }

    /// Lava falls like sand. Water below quenches both cells to stone; plants
    /// below ignite, and lava that ignited something stays put this step.
    fn update_lava<R: CellRng>(
        next: &mut Grid,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let mut dirs = [DOWN_LEFT, DOWN_RIGHT, DOWN];
        rng.shuffle(&mut dirs);

        let mut ignited = false;
        for dir in dirs {
            let target = pos + dir;
            match next.get_at(target) {
                Some(Material::Empty) if !ignited => {
                    next.set_at(pos, Material::Empty);
                    next.set_at(target, Material::Lava);
                    stats.record_cell_moved();
                    return;
                }
                Some(Material::Water) => {
                    next.set_at(pos, Material::Stone);
                    next.set_at(target, Material::Stone);
                    stats.record_reaction();
                    return;
                }
                Some(Material::Plant) => {
                    next.set_at(target, Material::Fire);
                    stats.record_reaction();
                    ignited = true;
                }
                _ => {}
            }
        }
    }

    /// Move `material` from `from` to `to` if `to` is empty in the buffer.
    /// Returns true if the move succeeded.
    fn try_move(next: &mut Grid, from: IVec2, to: IVec2, material: Material) -> bool {
        if next.get_at(to) != Some(Material::Empty) {
            return false;
        }
        next.set_at(from, Material::Empty);
        next.set_at(to, material);
        true
    }
}
