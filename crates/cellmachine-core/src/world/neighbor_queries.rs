//! Neighbor cell collection utilities

use super::grid::Grid;
use crate::simulation::Material;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which adjacent cells count as neighbors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighborhood {
    /// 8 neighbors (cardinal + diagonal)
    #[default]
    Moore,
    /// 4 orthogonal neighbors
    VonNeumann,
}

/// Order: W, E, N, S, then NW, SW, NE, SE
const OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 1),
];

impl Neighborhood {
    pub fn offsets(self) -> &'static [IVec2] {
        match self {
            Neighborhood::Moore => &OFFSETS,
            Neighborhood::VonNeumann => &OFFSETS[..4],
        }
    }
}

/// Stateless neighbor queries against a grid.
///
/// Out-of-bounds neighbors are skipped, never wrapped, so cells on an edge
/// have fewer neighbors. The rule table always passes the pre-step grid here.
pub struct NeighborQueries;

impl NeighborQueries {
    /// Materials of the in-bounds neighbors of (x, y)
    pub fn materials(
        grid: &Grid,
        x: i32,
        y: i32,
        neighborhood: Neighborhood,
    ) -> SmallVec<[Material; 8]> {
        neighborhood
            .offsets()
            .iter()
            .filter_map(|offset| grid.get(x + offset.x, y + offset.y))
            .collect()
    }

    /// Positions and materials of the in-bounds neighbors of (x, y)
    pub fn positions(
        grid: &Grid,
        x: i32,
        y: i32,
        neighborhood: Neighborhood,
    ) -> SmallVec<[(IVec2, Material); 8]> {
        let center = IVec2::new(x, y);
        neighborhood
            .offsets()
            .iter()
            .filter_map(|&offset| {
                let pos = center + offset;
                grid.get_at(pos).map(|m| (pos, m))
            })
            .collect()
    }

    /// True if any in-bounds neighbor satisfies `predicate`
    pub fn any<F>(grid: &Grid, x: i32, y: i32, neighborhood: Neighborhood, mut predicate: F) -> bool
    where
        F: FnMut(Material) -> bool,
    {
        neighborhood
            .offsets()
            .iter()
            .filter_map(|offset| grid.get(x + offset.x, y + offset.y))
            .any(|m| predicate(m))
    }
}
