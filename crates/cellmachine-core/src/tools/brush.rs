//! Brush state for interactive painting

use serde::{Deserialize, Serialize};

use super::draw_circle;
use crate::simulation::Material;
use crate::world::Grid;

pub const MIN_BRUSH_RADIUS: u32 = 1;
pub const MAX_BRUSH_RADIUS: u32 = 10;

/// Current paint material and radius
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub material: Material,
    pub radius: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            material: Material::Sand,
            radius: 3,
        }
    }
}

impl Brush {
    pub fn new(material: Material, radius: u32) -> Self {
        Self { material, radius }
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Increase radius by one, up to MAX_BRUSH_RADIUS
    pub fn grow(&mut self) {
        self.radius = self
            .radius
            .saturating_add(1)
            .clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
    }

    /// Decrease radius by one, down to MIN_BRUSH_RADIUS
    pub fn shrink(&mut self) {
        self.radius = self
            .radius
            .saturating_sub(1)
            .clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
    }

    /// Paint this brush onto `grid` centered on (x, y)
    pub fn apply(&self, grid: &mut Grid, x: i32, y: i32) -> usize {
        draw_circle(grid, x, y, self.radius, self.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = Brush::default();
        assert_eq!(brush.material, Material::Sand);
        assert_eq!(brush.radius, 3);
    }

    #[test]
    fn test_grow_clamps_at_max() {
        let mut brush = Brush::new(Material::Water, 9);
        brush.grow();
        assert_eq!(brush.radius, 10);
        brush.grow();
        assert_eq!(brush.radius, MAX_BRUSH_RADIUS);
    }

    #[test]
    fn test_shrink_clamps_at_min() {
        let mut brush = Brush::new(Material::Water, 2);
        brush.shrink();
        assert_eq!(brush.radius, 1);
        brush.shrink();
        assert_eq!(brush.radius, MIN_BRUSH_RADIUS);
    }

    #[test]
    fn test_apply_paints_material() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut brush = Brush::default();
        brush.set_material(Material::Plant);

        let written = brush.apply(&mut grid, 5, 5);

        assert_eq!(written, grid.count(Material::Plant));
        assert_eq!(grid.get(5, 5), Some(Material::Plant));
        assert_eq!(grid.get(8, 5), Some(Material::Plant));
        assert_eq!(grid.get(8, 8), Some(Material::Empty));
    }
}
