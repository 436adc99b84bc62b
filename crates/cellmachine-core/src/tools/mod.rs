//! Painting tools

mod brush;

pub use brush::{Brush, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS};

use crate::simulation::Material;
use crate::world::Grid;

/// Draw a filled circle of `material` and return the number of cells written.
///
/// Covers every cell with `dx² + dy² <= radius²`; cells outside the grid are
/// skipped, so the center itself may lie off-grid. Work is bounded by the
/// grid, not the radius.
pub fn draw_circle(
    grid: &mut Grid,
    center_x: i32,
    center_y: i32,
    radius: u32,
    material: Material,
) -> usize {
    let r = i64::from(radius);
    let r_sq = i128::from(r) * i128::from(r);
    let (cx, cy) = (i64::from(center_x), i64::from(center_y));
    let mut written = 0;

    // Only the part of the bounding square that overlaps the grid
    for y in grid.clip_rows(cy, -r, r) {
        let dy = i128::from(y - cy);
        for x in grid.clip_columns(cx, -r, r) {
            let dx = i128::from(x - cx);
            if dx * dx + dy * dy <= r_sq && grid.set(x as i32, y as i32, material) {
                written += 1;
            }
        }
    }

    written
}
