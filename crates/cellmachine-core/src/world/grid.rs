//! Grid - fixed-size 2D array of materials

use std::ops::RangeInclusive;

use crate::error::AutomatonError;
use crate::simulation::Material;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Fixed-size material grid.
///
/// Row-major storage, index = y * width + x. Row 0 is the top of the grid and
/// y grows downward, so "falling" means y + 1. There is no wrap-around: any
/// coordinate outside `0..width` / `0..height` reads as `None` and writes are
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Material>,
}

impl Grid {
    /// Create an all-Empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, AutomatonError> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Material::Empty; width * height],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| y as usize * self.width + x as usize)
    }

    /// Get material at (x, y), or None when out of bounds
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Material> {
        self.index(x, y).map(|i| self.cells[i])
    }

    #[inline]
    pub fn get_at(&self, pos: IVec2) -> Option<Material> {
        self.get(pos.x, pos.y)
    }

    /// Set material at (x, y). Returns false (and does nothing) when out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, material: Material) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = material;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn set_at(&mut self, pos: IVec2, material: Material) -> bool {
        self.set(pos.x, pos.y, material)
    }

    pub fn fill(&mut self, material: Material) {
        self.cells.fill(material);
    }

    /// Count cells holding `material`
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Count non-empty cells
    pub fn count_non_empty(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    /// Raw row-major cell slice
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Material]> {
        self.cells.chunks_exact(self.width)
    }

    /// Columns in `center + lo ..= center + hi` that lie on the grid
    pub(crate) fn clip_columns(&self, center: i64, lo: i64, hi: i64) -> RangeInclusive<i64> {
        clip_axis(center, lo, hi, self.width)
    }

    /// Rows in `center + lo ..= center + hi` that lie on the grid
    pub(crate) fn clip_rows(&self, center: i64, lo: i64, hi: i64) -> RangeInclusive<i64> {
        clip_axis(center, lo, hi, self.height)
    }

    /// Overwrite this grid's cells with another grid of the same size
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }
}

// Coordinates are i32, so columns and rows past i32::MAX are unreachable
fn clip_axis(center: i64, lo: i64, hi: i64, len: usize) -> RangeInclusive<i64> {
    let last = len.min(i32::MAX as usize) as i64 - 1;
    (center + lo).max(0)..=(center + hi).min(last)
}
