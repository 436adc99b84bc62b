//! Procedural starting arrangements
//!
//! Policies are plain serde data so presets can live in RON files next to the
//! rest of the configuration.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::rng_trait::CellRng;
use crate::simulation::Material;

/// Vertical band a blob center is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    /// Rows `0..=height/2`
    Upper,
    /// Rows `height/2..height`
    Lower,
    /// Any row
    Anywhere,
}

impl Band {
    /// Inclusive row range for a grid of `height` rows
    fn rows(self, height: usize) -> (usize, usize) {
        let last = height - 1;
        match self {
            Band::Upper => (0, (height / 2).min(last)),
            Band::Lower => ((height / 2).min(last), last),
            Band::Anywhere => (0, last),
        }
    }
}

/// One family of blobs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobLayer {
    pub count: u32,
    pub radius: i32,
    pub band: Band,
}

/// Clustered blobs of sand, water and stone plus scattered plant seeds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlobConfig {
    pub sand: BlobLayer,
    pub water: BlobLayer,
    /// Single plant cells, placed only onto empty cells
    pub plant_seeds: u32,
    pub stone: BlobLayer,
    /// Chance that a cell inside a blob's disc is filled (0.0 - 1.0)
    pub fill_chance: f32,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            sand: BlobLayer {
                count: 10,
                radius: 15,
                band: Band::Upper,
            },
            water: BlobLayer {
                count: 5,
                radius: 10,
                band: Band::Lower,
            },
            plant_seeds: 20,
            stone: BlobLayer {
                count: 7,
                radius: 8,
                band: Band::Anywhere,
            },
            fill_chance: 0.7,
        }
    }
}

/// Uniform random fill with non-empty materials
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Fraction of the grid's cell count to scatter (3000 cells on 200x200)
    pub density: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self { density: 0.075 }
    }
}

impl ScatterConfig {
    /// Number of scatter draws for a grid of `cells` cells
    pub fn count_for(&self, cells: usize) -> usize {
        (cells as f32 * self.density.max(0.0)).round() as usize
    }
}

/// How `Automaton::initialize` fills the grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Clear to Empty
    Empty,
    /// Clear, then place blobs
    Blobs(BlobConfig),
    /// Scatter random materials over the current contents
    Scatter(ScatterConfig),
    /// Clear, place blobs, then scatter on top
    BlobsThenScatter(BlobConfig, ScatterConfig),
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::BlobsThenScatter(BlobConfig::default(), ScatterConfig::default())
    }
}

/// Applies seed policies to a grid
pub struct GridGenerator;

impl GridGenerator {
    pub fn generate<R: CellRng>(grid: &mut Grid, policy: &SeedPolicy, rng: &mut R) {
        match policy {
            SeedPolicy::Empty => grid.fill(Material::Empty),
            SeedPolicy::Blobs(blobs) => Self::place_blobs(grid, blobs, rng),
            SeedPolicy::Scatter(scatter) => Self::scatter(grid, scatter, rng),
            SeedPolicy::BlobsThenScatter(blobs, scatter) => {
                Self::place_blobs(grid, blobs, rng);
                Self::scatter(grid, scatter, rng);
            }
        }

        log::debug!(
            "Seeded {}x{} grid: {} non-empty cells",
            grid.width(),
            grid.height(),
            grid.count_non_empty()
        );
    }

    /// Clear the grid and lay down sand, water, plant seeds and stone, in that
    /// order (later layers overwrite earlier ones).
    pub fn place_blobs<R: CellRng>(grid: &mut Grid, config: &BlobConfig, rng: &mut R) {
        grid.fill(Material::Empty);

        Self::place_layer(grid, &config.sand, Material::Sand, config.fill_chance, rng);
        Self::place_layer(grid, &config.water, Material::Water, config.fill_chance, rng);

        for _ in 0..config.plant_seeds {
            let (x, y) = Self::random_position(grid, Band::Anywhere, rng);
            if grid.get(x, y) == Some(Material::Empty) {
                grid.set(x, y, Material::Plant);
            }
        }

        Self::place_layer(grid, &config.stone, Material::Stone, config.fill_chance, rng);
    }

    fn place_layer<R: CellRng>(
        grid: &mut Grid,
        layer: &BlobLayer,
        material: Material,
        fill_chance: f32,
        rng: &mut R,
    ) {
        for _ in 0..layer.count {
            let (x, y) = Self::random_position(grid, layer.band, rng);
            Self::create_blob(grid, x, y, material, layer.radius, fill_chance, rng);
        }
    }

    /// Perforated disc of `material` centered on (x, y).
    ///
    /// Covers offsets `-size..size` with `i² + j² < size²`; each in-bounds
    /// cell is filled with probability `fill_chance`. A non-positive size
    /// places nothing.
    pub fn create_blob<R: CellRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: Material,
        size: i32,
        fill_chance: f32,
        rng: &mut R,
    ) -> usize {
        let size = i64::from(size);
        let size_sq = size * size;
        let (cx, cy) = (i64::from(x), i64::from(y));
        let mut placed = 0;

        // Only the part of the bounding square that overlaps the grid
        for nx in grid.clip_columns(cx, -size, size - 1) {
            let i = nx - cx;
            for ny in grid.clip_rows(cy, -size, size - 1) {
                let j = ny - cy;
                if i * i + j * j < size_sq && rng.check_probability(fill_chance) {
                    grid.set(nx as i32, ny as i32, material);
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Overwrite random cells with random non-empty materials
    pub fn scatter<R: CellRng>(grid: &mut Grid, config: &ScatterConfig, rng: &mut R) {
        let count = config.count_for(grid.width() * grid.height());
        for _ in 0..count {
            let (x, y) = Self::random_position(grid, Band::Anywhere, rng);
            let material = Material::PAINTABLE[rng.gen_index(Material::PAINTABLE.len())];
            grid.set(x, y, material);
        }
    }

    fn random_position<R: CellRng>(grid: &Grid, band: Band, rng: &mut R) -> (i32, i32) {
        let (top, bottom) = band.rows(grid.height());
        let x = rng.gen_index(grid.width());
        let y = top + rng.gen_index(bottom - top + 1);
        (x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn rng() -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(2024)
    }

    #[test]
    fn test_band_rows() {
        assert_eq!(Band::Upper.rows(200), (0, 100));
        assert_eq!(Band::Lower.rows(200), (100, 199));
        assert_eq!(Band::Anywhere.rows(200), (0, 199));
        // Single row grids collapse every band onto row 0
        assert_eq!(Band::Upper.rows(1), (0, 0));
        assert_eq!(Band::Lower.rows(1), (0, 0));
    }

    #[test]
    fn test_empty_policy_clears() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.fill(Material::Sand);

        GridGenerator::generate(&mut grid, &SeedPolicy::Empty, &mut rng());
        assert_eq!(grid.count_non_empty(), 0);
    }

    #[test]
    fn test_full_blob_is_disc() {
        let mut grid = Grid::new(20, 20).unwrap();

        let placed =
            GridGenerator::create_blob(&mut grid, 10, 10, Material::Stone, 3, 1.0, &mut rng());

        // Offsets -3..3 with i² + j² < 9
        let expected = (-3..3)
            .flat_map(|i| (-3..3).map(move |j| (i, j)))
            .filter(|(i, j)| i * i + j * j < 9)
            .count();
        assert_eq!(placed, expected);
        assert_eq!(grid.count(Material::Stone), expected);
        assert_eq!(grid.get(10, 10), Some(Material::Stone));
        assert_eq!(grid.get(13, 10), Some(Material::Empty));
        assert_eq!(grid.get(7, 10), Some(Material::Empty));
    }

    #[test]
    fn test_blob_clipped_at_edges() {
        let mut grid = Grid::new(5, 5).unwrap();
        let placed =
            GridGenerator::create_blob(&mut grid, 0, 0, Material::Sand, 4, 1.0, &mut rng());
        assert_eq!(placed, grid.count(Material::Sand));
        assert!(placed > 0);
    }

    #[test]
    fn test_huge_blob_covers_small_grid() {
        let mut grid = Grid::new(5, 5).unwrap();

        let placed =
            GridGenerator::create_blob(&mut grid, 2, 2, Material::Stone, 50_000, 1.0, &mut rng());
        assert_eq!(placed, 25);

        let placed =
            GridGenerator::create_blob(&mut grid, 0, 0, Material::Sand, i32::MAX, 1.0, &mut rng());
        assert_eq!(placed, 25);
        assert_eq!(grid.count(Material::Sand), 25);
    }

    #[test]
    fn test_non_positive_blob_places_nothing() {
        let mut grid = Grid::new(5, 5).unwrap();
        for size in [0, -4] {
            let placed =
                GridGenerator::create_blob(&mut grid, 2, 2, Material::Water, size, 1.0, &mut rng());
            assert_eq!(placed, 0);
        }
        assert_eq!(grid.count_non_empty(), 0);
    }

    #[test]
    fn test_blob_fill_chance_zero_places_nothing() {
        let mut grid = Grid::new(20, 20).unwrap();
        let placed =
            GridGenerator::create_blob(&mut grid, 10, 10, Material::Water, 5, 0.0, &mut rng());
        assert_eq!(placed, 0);
        assert_eq!(grid.count_non_empty(), 0);
    }

    #[test]
    fn test_default_blobs_use_expected_materials() {
        let mut grid = Grid::new(200, 200).unwrap();
        GridGenerator::place_blobs(&mut grid, &BlobConfig::default(), &mut rng());

        assert!(grid.count(Material::Sand) > 0);
        assert!(grid.count(Material::Water) > 0);
        assert!(grid.count(Material::Stone) > 0);
        assert!(grid.count(Material::Plant) <= 20);
        assert_eq!(grid.count(Material::Fire), 0);
        assert_eq!(grid.count(Material::Lava), 0);
    }

    #[test]
    fn test_scatter_count_matches_reference_density() {
        assert_eq!(ScatterConfig::default().count_for(200 * 200), 3000);
        assert_eq!(ScatterConfig { density: -1.0 }.count_for(100), 0);
    }

    #[test]
    fn test_scatter_never_places_empty() {
        let mut grid = Grid::new(50, 50).unwrap();
        let config = ScatterConfig { density: 0.5 };
        GridGenerator::scatter(&mut grid, &config, &mut rng());

        let non_empty = grid.count_non_empty();
        assert!(non_empty > 0);
        assert!(non_empty <= config.count_for(2500));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut a = Grid::new(64, 64).unwrap();
        let mut b = Grid::new(64, 64).unwrap();
        let policy = SeedPolicy::default();

        GridGenerator::generate(&mut a, &policy, &mut rng());
        GridGenerator::generate(&mut b, &policy, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_policy_ron_roundtrip() {
        let policy = SeedPolicy::default();
        let text = ron::to_string(&policy).expect("serialize");
        let back: SeedPolicy = ron::from_str(&text).expect("deserialize");
        assert_eq!(back, policy);
    }
}
