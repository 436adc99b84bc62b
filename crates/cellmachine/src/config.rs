//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `cellmachine.ron` in the working directory, or the file passed with
//!    `--config`
//! 3. Environment variables prefixed with `CELLMACHINE_`
//!
//! Example environment variable: `CELLMACHINE_GRID__WIDTH=320`
//!
//! Command-line flags are applied on top by the binary.

use std::path::Path;

use anyhow::{Context, Result};
use cellmachine_core::tools::Brush;
use cellmachine_core::world::{BlobConfig, ScatterConfig, SeedPolicy, SweepOrder};
use clap::ValueEnum;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub brush: Brush,

    #[serde(default)]
    pub sweep: SweepOrder,

    #[serde(default)]
    pub seeding: SeedingConfig,

    #[serde(default)]
    pub life: LifeConfig,
}

/// Grid dimensions and RNG seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed for reproducible runs (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            seed: None,
        }
    }
}

/// Stepping and output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of updates to run
    pub steps: u64,
    /// Capture a GIF frame every N steps
    pub frame_every: u64,
    /// Output pixels per cell
    pub scale: u32,
    /// GIF playback rate
    pub gif_fps: u16,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            frame_every: 5,
            scale: 4,
            gif_fps: 20,
        }
    }
}

/// Which starting arrangement to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PolicyKind {
    Empty,
    Blobs,
    Scatter,
    #[default]
    BlobsThenScatter,
}

/// Seeding parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedingConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub blobs: BlobConfig,
    #[serde(default)]
    pub scatter: ScatterConfig,
}

impl SeedingConfig {
    /// Build the engine-side policy for `kind`
    pub fn policy_for(&self, kind: PolicyKind) -> SeedPolicy {
        match kind {
            PolicyKind::Empty => SeedPolicy::Empty,
            PolicyKind::Blobs => SeedPolicy::Blobs(self.blobs.clone()),
            PolicyKind::Scatter => SeedPolicy::Scatter(self.scatter.clone()),
            PolicyKind::BlobsThenScatter => {
                SeedPolicy::BlobsThenScatter(self.blobs.clone(), self.scatter.clone())
            }
        }
    }

    /// Policy used by the reset command (blobs only)
    pub fn reset_policy(&self) -> SeedPolicy {
        self.policy_for(PolicyKind::Blobs)
    }
}

/// Game of Life settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    /// Share of cells alive after randomizing (0.0 - 1.0)
    pub density: f32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            density: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority. Without a `path` the optional
    /// `cellmachine.ron` is read; an explicit `path` must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("cellmachine")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("grid.width", 200_i64)?
            .set_default("grid.height", 200_i64)?
            .set_default("run.steps", 200_i64)?
            .set_default("run.frame_every", 5_i64)?
            .set_default("run.scale", 4_i64)?
            .set_default("run.gif_fps", 20_i64)?
            .set_default("brush.material", "sand")?
            .set_default("brush.radius", 3_i64)?
            .set_default("life.width", 80_i64)?
            .set_default("life.height", 60_i64)?
            .set_default("life.density", 0.5)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (CELLMACHINE_GRID__WIDTH, etc.)
            .add_source(Environment::with_prefix("CELLMACHINE").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Pretty RON dump of the effective configuration
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellmachine_core::simulation::Material;
    use cellmachine_core::world::{ColumnOrder, RowOrder};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.grid.width, 200);
        assert_eq!(config.grid.height, 200);
        assert_eq!(config.grid.seed, None);
        assert_eq!(config.run.steps, 200);
        assert_eq!(config.brush, Brush::default());
        assert_eq!(config.sweep, SweepOrder::default());
        assert_eq!(config.seeding.policy, PolicyKind::BlobsThenScatter);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let config = AppConfig::load_from(None).expect("Failed to load config");
        assert_eq!(config.run.scale, 4);
        assert_eq!(config.brush.radius, 3);
        assert_eq!(config.brush.material, Material::Sand);
        assert_eq!(config.life.width, 80);
    }

    #[test]
    fn test_load_from_ron_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"(
                grid: (width: 64, height: 32, seed: 7),
                brush: (material: "water", radius: 5),
                sweep: (rows: "TopDown", columns: "Alternating"),
                seeding: (policy: "Scatter", scatter: (density: 0.2)),
            )"#
        )
        .expect("write config");

        let config = AppConfig::load_from(Some(file.path())).expect("load config");

        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, 32);
        assert_eq!(config.grid.seed, Some(7));
        assert_eq!(config.brush.material, Material::Water);
        assert_eq!(config.brush.radius, 5);
        assert_eq!(config.sweep.rows, RowOrder::TopDown);
        assert_eq!(config.sweep.columns, ColumnOrder::Alternating);
        assert_eq!(config.seeding.policy, PolicyKind::Scatter);
        assert_eq!(
            config.seeding.policy_for(config.seeding.policy),
            SeedPolicy::Scatter(ScatterConfig { density: 0.2 })
        );
        // Untouched sections keep their defaults
        assert_eq!(config.run.steps, 200);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.ron");
        assert!(AppConfig::load_from(Some(&missing)).is_err());
    }

    #[test]
    fn test_reset_policy_is_blobs() {
        let seeding = SeedingConfig::default();
        assert!(matches!(seeding.reset_policy(), SeedPolicy::Blobs(_)));
    }

    #[test]
    fn test_to_ron_roundtrip() {
        let config = AppConfig::default();
        let text = config.to_ron().expect("serialize");
        let back: AppConfig = ron::from_str(&text).expect("deserialize");
        assert_eq!(back.grid.width, config.grid.width);
        assert_eq!(back.seeding.blobs, config.seeding.blobs);
    }
}
