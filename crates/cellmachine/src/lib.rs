//! # Cell Machine
//!
//! Headless collaborator for the falling-sand engine: loads configuration,
//! replays keyboard-style commands, steps the simulation and writes PNG
//! snapshots or animated GIFs.

pub mod config;
pub mod controls;
pub mod headless;
pub mod render;

pub use config::AppConfig;
pub use controls::{Command, Session};

/// Common imports for internal use
pub mod prelude {
    pub use cellmachine_core::life::LifeGrid;
    pub use cellmachine_core::simulation::Material;
    pub use cellmachine_core::tools::Brush;
    pub use cellmachine_core::world::{Automaton, Grid, SeedPolicy};
}
