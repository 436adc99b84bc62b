//! The falling-sand grid and its update engine

mod automaton;
mod ca_update;
pub mod generation;
mod grid;
mod neighbor_queries;
pub mod rng_trait;
pub mod stats;

pub use automaton::{Automaton, ColumnOrder, RowOrder, RunState, SweepOrder};
pub use ca_update::{
    CellularAutomataUpdater, FIRE_BURNOUT_CHANCE, FIRE_SPREAD_CHANCE, PLANT_GROWTH_CHANCE,
    PLANT_IGNITE_CHANCE,
};
pub use generation::{Band, BlobConfig, BlobLayer, GridGenerator, ScatterConfig, SeedPolicy};
pub use grid::Grid;
pub use neighbor_queries::{NeighborQueries, Neighborhood};
pub use rng_trait::CellRng;
pub use stats::{NoopStats, SimStats, StepStats};
