pub mod error;
pub mod life;
pub mod tools;
pub mod world;

pub use error::AutomatonError;

// Re-export from cellmachine-simulation so callers only need one import path
pub mod simulation {
    pub use cellmachine_simulation::*;
}
