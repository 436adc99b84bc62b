//! Material data for the Cell Machine
//!
//! This crate provides the foundational data types shared by the engine and
//! its collaborators:
//! - The closed set of materials a cell can hold (Material)
//! - Coarse physical grouping (MaterialType)
//! - Display palette and hotkey mapping

mod materials;

pub use materials::{Material, MaterialType, ParseMaterialError};
