//! Procedural dungeon generation split into coherent submodules.

pub mod connectivity;

mod generator;
mod grid;
mod layout;
mod model;
mod roles;

pub use connectivity::{ConnectivityReport, analyze, repair};
pub use generator::{DungeonGenerator, GenerateError, MIN_GRID_SIDE};
pub use grid::TileGrid;
pub use model::{Dungeon, Room};
pub use roles::{MAX_DIFFICULTY, difficulty_for_index};

use crate::config::GeneratorConfig;

/// Generates a dungeon with the default generator tuning.
pub fn generate_dungeon(seed: u64, width: usize, height: usize) -> Result<Dungeon, GenerateError> {
    DungeonGenerator::new(seed, GeneratorConfig::default()).generate(width, height)
}
