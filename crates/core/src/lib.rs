pub mod actor;
pub mod ai;
pub mod combat;
pub mod config;
pub mod mapgen;
pub mod pathfinding;
pub mod rng;
pub mod status;
pub mod turn;
pub mod types;

pub use actor::Actor;
pub use ai::{AiContext, Decision};
pub use combat::{AttackOutcome, CombatStats};
pub use config::{CombatConfig, ConfigError, GeneratorConfig, SimConfig};
pub use mapgen::{Dungeon, DungeonGenerator, GenerateError, Room, TileGrid, generate_dungeon};
pub use rng::SimRng;
pub use status::{StatModifiers, StatusEffect, StatusEffects, StatusKind, TickOutcome};
pub use turn::{CommandError, TurnController, TurnSummary};
pub use types::*;
