//! High-level map generation orchestration that composes layout, repair, and room roles.

use thiserror::Error;
use tracing::{debug, warn};

use super::connectivity::{analyze, repair};
use super::grid::TileGrid;
use super::layout::{RoomLayout, build_room_layout, carve_corridor, carve_room};
use super::model::{Dungeon, Room};
use super::roles::{assign_roles, difficulty_for_index, draw_themes};
use crate::config::{ConfigError, GeneratorConfig};
use crate::rng::{SimRng, Stream};
use crate::types::{Pos, TileKind};

pub const MIN_GRID_SIDE: usize = 5;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("grid {width}x{height} is too small; both sides must be at least {MIN_GRID_SIDE}")]
    GridTooSmall { width: usize, height: usize },
}

pub struct DungeonGenerator {
    seed: u64,
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(seed: u64, config: GeneratorConfig) -> Self {
        Self { seed, config }
    }

    pub fn generate(&self, width: usize, height: usize) -> Result<Dungeon, GenerateError> {
        self.config.validate()?;
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(GenerateError::GridTooSmall { width, height });
        }

        let mut layout_rng = SimRng::for_stream(self.seed, Stream::Layout);
        let mut decoration_rng = SimRng::for_stream(self.seed, Stream::Decoration);

        let mut grid = TileGrid::filled(width, height, TileKind::Wall);
        let layout = build_room_layout(&mut layout_rng, &self.config, width, height);
        for room in &layout.rooms {
            carve_room(&mut grid, room);
        }
        for &(earlier, later) in &layout.corridors {
            let start = layout.rooms[earlier].center();
            let end = layout.rooms[later].center();
            carve_corridor(&mut grid, &mut layout_rng, start, end);
        }

        let report = analyze(&grid);
        if !report.connected {
            warn!(
                seed = self.seed,
                regions = report.regions.len(),
                "generated grid is disconnected; carving repair tunnels"
            );
            repair(&mut grid);
        }

        let centers: Vec<Pos> = layout.rooms.iter().map(|room| room.center()).collect();
        let themes = draw_themes(&mut decoration_rng, layout.rooms.len());
        let roles = assign_roles(&mut decoration_rng, &self.config, &grid, &centers);
        let connections = room_connections(&layout);

        let rooms: Vec<Room> = layout
            .rooms
            .iter()
            .zip(themes)
            .zip(roles)
            .zip(connections)
            .enumerate()
            .map(|(index, (((rect, theme), role), connections))| Room {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                role,
                theme,
                difficulty: difficulty_for_index(index),
                connections,
            })
            .collect();

        debug!(
            seed = self.seed,
            width,
            height,
            rooms = rooms.len(),
            floor_tiles = grid.floor_count(),
            "dungeon generated"
        );
        Ok(Dungeon { seed: self.seed, grid, rooms })
    }
}

fn room_connections(layout: &RoomLayout) -> Vec<Vec<usize>> {
    let mut connections = vec![Vec::new(); layout.rooms.len()];
    for &(earlier, later) in &layout.corridors {
        connections[earlier].push(later);
        connections[later].push(earlier);
    }
    for links in &mut connections {
        links.sort_unstable();
        links.dedup();
    }
    connections
}
