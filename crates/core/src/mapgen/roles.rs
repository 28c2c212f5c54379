//! Room difficulty, theme, and role rules applied after the grid is final.

use super::grid::TileGrid;
use crate::config::GeneratorConfig;
use crate::pathfinding::distance_field;
use crate::rng::SimRng;
use crate::types::{Pos, RoomRole, RoomTheme};

pub const MAX_DIFFICULTY: u8 = 5;

pub fn difficulty_for_index(index: usize) -> u8 {
    let scaled = index / 2 + 1;
    scaled.min(MAX_DIFFICULTY as usize) as u8
}

pub(super) fn draw_themes(rng: &mut SimRng, room_count: usize) -> Vec<RoomTheme> {
    (0..room_count).map(|_| rng.pick(&RoomTheme::PALETTE).unwrap_or(RoomTheme::Stone)).collect()
}

/// Room index whose center is the longest walk from the start room's center.
///
/// Unreachable rooms are skipped; ties keep the earliest room.
pub(super) fn farthest_room_from_start(grid: &TileGrid, centers: &[Pos]) -> Option<usize> {
    let start = *centers.first()?;
    let distances = distance_field(grid, start);
    let mut best: Option<(usize, u32)> = None;
    for (index, center) in centers.iter().enumerate().skip(1) {
        let Some(&distance) = distances.get(center) else {
            continue;
        };
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

pub(super) fn assign_roles(
    rng: &mut SimRng,
    config: &GeneratorConfig,
    grid: &TileGrid,
    centers: &[Pos],
) -> Vec<RoomRole> {
    let boss = farthest_room_from_start(grid, centers);
    centers
        .iter()
        .enumerate()
        .map(|(index, _)| {
            if index == 0 {
                RoomRole::Start
            } else if Some(index) == boss {
                RoomRole::Boss
            } else {
                roll_side_role(rng, config)
            }
        })
        .collect()
}

fn roll_side_role(rng: &mut SimRng, config: &GeneratorConfig) -> RoomRole {
    let roll = rng.unit();
    if roll < config.treasure_threshold {
        RoomRole::Treasure
    } else if roll < config.challenge_threshold {
        RoomRole::Challenge
    } else {
        RoomRole::Normal
    }
}
