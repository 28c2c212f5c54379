//! Flood-fill region analysis and tunnel repair for generated tile grids.
//! This module exists so the "every floor tile reaches every other floor tile" guarantee has
//! one owner. It does not decide room placement or corridor style.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use crate::types::{Pos, TileKind, manhattan, neighbors};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub connected: bool,
    /// Tile indices of each region, regions in row-major discovery order.
    pub regions: Vec<Vec<usize>>,
}

pub fn analyze(grid: &TileGrid) -> ConnectivityReport {
    let mut visited = vec![false; grid.tiles().len()];
    let mut regions = Vec::new();
    for (index, &tile) in grid.tiles().iter().enumerate() {
        if tile != TileKind::Floor || visited[index] {
            continue;
        }
        regions.push(flood_region(grid, index, &mut visited));
    }
    ConnectivityReport { connected: regions.len() <= 1, regions }
}

/// Carves floor tunnels until the grid forms a single region. Returns whether anything changed.
pub fn repair(grid: &mut TileGrid) -> bool {
    let report = analyze(grid);
    if report.connected {
        return false;
    }

    let mut regions = report.regions;
    let main_index = largest_region_index(&regions);
    let mut main_region = regions.remove(main_index);
    let mut in_main = vec![false; grid.tiles().len()];
    for &index in &main_region {
        in_main[index] = true;
    }

    let mut changed = false;
    for region in &regions {
        if in_main[region[0]] {
            continue;
        }
        let (from, to) = closest_pair(grid, region, &main_region);
        changed |= carve_tunnel(grid, from, to);

        in_main.fill(false);
        main_region = flood_region(grid, grid.index(to), &mut in_main);
    }

    debug_assert!(analyze(grid).connected, "repair must leave a single connected region");
    changed
}

fn flood_region(grid: &TileGrid, start: usize, visited: &mut [bool]) -> Vec<usize> {
    let mut region = vec![start];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(current) = queue.pop_front() {
        for next in neighbors(grid.pos_of(current)) {
            if !grid.is_walkable(next) {
                continue;
            }
            let next_index = grid.index(next);
            if visited[next_index] {
                continue;
            }
            visited[next_index] = true;
            region.push(next_index);
            queue.push_back(next_index);
        }
    }
    region
}

fn largest_region_index(regions: &[Vec<usize>]) -> usize {
    let mut best = 0;
    for (index, region) in regions.iter().enumerate() {
        if region.len() > regions[best].len() {
            best = index;
        }
    }
    best
}

fn closest_pair(grid: &TileGrid, region: &[usize], main_region: &[usize]) -> (Pos, Pos) {
    let mut best: Option<(u32, usize, usize)> = None;
    for &from in region {
        let from_pos = grid.pos_of(from);
        for &to in main_region {
            let distance = manhattan(from_pos, grid.pos_of(to));
            let candidate = (distance, from, to);
            if best.is_none_or(|current| candidate < current) {
                best = Some(candidate);
            }
        }
    }
    let (_, from, to) = best.unwrap_or((0, region[0], main_region[0]));
    (grid.pos_of(from), grid.pos_of(to))
}

/// Horizontal leg along `from.y`, then vertical leg along `to.x`.
fn carve_tunnel(grid: &mut TileGrid, from: Pos, to: Pos) -> bool {
    let mut changed = false;
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        changed |= carve(grid, Pos { y: from.y, x });
    }
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        changed |= carve(grid, Pos { y, x: to.x });
    }
    changed
}

fn carve(grid: &mut TileGrid, pos: Pos) -> bool {
    if grid.tile_at(pos) == TileKind::Floor || !grid.in_bounds(pos) {
        return false;
    }
    grid.set(pos, TileKind::Floor);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_room_is_connected() {
        let grid = TileGrid::from_ascii(&["#####", "#...#", "#...#", "#####"]);
        let report = analyze(&grid);
        assert!(report.connected);
        assert_eq!(report.regions.len(), 1);
        assert_eq!(report.regions[0].len(), 6);
    }

    #[test]
    fn grid_without_floor_counts_as_connected() {
        let grid = TileGrid::filled(4, 4, TileKind::Wall);
        let report = analyze(&grid);
        assert!(report.connected);
        assert!(report.regions.is_empty());
    }

    #[test]
    fn diagonal_contact_does_not_join_regions() {
        let grid = TileGrid::from_ascii(&["####", "#.##", "##.#", "####"]);
        let report = analyze(&grid);
        assert!(!report.connected);
        assert_eq!(report.regions.len(), 2);
    }

    #[test]
    fn every_floor_tile_lands_in_exactly_one_region() {
        let grid = TileGrid::from_ascii(&["#########", "#..#..#.#", "#..#..###", "####..#.#"]);
        let report = analyze(&grid);
        let mut seen: Vec<usize> = report.regions.iter().flatten().copied().collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total, "a tile was assigned to two regions");
        assert_eq!(total, grid.floor_count());
        assert_eq!(report.regions.len(), 4);
    }

    #[test]
    fn repair_joins_separated_rooms_without_removing_floor() {
        let mut grid = TileGrid::from_ascii(&[
            "############",
            "#..#####...#",
            "#..#####...#",
            "############",
            "#####..#####",
            "############",
        ]);
        let before = grid.clone();
        assert_eq!(analyze(&grid).regions.len(), 3);

        assert!(repair(&mut grid));
        assert!(analyze(&grid).connected);
        for (index, &tile) in before.tiles().iter().enumerate() {
            if tile == TileKind::Floor {
                assert_eq!(grid.tiles()[index], TileKind::Floor, "repair removed floor at {index}");
            }
        }
    }

    #[test]
    fn repair_on_connected_grid_changes_nothing() {
        let mut grid = TileGrid::from_ascii(&["#####", "#...#", "#####"]);
        let before = grid.clone();
        assert!(!repair(&mut grid));
        assert_eq!(grid, before);
    }

    #[test]
    fn repair_handles_many_scattered_islands() {
        let mut rows = Vec::new();
        for y in 0..15 {
            let row: String = (0..21)
                .map(|x| if x % 4 == 1 && y % 4 == 1 { '.' } else { '#' })
                .collect();
            rows.push(row);
        }
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut grid = TileGrid::from_ascii(&refs);
        assert!(analyze(&grid).regions.len() > 10);

        assert!(repair(&mut grid));
        assert!(analyze(&grid).connected);
    }
}
