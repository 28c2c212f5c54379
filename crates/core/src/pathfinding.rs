//! Deterministic shortest-path helpers over a tile grid.
//! This module exists so navigation rules are shared by role assignment and adversary AI.
//! It does not own behavior policy or occupancy rules.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::mapgen::TileGrid;
use crate::types::{Pos, manhattan, neighbors};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Shortest 4-directional path from `start` to `goal`, both ends included.
///
/// Returns `None` when either end is not walkable or no route exists. A path from a tile to
/// itself is the single-element path `[start]`.
pub fn shortest_path(grid: &TileGrid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let Some(&cur_g) = g_score.get(&p) else {
            continue;
        };
        for n in neighbors(p) {
            if !grid.is_walkable(n) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        match came.get(&p) {
            Some(&previous) => p = previous,
            None => break,
        }
        result.push(p);
    }
    result.reverse();
    result
}

/// Breadth-first step counts from `origin` to every reachable floor tile.
pub fn distance_field(grid: &TileGrid, origin: Pos) -> BTreeMap<Pos, u32> {
    let mut distances = BTreeMap::new();
    if !grid.is_walkable(origin) {
        return distances;
    }

    let mut queue = VecDeque::from([origin]);
    distances.insert(origin, 0);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances[&current] + 1;
        for neighbor in neighbors(current) {
            if grid.is_walkable(neighbor) && !distances.contains_key(&neighbor) {
                distances.insert(neighbor, next_distance);
                queue.push_back(neighbor);
            }
        }
    }
    distances
}
