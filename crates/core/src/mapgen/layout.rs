//! Room placement and corridor carving logic for base map topology.

use tracing::debug;

use super::grid::TileGrid;
use crate::config::GeneratorConfig;
use crate::rng::SimRng;
use crate::types::{Pos, TileKind, manhattan};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub(super) fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct RoomLayout {
    /// Rooms in generation order.
    pub(super) rooms: Vec<RoomRect>,
    /// Undirected corridor links as `(earlier, later)` room index pairs.
    pub(super) corridors: Vec<(usize, usize)>,
}

pub(super) fn build_room_layout(
    rng: &mut SimRng,
    config: &GeneratorConfig,
    width: usize,
    height: usize,
) -> RoomLayout {
    let mut rooms: Vec<RoomRect> = Vec::new();
    for _ in 0..config.placement_attempts {
        if rooms.len() >= config.max_rooms {
            break;
        }
        let room_width = rng.range_usize(config.min_room_width, config.max_room_width);
        let room_height = rng.range_usize(config.min_room_height, config.max_room_height);
        if room_width == 0 || room_height == 0 || room_width + 2 > width || room_height + 2 > height
        {
            continue;
        }

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        let x = rng.range_usize(1, max_x);
        let y = rng.range_usize(1, max_y);
        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(config.room_margin);
        if rooms.iter().any(|existing_room| {
            existing_room.expanded(config.room_margin).intersects(&candidate_with_margin)
        }) {
            continue;
        }
        rooms.push(candidate);
    }

    if rooms.is_empty() {
        rooms.push(fallback_room(width, height));
    }

    let corridors = plan_corridors(rng, config, &rooms);
    debug!(rooms = rooms.len(), corridors = corridors.len(), "room layout planned");
    RoomLayout { rooms, corridors }
}

fn fallback_room(width: usize, height: usize) -> RoomRect {
    let room_width = (width - 2).min(4);
    let room_height = (height - 2).min(3);
    RoomRect {
        x: (width - room_width) / 2,
        y: (height - room_height) / 2,
        width: room_width,
        height: room_height,
    }
}

/// Links every room after the first to its nearest earlier room, plus occasional loops.
fn plan_corridors(
    rng: &mut SimRng,
    config: &GeneratorConfig,
    rooms: &[RoomRect],
) -> Vec<(usize, usize)> {
    let mut corridors = Vec::new();
    for later in 1..rooms.len() {
        let later_center = rooms[later].center();
        let mut nearest = 0;
        let mut nearest_distance = u32::MAX;
        for (earlier, room) in rooms.iter().enumerate().take(later) {
            let distance = manhattan(room.center(), later_center);
            if distance < nearest_distance {
                nearest = earlier;
                nearest_distance = distance;
            }
        }
        corridors.push((nearest, later));

        if later >= 2 && rng.chance(config.extra_corridor_chance) {
            let extra = rng.range_usize(0, later - 1);
            if extra != nearest {
                corridors.push((extra, later));
            }
        }
    }
    corridors
}

pub(super) fn carve_room(grid: &mut TileGrid, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            grid.set(Pos { y: y as i32, x: x as i32 }, TileKind::Floor);
        }
    }
}

pub(super) fn carve_corridor(grid: &mut TileGrid, rng: &mut SimRng, start: Pos, end: Pos) {
    if rng.coin() {
        carve_horizontal_line(grid, start.y, start.x, end.x);
        carve_vertical_line(grid, end.x, start.y, end.y);
    } else {
        carve_vertical_line(grid, start.x, start.y, end.y);
        carve_horizontal_line(grid, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(grid: &mut TileGrid, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_interior(grid, Pos { y, x });
    }
}

fn carve_vertical_line(grid: &mut TileGrid, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_interior(grid, Pos { y, x });
    }
}

/// Corridors never open the outer wall ring.
fn carve_interior(grid: &mut TileGrid, pos: Pos) {
    if pos.x <= 0
        || pos.y <= 0
        || pos.x as usize >= grid.width() - 1
        || pos.y as usize >= grid.height() - 1
    {
        return;
    }
    grid.set(pos, TileKind::Floor);
}
