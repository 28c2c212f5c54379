//! Public data models for generated dungeons and their room metadata.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::grid::TileGrid;
use crate::types::{Pos, RoomRole, RoomTheme};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub role: RoomRole,
    pub theme: RoomTheme,
    pub difficulty: u8,
    /// Indices of rooms joined to this one by a generated corridor, ascending.
    pub connections: Vec<usize>,
}

impl Room {
    pub fn center(&self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub seed: u64,
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
}

impl Dungeon {
    pub fn start_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.role == RoomRole::Start)
    }

    pub fn boss_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.role == RoomRole::Boss)
    }

    pub fn room_at(&self, pos: Pos) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(pos))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        bytes.extend(self.grid.tiles().iter().map(|tile| tile.code()));

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.x as u32).to_le_bytes());
            bytes.extend((room.y as u32).to_le_bytes());
            bytes.extend((room.width as u32).to_le_bytes());
            bytes.extend((room.height as u32).to_le_bytes());
            bytes.push(room.role as u8);
            bytes.push(room.theme as u8);
            bytes.push(room.difficulty);
            bytes.extend((room.connections.len() as u32).to_le_bytes());
            for &connection in &room.connections {
                bytes.extend((connection as u32).to_le_bytes());
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn room(x: usize, y: usize, width: usize, height: usize) -> Room {
        Room {
            x,
            y,
            width,
            height,
            role: RoomRole::Normal,
            theme: RoomTheme::Stone,
            difficulty: 1,
            connections: Vec::new(),
        }
    }

    #[test]
    fn center_rounds_toward_top_left() {
        assert_eq!(room(2, 3, 4, 3).center(), Pos::new(4, 4));
        assert_eq!(room(1, 1, 5, 5).center(), Pos::new(3, 3));
    }

    #[test]
    fn contains_covers_exactly_the_rectangle() {
        let r = room(2, 2, 3, 2);
        assert!(r.contains(Pos::new(2, 2)));
        assert!(r.contains(Pos::new(4, 3)));
        assert!(!r.contains(Pos::new(5, 3)));
        assert!(!r.contains(Pos::new(2, 4)));
        assert!(!r.contains(Pos::new(-1, 2)));
    }

    #[test]
    fn lookups_find_rooms_by_role_and_position() {
        let start = Room { role: RoomRole::Start, ..room(1, 1, 3, 3) };
        let boss = Room { role: RoomRole::Boss, ..room(8, 2, 4, 3) };
        let dungeon = Dungeon {
            seed: 9,
            grid: TileGrid::filled(14, 8, TileKind::Floor),
            rooms: vec![start, room(5, 5, 2, 2), boss],
        };

        assert_eq!(dungeon.start_room().map(|room| room.x), Some(1));
        assert_eq!(dungeon.boss_room().map(|room| room.x), Some(8));
        assert_eq!(dungeon.room_at(Pos::new(9, 3)), Some(2));
        assert_eq!(dungeon.room_at(Pos::new(5, 6)), Some(1));
        assert_eq!(dungeon.room_at(Pos::new(0, 0)), None);
    }
}
