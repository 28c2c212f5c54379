//! Rectangular tile storage and tile-space primitives used by every other mapgen pass.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Builds a grid from text rows where `#` is wall and anything else is floor.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            debug_assert_eq!(row.chars().count(), width, "grid rows must be rectangular");
            tiles.extend(
                row.chars().map(|c| if c == '#' { TileKind::Wall } else { TileKind::Floor }),
            );
        }
        Self { width, height, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    pub(crate) fn set(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub(crate) fn pos_of(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    /// Row-major matrix of wire codes (`Floor = 0`, `Wall = 1`).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|tile| tile.code()).collect())
            .collect()
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|tile| match tile {
                TileKind::Floor => '.',
                TileKind::Wall => '#',
            }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_queries_read_as_wall() {
        let grid = TileGrid::filled(3, 3, TileKind::Floor);
        assert_eq!(grid.tile_at(Pos::new(-1, 0)), TileKind::Wall);
        assert_eq!(grid.tile_at(Pos::new(0, 3)), TileKind::Wall);
        assert!(!grid.is_walkable(Pos::new(3, 1)));
        assert!(grid.is_walkable(Pos::new(2, 2)));
    }

    #[test]
    fn ascii_round_trip_preserves_layout() {
        let rows = ["#####", "#..##", "#####"];
        let grid = TileGrid::from_ascii(&rows);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.floor_count(), 2);
        assert_eq!(grid.to_ascii(), "#####\n#..##\n#####\n");
    }

    #[test]
    fn rows_use_floor_zero_wall_one() {
        let grid = TileGrid::from_ascii(&["#.", ".#"]);
        assert_eq!(grid.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn index_and_pos_are_inverse() {
        let grid = TileGrid::filled(7, 4, TileKind::Wall);
        let pos = Pos::new(5, 2);
        assert_eq!(grid.pos_of(grid.index(pos)), pos);
    }
}
