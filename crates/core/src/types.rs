use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ActorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
}

impl TileKind {
    /// Wire value consumed by renderers: `Floor = 0`, `Wall = 1`.
    pub fn code(self) -> u8 {
        match self {
            TileKind::Floor => 0,
            TileKind::Wall => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomRole {
    Start,
    Normal,
    Boss,
    Treasure,
    Challenge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomTheme {
    Stone,
    Moss,
    Crypt,
    Ember,
    Frost,
}

impl RoomTheme {
    pub const PALETTE: [RoomTheme; 5] =
        [RoomTheme::Stone, RoomTheme::Moss, RoomTheme::Crypt, RoomTheme::Ember, RoomTheme::Frost];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Chase,
    Skirmish,
    Sentinel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Hero,
    Rat,
    Archer,
    Warden,
}

impl ActorKind {
    pub fn default_behavior(self) -> Option<Behavior> {
        match self {
            ActorKind::Hero => None,
            ActorKind::Rat => Some(Behavior::Chase),
            ActorKind::Archer => Some(Behavior::Skirmish),
            ActorKind::Warden => Some(Behavior::Sentinel),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    ControlledTurn,
    AdversaryTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorRef {
    Controlled,
    Adversary(ActorId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    PhaseChanged { phase: TurnPhase },
    StatusTicked { actor: ActorRef, damage: i32, healing: i32 },
    Attacked { attacker: ActorRef, target: ActorRef, damage: i32, defeated: bool },
    Moved { actor: ActorRef, from: Pos, to: Pos },
    Held { actor: ActorRef },
    Stunned { actor: ActorRef },
    Removed { actor: ActorId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_axis_distances() {
        assert_eq!(manhattan(Pos::new(1, 1), Pos::new(4, 3)), 5);
        assert_eq!(manhattan(Pos::new(4, 3), Pos::new(1, 1)), 5);
        assert_eq!(manhattan(Pos::new(2, 2), Pos::new(2, 2)), 0);
    }

    #[test]
    fn pos_orders_by_row_then_column() {
        let mut positions = vec![Pos::new(3, 1), Pos::new(0, 2), Pos::new(1, 1)];
        positions.sort();
        assert_eq!(positions, vec![Pos::new(1, 1), Pos::new(3, 1), Pos::new(0, 2)]);
    }

    #[test]
    fn tile_codes_match_renderer_contract() {
        assert_eq!(TileKind::Floor.code(), 0);
        assert_eq!(TileKind::Wall.code(), 1);
    }
}
