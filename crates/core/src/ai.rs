//! Adversary behavior policies.
//! This module exists so each behavior maps a snapshot of the board to one decision.
//! It does not mutate actors; the turn controller executes whatever comes back.

use std::collections::BTreeSet;

use tracing::trace;

use crate::mapgen::TileGrid;
use crate::pathfinding::shortest_path;
use crate::types::{Behavior, Pos, manhattan};

pub const SKIRMISH_MIN_RANGE: u32 = 3;
pub const SKIRMISH_MAX_RANGE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Attack,
    MoveTo(Pos),
    Hold,
}

#[derive(Clone, Copy, Debug)]
pub struct AiContext<'a> {
    pub grid: &'a TileGrid,
    pub self_pos: Pos,
    pub target_pos: Pos,
    /// Tiles held by other live actors, excluding this one and the target.
    pub occupied: &'a BTreeSet<Pos>,
}

impl AiContext<'_> {
    fn is_free(&self, pos: Pos) -> bool {
        self.grid.is_walkable(pos) && !self.occupied.contains(&pos) && pos != self.target_pos
    }
}

pub fn decide(behavior: Behavior, ctx: &AiContext<'_>) -> Decision {
    let distance = manhattan(ctx.self_pos, ctx.target_pos);
    let decision = match behavior {
        Behavior::Chase if distance == 1 => Decision::Attack,
        Behavior::Chase => approach(ctx),
        Behavior::Skirmish if distance < SKIRMISH_MIN_RANGE => move_away(ctx),
        Behavior::Skirmish if distance > SKIRMISH_MAX_RANGE => approach(ctx),
        Behavior::Skirmish => Decision::Attack,
        Behavior::Sentinel if distance == 1 => Decision::Attack,
        Behavior::Sentinel => Decision::Hold,
    };
    trace!(?behavior, distance, ?decision, from = ?ctx.self_pos, "adversary decision");
    decision
}

/// First step of a shortest path toward the target, or hold when there is none.
fn approach(ctx: &AiContext<'_>) -> Decision {
    let Some(path) = shortest_path(ctx.grid, ctx.self_pos, ctx.target_pos) else {
        return Decision::Hold;
    };
    match path.get(1) {
        Some(&step) if ctx.is_free(step) => Decision::MoveTo(step),
        _ => Decision::Hold,
    }
}

/// Steps directly away on both axes, then on x alone, then on y alone.
fn move_away(ctx: &AiContext<'_>) -> Decision {
    let away_x = (ctx.self_pos.x - ctx.target_pos.x).signum();
    let away_y = (ctx.self_pos.y - ctx.target_pos.y).signum();
    let candidates = [
        ctx.self_pos.offset(away_x, away_y),
        ctx.self_pos.offset(away_x, 0),
        ctx.self_pos.offset(0, away_y),
    ];
    candidates
        .into_iter()
        .find(|&candidate| candidate != ctx.self_pos && ctx.is_free(candidate))
        .map_or(Decision::Hold, Decision::MoveTo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room() -> TileGrid {
        TileGrid::from_ascii(&[
            "############",
            "#..........#",
            "#..........#",
            "#..........#",
            "#..........#",
            "#..........#",
            "############",
        ])
    }

    fn decide_in(grid: &TileGrid, behavior: Behavior, self_pos: Pos, target_pos: Pos) -> Decision {
        let occupied = BTreeSet::new();
        decide(behavior, &AiContext { grid, self_pos, target_pos, occupied: &occupied })
    }

    #[test]
    fn sentinel_holds_at_distance_two() {
        let grid = open_room();
        let decision = decide_in(&grid, Behavior::Sentinel, Pos::new(3, 3), Pos::new(5, 3));
        assert_eq!(decision, Decision::Hold);
    }

    #[test]
    fn sentinel_attacks_when_adjacent() {
        let grid = open_room();
        let decision = decide_in(&grid, Behavior::Sentinel, Pos::new(3, 3), Pos::new(3, 4));
        assert_eq!(decision, Decision::Attack);
    }

    #[test]
    fn skirmisher_retreats_instead_of_attacking_at_melee_range() {
        let grid = open_room();
        let decision = decide_in(&grid, Behavior::Skirmish, Pos::new(5, 3), Pos::new(4, 3));
        assert_eq!(decision, Decision::MoveTo(Pos::new(6, 3)));
    }

    #[test]
    fn skirmisher_retreat_prefers_combined_step() {
        let grid = open_room();
        let decision = decide_in(&grid, Behavior::Skirmish, Pos::new(5, 3), Pos::new(4, 2));
        assert_eq!(decision, Decision::MoveTo(Pos::new(6, 4)));
    }

    #[test]
    fn skirmisher_retreat_falls_back_to_single_axis_steps() {
        let grid = open_room();
        // Backed against the bottom wall: the combined step is blocked.
        let decision = decide_in(&grid, Behavior::Skirmish, Pos::new(9, 5), Pos::new(8, 4));
        assert_eq!(decision, Decision::MoveTo(Pos::new(10, 5)));

        let cornered = decide_in(&grid, Behavior::Skirmish, Pos::new(10, 5), Pos::new(9, 4));
        assert_eq!(cornered, Decision::Hold);
    }

    #[test]
    fn skirmisher_attacks_inside_its_band_and_closes_beyond_it() {
        let grid = open_room();
        for target_x in [4, 5, 6] {
            let decision =
                decide_in(&grid, Behavior::Skirmish, Pos::new(1, 1), Pos::new(target_x, 1));
            assert_eq!(decision, Decision::Attack, "distance {}", target_x - 1);
        }
        let far = decide_in(&grid, Behavior::Skirmish, Pos::new(1, 1), Pos::new(10, 5));
        assert!(matches!(far, Decision::MoveTo(step) if manhattan(step, Pos::new(1, 1)) == 1));
    }

    #[test]
    fn chase_steps_along_shortest_path() {
        let grid = TileGrid::from_ascii(&["#######", "#.....#", "###.###", "#.....#", "#######"]);
        let decision = decide_in(&grid, Behavior::Chase, Pos::new(1, 1), Pos::new(1, 3));
        assert_eq!(decision, Decision::MoveTo(Pos::new(2, 1)));
    }

    #[test]
    fn walled_off_chaser_holds() {
        let grid = TileGrid::from_ascii(&["#######", "#..#..#", "#######"]);
        let decision = decide_in(&grid, Behavior::Chase, Pos::new(1, 1), Pos::new(5, 1));
        assert_eq!(decision, Decision::Hold);
    }

    #[test]
    fn chaser_waits_when_next_step_is_occupied() {
        let grid = TileGrid::from_ascii(&["#######", "#.....#", "#######"]);
        let occupied = BTreeSet::from([Pos::new(2, 1)]);
        let ctx = AiContext {
            grid: &grid,
            self_pos: Pos::new(1, 1),
            target_pos: Pos::new(5, 1),
            occupied: &occupied,
        };
        assert_eq!(decide(Behavior::Chase, &ctx), Decision::Hold);
    }
}
