//! Actor state: position, combat stats, behavior tag, and owned status effects.

use crate::combat::CombatStats;
use crate::config::CombatConfig;
use crate::status::{StatusEffects, TickOutcome};
use crate::types::{ActorKind, Behavior, Pos};

#[derive(Debug)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: Pos,
    pub stats: CombatStats,
    /// `None` for the controlled actor; fixed at creation for adversaries.
    pub behavior: Option<Behavior>,
    pub status: StatusEffects,
}

impl Actor {
    pub fn controlled(pos: Pos, stats: CombatStats) -> Self {
        Self { kind: ActorKind::Hero, pos, stats, behavior: None, status: StatusEffects::new() }
    }

    pub fn adversary(kind: ActorKind, pos: Pos, stats: CombatStats, behavior: Behavior) -> Self {
        Self { kind, pos, stats, behavior: Some(behavior), status: StatusEffects::new() }
    }

    /// Adversary with the kind's stock stats and behavior. Heroes get no behavior.
    pub fn from_kind(kind: ActorKind, pos: Pos) -> Self {
        let stats = match kind {
            ActorKind::Hero => CombatStats::new(30, 6, 2),
            ActorKind::Rat => CombatStats::new(8, 4, 0),
            ActorKind::Archer => CombatStats::new(10, 5, 1),
            ActorKind::Warden => CombatStats::new(18, 6, 3),
        };
        Self { kind, pos, stats, behavior: kind.default_behavior(), status: StatusEffects::new() }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Stats used when this actor attacks or is attacked.
    ///
    /// Attack and defense modifiers from active effects are folded in and floored at zero
    /// unless the config turns them off.
    pub fn effective_stats(&self, config: &CombatConfig) -> CombatStats {
        if !config.apply_status_modifiers {
            return self.stats;
        }
        let modifiers = self.status.stat_modifiers();
        CombatStats {
            attack: (self.stats.attack + modifiers.attack).max(0),
            defense: (self.stats.defense + modifiers.defense).max(0),
            ..self.stats
        }
    }

    pub fn tick_status(&mut self) -> TickOutcome {
        self.status.tick(&mut self.stats)
    }
}
