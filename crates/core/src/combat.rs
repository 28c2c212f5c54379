//! Combat stats and damage math shared by controlled and adversary attacks.
//! This module exists so HP clamping has one owner. It does not look at status effects;
//! callers fold modifiers into the stats they pass in.

use serde::{Deserialize, Serialize};

use crate::rng::SimRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub max_hp: i32,
    pub current_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl CombatStats {
    /// Full-health stats.
    pub fn new(max_hp: i32, attack: i32, defense: i32) -> Self {
        Self { max_hp, current_hp: max_hp, attack, defense }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn missing_hp(&self) -> i32 {
        (self.max_hp - self.current_hp).max(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub defeated: bool,
}

/// Zero when defense absorbs the attack, otherwise uniform in `1..=attack - defense`.
pub fn calculate_damage(attacker: &CombatStats, defender: &CombatStats, rng: &mut SimRng) -> i32 {
    let base = attacker.attack - defender.defense;
    if base <= 0 {
        return 0;
    }
    rng.range_inclusive(1, base)
}

pub fn apply_damage(target: &mut CombatStats, amount: i32) {
    target.current_hp = (target.current_hp - amount.max(0)).max(0);
}

/// Heals up to the missing HP and returns the amount actually restored. The dead stay dead.
pub fn apply_healing(target: &mut CombatStats, amount: i32) -> i32 {
    if !target.is_alive() {
        return 0;
    }
    let healed = amount.max(0).min(target.missing_hp());
    target.current_hp += healed;
    healed
}

pub fn attack(
    attacker: &CombatStats,
    defender: &mut CombatStats,
    rng: &mut SimRng,
) -> AttackOutcome {
    let damage = calculate_damage(attacker, defender, rng);
    apply_damage(defender, damage);
    AttackOutcome { damage, defeated: !defender.is_alive() }
}
