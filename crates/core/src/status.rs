//! Timed status effects owned by a single actor.
//! This module exists so stacking, refresh, and tick rules live behind one closed set of kinds.
//! It does not decide turn skipping; callers read `is_incapacitated` and act on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::{CombatStats, apply_damage, apply_healing};

pub const MAX_STACKS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Burning,
    Bleeding,
    Regeneration,
    Strength,
    Weakness,
    Fortified,
    Vulnerable,
    Stun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    DamageOverTime,
    StackingDamageOverTime,
    HealOverTime,
    AttackModifier,
    DefenseModifier,
    Incapacitate,
}

impl StatusKind {
    pub fn category(self) -> StatusCategory {
        match self {
            StatusKind::Poison | StatusKind::Burning => StatusCategory::DamageOverTime,
            StatusKind::Bleeding => StatusCategory::StackingDamageOverTime,
            StatusKind::Regeneration => StatusCategory::HealOverTime,
            StatusKind::Strength | StatusKind::Weakness => StatusCategory::AttackModifier,
            StatusKind::Fortified | StatusKind::Vulnerable => StatusCategory::DefenseModifier,
            StatusKind::Stun => StatusCategory::Incapacitate,
        }
    }

    /// `+1` for buffs, `-1` for debuffs; potency is always stored as a magnitude.
    fn modifier_sign(self) -> i32 {
        match self {
            StatusKind::Weakness | StatusKind::Vulnerable => -1,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns remaining.
    pub duration: u32,
    pub potency: i32,
    pub stacks: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: u32, potency: i32) -> Self {
        Self { kind, duration, potency, stacks: 1 }
    }

    fn tick_damage(&self) -> i32 {
        match self.kind.category() {
            StatusCategory::DamageOverTime => self.potency,
            StatusCategory::StackingDamageOverTime => {
                self.potency.saturating_mul(self.stacks as i32)
            }
            _ => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub damage: i32,
    pub healing: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatModifiers {
    pub attack: i32,
    pub defense: i32,
}

type AmountObserver = Box<dyn FnMut(i32)>;

/// Per-actor feedback hooks for floating text and sound. Both are optional.
#[derive(Default)]
pub struct StatusObservers {
    pub on_damage: Option<AmountObserver>,
    pub on_heal: Option<AmountObserver>,
}

impl fmt::Debug for StatusObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusObservers")
            .field("on_damage", &self.on_damage.is_some())
            .field("on_heal", &self.on_heal.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
    observers: StatusObservers,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_observers(&mut self, observers: StatusObservers) {
        self.observers = observers;
    }

    pub fn on_damage(&mut self, observer: impl FnMut(i32) + 'static) {
        self.observers.on_damage = Some(Box::new(observer));
    }

    pub fn on_heal(&mut self, observer: impl FnMut(i32) + 'static) {
        self.observers.on_heal = Some(Box::new(observer));
    }

    /// Adds `effect`, or merges it into the active effect of the same kind.
    ///
    /// Zero-duration applications are ignored.
    pub fn apply(&mut self, effect: StatusEffect) {
        if effect.duration == 0 {
            return;
        }
        let Some(active) = self.effects.iter_mut().find(|active| active.kind == effect.kind) else {
            let mut fresh = effect;
            fresh.stacks = fresh.stacks.max(1);
            if fresh.kind.category() == StatusCategory::StackingDamageOverTime {
                fresh.stacks = fresh.stacks.min(MAX_STACKS);
            }
            self.effects.push(fresh);
            return;
        };

        match effect.kind.category() {
            StatusCategory::DamageOverTime | StatusCategory::HealOverTime => {
                active.duration = active.duration.max(effect.duration);
            }
            StatusCategory::StackingDamageOverTime => {
                active.stacks = (active.stacks + 1).min(MAX_STACKS);
                active.duration = active.duration.max(effect.duration);
            }
            StatusCategory::AttackModifier
            | StatusCategory::DefenseModifier
            | StatusCategory::Incapacitate => {
                active.duration = effect.duration;
                active.potency = effect.potency;
            }
        }
    }

    /// Resolves one turn of every effect against `stats`, then counts durations down.
    pub fn tick(&mut self, stats: &mut CombatStats) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        for index in (0..self.effects.len()).rev() {
            let effect = self.effects[index];
            match effect.kind.category() {
                StatusCategory::DamageOverTime | StatusCategory::StackingDamageOverTime => {
                    let damage = effect.tick_damage();
                    apply_damage(stats, damage);
                    outcome.damage = outcome.damage.saturating_add(damage);
                    if damage > 0
                        && let Some(observer) = self.observers.on_damage.as_mut()
                    {
                        observer(damage);
                    }
                }
                StatusCategory::HealOverTime => {
                    let healed = apply_healing(stats, effect.potency);
                    outcome.healing = outcome.healing.saturating_add(healed);
                    if healed > 0
                        && let Some(observer) = self.observers.on_heal.as_mut()
                    {
                        observer(healed);
                    }
                }
                StatusCategory::AttackModifier
                | StatusCategory::DefenseModifier
                | StatusCategory::Incapacitate => {}
            }

            let remaining = effect.duration - 1;
            if remaining == 0 {
                self.effects.remove(index);
            } else {
                self.effects[index].duration = remaining;
            }
        }
        outcome
    }

    pub fn stat_modifiers(&self) -> StatModifiers {
        let mut modifiers = StatModifiers::default();
        for effect in &self.effects {
            let delta = effect.kind.modifier_sign() * effect.potency;
            match effect.kind.category() {
                StatusCategory::AttackModifier => modifiers.attack += delta,
                StatusCategory::DefenseModifier => modifiers.defense += delta,
                _ => {}
            }
        }
        modifiers
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|effect| effect.kind == kind)
    }

    pub fn contains(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_incapacitated(&self) -> bool {
        self.effects.iter().any(|effect| effect.kind.category() == StatusCategory::Incapacitate)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }
}
