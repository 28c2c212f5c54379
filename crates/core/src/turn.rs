//! Turn state machine alternating the controlled actor's turn with the adversary phase.
//! This module exists so tick-then-act ordering has one owner. It does not place spawns or
//! render anything; presentation reads the event log and the phase observer.

use std::collections::BTreeSet;
use std::mem;

use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::actor::Actor;
use crate::ai::{AiContext, Decision, decide};
use crate::combat::{AttackOutcome, apply_damage, calculate_damage};
use crate::config::CombatConfig;
use crate::mapgen::TileGrid;
use crate::rng::{SimRng, Stream};
use crate::status::TickOutcome;
use crate::types::{ActorId, ActorRef, Pos, TurnEvent, TurnPhase, manhattan};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("commands are only accepted during the controlled turn")]
    NotControlledTurn,
    #[error("the controlled actor is defeated")]
    ControlledDefeated,
    #[error("the controlled actor is incapacitated")]
    Incapacitated,
    #[error("no tracked adversary with that id")]
    UnknownAdversary,
    #[error("target is already defeated")]
    TargetDefeated,
    #[error("{to:?} is not adjacent to {from:?}")]
    NotAdjacent { from: Pos, to: Pos },
    #[error("{to:?} is not walkable")]
    Blocked { to: Pos },
    #[error("{to:?} is occupied")]
    Occupied { to: Pos },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub controlled_tick: TickOutcome,
    /// Damage dealt to the controlled actor by adversary attacks this phase.
    pub damage_taken: i32,
    /// Adversaries dropped from the tracked set, in removal order.
    pub removed: Vec<ActorId>,
    pub controlled_alive: bool,
}

type TurnObserver = Box<dyn FnMut(bool)>;

pub struct TurnController {
    phase: TurnPhase,
    adversaries: SlotMap<ActorId, Actor>,
    /// Spawn order; step 4 walks it back to front.
    order: Vec<ActorId>,
    rng: SimRng,
    config: CombatConfig,
    observer: Option<TurnObserver>,
    events: Vec<TurnEvent>,
}

impl TurnController {
    pub fn new(seed: u64, config: CombatConfig) -> Self {
        Self {
            phase: TurnPhase::ControlledTurn,
            adversaries: SlotMap::with_key(),
            order: Vec::new(),
            rng: SimRng::for_stream(seed, Stream::Combat),
            config,
            observer: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_controlled_turn(&self) -> bool {
        self.phase == TurnPhase::ControlledTurn
    }

    /// Registers the single phase observer; it receives `true` when the controlled turn starts.
    pub fn set_turn_observer(&mut self, observer: impl FnMut(bool) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn spawn_adversary(&mut self, actor: Actor) -> ActorId {
        let id = self.adversaries.insert(actor);
        self.order.push(id);
        id
    }

    pub fn adversary(&self, id: ActorId) -> Option<&Actor> {
        self.adversaries.get(id)
    }

    pub fn adversary_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.adversaries.get_mut(id)
    }

    /// Tracked adversaries in spawn order, including any defeated ones not yet removed.
    pub fn adversaries(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.order.iter().filter_map(|&id| self.adversaries.get(id).map(|actor| (id, actor)))
    }

    pub fn adversary_count(&self) -> usize {
        self.order.len()
    }

    pub fn drain_events(&mut self) -> Vec<TurnEvent> {
        mem::take(&mut self.events)
    }

    pub fn player_attack(
        &mut self,
        controlled: &Actor,
        target: ActorId,
    ) -> Result<AttackOutcome, CommandError> {
        self.check_controlled_can_act(controlled)?;
        let Some(defender) = self.adversaries.get_mut(target) else {
            return Err(CommandError::UnknownAdversary);
        };
        if !defender.is_alive() {
            return Err(CommandError::TargetDefeated);
        }
        if manhattan(controlled.pos, defender.pos) != 1 {
            return Err(CommandError::NotAdjacent { from: controlled.pos, to: defender.pos });
        }

        let attacker_stats = controlled.effective_stats(&self.config);
        let defender_stats = defender.effective_stats(&self.config);
        let damage = calculate_damage(&attacker_stats, &defender_stats, &mut self.rng);
        apply_damage(&mut defender.stats, damage);
        let outcome = AttackOutcome { damage, defeated: !defender.is_alive() };
        self.events.push(TurnEvent::Attacked {
            attacker: ActorRef::Controlled,
            target: ActorRef::Adversary(target),
            damage,
            defeated: outcome.defeated,
        });
        Ok(outcome)
    }

    pub fn player_move(
        &mut self,
        controlled: &mut Actor,
        grid: &TileGrid,
        to: Pos,
    ) -> Result<(), CommandError> {
        self.check_controlled_can_act(controlled)?;
        let from = controlled.pos;
        if manhattan(from, to) != 1 {
            return Err(CommandError::NotAdjacent { from, to });
        }
        if !grid.is_walkable(to) {
            return Err(CommandError::Blocked { to });
        }
        if self.adversaries.values().any(|actor| actor.is_alive() && actor.pos == to) {
            return Err(CommandError::Occupied { to });
        }
        controlled.pos = to;
        self.events.push(TurnEvent::Moved { actor: ActorRef::Controlled, from, to });
        Ok(())
    }

    fn check_controlled_can_act(&self, controlled: &Actor) -> Result<(), CommandError> {
        if !self.is_controlled_turn() {
            return Err(CommandError::NotControlledTurn);
        }
        if !controlled.is_alive() {
            return Err(CommandError::ControlledDefeated);
        }
        if controlled.status.is_incapacitated() {
            return Err(CommandError::Incapacitated);
        }
        Ok(())
    }

    /// Runs one full adversary phase after the controlled actor spent its turn.
    ///
    /// Every status tick resolves before any adversary acts, so an adversary killed by its own
    /// damage-over-time is removed without taking an action.
    pub fn end_controlled_turn(&mut self, controlled: &mut Actor, grid: &TileGrid) -> TurnSummary {
        debug_assert!(self.is_controlled_turn(), "adversary phase re-entered");
        let mut summary = TurnSummary::default();

        if controlled.is_alive() {
            summary.controlled_tick = controlled.tick_status();
            self.record_tick(ActorRef::Controlled, summary.controlled_tick);
        }

        self.transition(TurnPhase::AdversaryTurn);

        // Stun is judged before the tick so a one-turn stun still costs one action.
        let mut stunned = Vec::new();
        let mut ticks = Vec::new();
        for &id in &self.order {
            let Some(adversary) = self.adversaries.get_mut(id) else {
                continue;
            };
            if !adversary.is_alive() {
                continue;
            }
            if adversary.status.is_incapacitated() {
                stunned.push(id);
            }
            ticks.push((id, adversary.tick_status()));
        }
        for (id, tick) in ticks {
            self.record_tick(ActorRef::Adversary(id), tick);
        }

        for index in (0..self.order.len()).rev() {
            let id = self.order[index];
            let alive = self.adversaries.get(id).is_some_and(Actor::is_alive);
            if alive && stunned.contains(&id) {
                self.events.push(TurnEvent::Stunned { actor: ActorRef::Adversary(id) });
                continue;
            }
            if alive {
                self.act(id, controlled, grid, &mut summary);
                continue;
            }
            self.order.remove(index);
            if let Some(mut removed) = self.adversaries.remove(id) {
                removed.status.clear();
            }
            self.events.push(TurnEvent::Removed { actor: id });
            summary.removed.push(id);
        }

        self.transition(TurnPhase::ControlledTurn);
        summary.controlled_alive = controlled.is_alive();
        summary
    }

    fn act(
        &mut self,
        id: ActorId,
        controlled: &mut Actor,
        grid: &TileGrid,
        summary: &mut TurnSummary,
    ) {
        let actor = ActorRef::Adversary(id);
        let Some(adversary) = self.adversaries.get(id) else {
            return;
        };
        let Some(behavior) = adversary.behavior else {
            self.events.push(TurnEvent::Held { actor });
            return;
        };
        if !controlled.is_alive() {
            self.events.push(TurnEvent::Held { actor });
            return;
        }

        let occupied: BTreeSet<Pos> = self
            .adversaries
            .iter()
            .filter(|(other, actor)| *other != id && actor.is_alive())
            .map(|(_, actor)| actor.pos)
            .collect();
        let from = adversary.pos;
        let target_pos = controlled.pos;
        let ctx = AiContext { grid, self_pos: from, target_pos, occupied: &occupied };

        match decide(behavior, &ctx) {
            Decision::Attack => {
                let attacker_stats = adversary.effective_stats(&self.config);
                let defender_stats = controlled.effective_stats(&self.config);
                let damage = calculate_damage(&attacker_stats, &defender_stats, &mut self.rng);
                apply_damage(&mut controlled.stats, damage);
                summary.damage_taken += damage;
                self.events.push(TurnEvent::Attacked {
                    attacker: actor,
                    target: ActorRef::Controlled,
                    damage,
                    defeated: !controlled.is_alive(),
                });
            }
            Decision::MoveTo(to) => {
                if let Some(adversary) = self.adversaries.get_mut(id) {
                    adversary.pos = to;
                }
                self.events.push(TurnEvent::Moved { actor, from, to });
            }
            Decision::Hold => self.events.push(TurnEvent::Held { actor }),
        }
    }

    fn record_tick(&mut self, actor: ActorRef, tick: TickOutcome) {
        if tick != TickOutcome::default() {
            self.events.push(TurnEvent::StatusTicked {
                actor,
                damage: tick.damage,
                healing: tick.healing,
            });
        }
    }

    fn transition(&mut self, phase: TurnPhase) {
        self.phase = phase;
        debug!(?phase, tracked = self.order.len(), "turn phase changed");
        self.events.push(TurnEvent::PhaseChanged { phase });
        if let Some(observer) = self.observer.as_mut() {
            observer(phase == TurnPhase::ControlledTurn);
        }
    }
}
