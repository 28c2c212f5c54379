use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use delve_core::{
    Actor, ActorKind, CombatStats, DungeonGenerator, RoomRole, SimConfig, StatusEffect,
    StatusKind, TurnController, manhattan, neighbors,
};
use delve_tools::{init_tracing, load_config};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{info, warn};

/// Plays random turns on generated dungeons and asserts simulation invariants.
#[derive(Parser)]
#[command(author, version, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to play
    #[arg(short, long, default_value_t = 20)]
    runs: u64,
    #[arg(short, long, default_value_t = 200)]
    turns: u32,
    #[arg(long, default_value_t = 60)]
    width: usize,
    #[arg(long, default_value_t = 40)]
    height: usize,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

const SPAWN_KINDS: [ActorKind; 3] = [ActorKind::Rat, ActorKind::Archer, ActorKind::Warden];
const AFFLICTIONS: [StatusKind; 6] = [
    StatusKind::Poison,
    StatusKind::Burning,
    StatusKind::Bleeding,
    StatusKind::Weakness,
    StatusKind::Vulnerable,
    StatusKind::Stun,
];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn soak(seed: u64, args: &Args, config: &SimConfig) -> Result<u32> {
    let dungeon = DungeonGenerator::new(seed, config.generator.clone())
        .generate(args.width, args.height)
        .with_context(|| format!("Failed to generate dungeon for seed {seed}"))?;
    let grid = &dungeon.grid;
    let start = dungeon.start_room().context("dungeon has no start room")?.center();
    let mut hero = Actor::controlled(start, CombatStats::new(80, 6, 2));
    hero.status.apply(StatusEffect::new(StatusKind::Regeneration, 30, 1));
    let mut turns = TurnController::new(seed, config.combat.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for room in dungeon.rooms.iter().filter(|room| room.role != RoomRole::Start) {
        let mut adversary = Actor::from_kind(choose(&mut rng, &SPAWN_KINDS), room.center());
        if rng.next_u64() % 3 == 0 {
            let kind = choose(&mut rng, &AFFLICTIONS);
            adversary.status.apply(StatusEffect::new(kind, 1 + (rng.next_u64() % 4) as u32, 1));
        }
        turns.spawn_adversary(adversary);
    }

    let mut played = 0;
    while played < args.turns && hero.is_alive() {
        let adjacent = turns
            .adversaries()
            .find(|(_, actor)| actor.is_alive() && manhattan(actor.pos, hero.pos) == 1)
            .map(|(id, _)| id);
        let acted = match adjacent {
            Some(target) => turns.player_attack(&hero, target).is_ok(),
            None => {
                let to = choose(&mut rng, &neighbors(hero.pos));
                turns.player_move(&mut hero, grid, to).is_ok()
            }
        };
        if !acted && rng.next_u64() % 8 == 0 {
            hero.status.apply(StatusEffect::new(StatusKind::Strength, 2, 2));
        }
        turns.end_controlled_turn(&mut hero, grid);
        played += 1;

        ensure!(turns.is_controlled_turn(), "seed {seed}: phase did not return to the player");
        ensure!(
            (0..=hero.stats.max_hp).contains(&hero.stats.current_hp),
            "seed {seed}: hero HP {} outside 0..={}",
            hero.stats.current_hp,
            hero.stats.max_hp
        );
        ensure!(grid.is_walkable(hero.pos), "seed {seed}: hero inside a wall");

        let mut seen = BTreeSet::from([hero.pos]);
        for (id, actor) in turns.adversaries() {
            ensure!(actor.is_alive(), "seed {seed}: dead adversary {id:?} still tracked");
            ensure!(
                (0..=actor.stats.max_hp).contains(&actor.stats.current_hp),
                "seed {seed}: adversary HP out of range"
            );
            ensure!(grid.is_walkable(actor.pos), "seed {seed}: adversary inside a wall");
            ensure!(seen.insert(actor.pos), "seed {seed}: two actors share {:?}", actor.pos);
        }
    }

    if !hero.is_alive() {
        warn!(seed, played, "hero fell");
    }
    Ok(played)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    info!(seed = args.seed, runs = args.runs, turns = args.turns, "starting soak");
    let mut total = 0_u64;
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        total += u64::from(soak(seed, &args, &config)?);
    }
    println!("Soak completed: {} runs, {total} turns, all invariants held.", args.runs);
    Ok(())
}
