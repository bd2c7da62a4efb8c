//! Headless battle runner.
//!
//! Drives an AI-vs-AI battle at a fixed 60Hz logical timestep and prints a
//! JSON summary (optionally the full event log). Exists so the simulation
//! core can be exercised, profiled, and regression-checked without any
//! rendering host.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use fg_core::{
    data, AiController, Battle, BattleConfig, CharacterProfile, Controller, Difficulty,
    DistanceBandedPolicy, PriorityTreePolicy, Side, SimEvent,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Priority tree: anti-air > punish > zoning > close attack > neutral.
    Priority,
    /// Distance-banded probabilistic attack/approach.
    Banded,
}

#[derive(Parser, Debug)]
#[command(name = "fg_cli", about = "Headless fighting game battle runner")]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated battle length in seconds (stops early on knockout).
    #[arg(long, default_value_t = 60.0)]
    duration_secs: f32,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    #[arg(long, value_enum, default_value_t = PolicyArg::Priority)]
    policy: PolicyArg,

    /// Built-in name (kaito, vesper) or path to a profile JSON file.
    #[arg(long, default_value = "kaito")]
    p1: String,

    #[arg(long, default_value = "vesper")]
    p2: String,

    /// Include the full event log in the output.
    #[arg(long)]
    events: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CombatantSummary {
    name: String,
    health: f32,
    super_meter: f32,
    final_state: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BattleSummary {
    seed: u64,
    ticks: u64,
    simulated_secs: f32,
    winner: Option<Side>,
    p1: CombatantSummary,
    p2: CombatantSummary,
    event_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<SimEvent>>,
}

fn load_profile(spec: &str) -> Result<CharacterProfile> {
    match spec {
        "kaito" => Ok(data::kaito()),
        "vesper" => Ok(data::vesper()),
        path if path.ends_with(".json") => CharacterProfile::from_file(Path::new(path))
            .with_context(|| format!("loading profile from {path}")),
        other => bail!("unknown profile '{other}' (use kaito, vesper, or a .json path)"),
    }
}

fn make_ai(policy: PolicyArg, difficulty: DifficultyArg, seed: u64) -> Controller {
    let boxed: Box<dyn fg_core::DecisionPolicy> = match policy {
        PolicyArg::Priority => Box::new(PriorityTreePolicy::default()),
        PolicyArg::Banded => Box::new(DistanceBandedPolicy::default()),
    };
    Controller::Ai(AiController::new(boxed, difficulty.into(), seed))
}

fn summarize(battle: &Battle, side: Side) -> CombatantSummary {
    let combatant = battle.combatant(side);
    CombatantSummary {
        name: combatant.profile.name.clone(),
        health: combatant.health,
        super_meter: combatant.super_meter,
        final_state: combatant.current_state.clone(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.duration_secs <= 0.0 {
        bail!("duration must be positive");
    }

    let p1 = Arc::new(load_profile(&args.p1)?);
    let p2 = Arc::new(load_profile(&args.p2)?);

    let mut battle = Battle::new(
        p1,
        p2,
        [
            make_ai(args.policy, args.difficulty, args.seed),
            make_ai(args.policy, args.difficulty, args.seed.wrapping_add(0x9e37)),
        ],
        BattleConfig { seed: args.seed, ..Default::default() },
    );

    let mut events = Vec::new();
    let ticks = (args.duration_secs / DT).ceil() as u64;
    for _ in 0..ticks {
        battle.tick(DT);
        events.extend(battle.drain_events());
        if battle.is_over() {
            break;
        }
    }

    let summary = BattleSummary {
        seed: args.seed,
        ticks: battle.tick_count(),
        simulated_secs: battle.tick_count() as f32 * DT,
        winner: battle.winner(),
        p1: summarize(&battle, Side::P1),
        p2: summarize(&battle, Side::P2),
        event_count: events.len(),
        events: args.events.then_some(events),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
