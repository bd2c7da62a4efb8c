//! # fg_core - Deterministic Fighting Game Simulation Core
//!
//! Frame-accurate two-combatant fighting game simulation, driven headlessly
//! by externally supplied time deltas: character animation/combat state
//! machines, simple physics, a timing-sensitive input buffer with motion
//! matching, and a difficulty-scaled AI decision engine.
//!
//! ## Features
//! - 100% deterministic with the logical tick clock (same seed + same
//!   deltas = same battle)
//! - One `Battle::tick(dt)` entry point, no internal suspension
//! - Human input and AI feed the same intent-resolution path
//! - Rendering, audio, and input polling live outside the core and talk to
//!   it through narrow read/event interfaces

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]

pub mod data;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::{
    resolve_input_intent, tokens, AiController, Battle, BattleConfig, CombatantState, Controller,
    DecisionPolicy, Difficulty, DistanceBandedPolicy, InputBuffer, Intent, KeyMapping,
    PriorityTreePolicy, SimClock, StageParams, TickClock, WallClock,
};
pub use error::{ProfileError, Result};
pub use models::{
    states, AnimationDescriptor, Archetype, CharacterProfile, CharacterStats, FrameDescriptor,
    FramePhase, HitRegion, ResolvedStats, Side, SimEvent, SimEventKind, SpecialMoveDef,
    StateCategory,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
