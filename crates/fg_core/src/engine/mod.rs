//! Simulation engine: input, state machine, physics, AI, orchestration.

pub mod ai;
pub mod battle;
pub mod clock;
pub mod combatant;
pub mod input;
pub mod intent;
pub mod keymap;
pub mod physics;
pub mod stage;

#[cfg(test)]
pub mod test_fixtures;

pub use ai::{AiController, DecisionPolicy, Difficulty, DistanceBandedPolicy, PriorityTreePolicy};
pub use battle::{Battle, BattleConfig, Controller};
pub use clock::{SimClock, TickClock, WallClock};
pub use combatant::CombatantState;
pub use input::InputBuffer;
pub use intent::{resolve_input_intent, Intent};
pub use keymap::{tokens, KeyMapping};
pub use stage::StageParams;
