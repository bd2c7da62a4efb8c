//! Shared fixtures for engine tests.

use std::sync::Arc;

use crate::data;
use crate::engine::combatant::CombatantState;
use crate::engine::stage::StageParams;
use crate::models::CharacterProfile;

pub fn shoto_profile() -> CharacterProfile {
    data::kaito()
}

pub fn zoner_profile() -> CharacterProfile {
    data::vesper()
}

/// A grounded Kaito at `x`, feet on the default stage's ground line.
pub fn grounded_shoto(x: f32, facing_right: bool) -> CombatantState {
    let stage = StageParams::default();
    CombatantState::new(Arc::new(shoto_profile()), (x, stage.ground_y), facing_right)
}

/// A grounded Vesper at `x`.
pub fn grounded_zoner(x: f32, facing_right: bool) -> CombatantState {
    let stage = StageParams::default();
    CombatantState::new(Arc::new(zoner_profile()), (x, stage.ground_y), facing_right)
}
