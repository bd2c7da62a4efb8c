//! Character profiles: stats, animation set, special/super move tables.
//!
//! Profiles are externally authored (JSON) and loaded once before a battle.
//! Validation happens here, at load time, so that invalid-state bugs become
//! load-time errors instead of use-time surprises. Missing optional stat
//! fields are substituted with safe defaults and flagged, never fatal.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::animation::{AnimationDescriptor, StateCategory};
use super::states;
use crate::engine::keymap::is_known_token;
use crate::error::{ProfileError, Result};

/// Behavioral category parameterizing AI decision weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Archetype {
    #[default]
    Allrounder,
    Zoner,
    Rushdown,
    Shoto,
}

/// Raw stat block as authored. Every field is optional; [`resolve`] fills
/// gaps with safe defaults and reports which fields were defaulted.
///
/// [`resolve`]: CharacterStats::resolve
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub max_health: Option<f32>,
    pub move_speed: Option<f32>,
    /// Negative = upward (screen y grows downward).
    pub jump_velocity: Option<f32>,
    pub gravity: Option<f32>,
    pub meter_gain_on_hit: Option<f32>,
    pub meter_gain_on_block: Option<f32>,
    pub meter_gain_on_take_damage: Option<f32>,
}

/// Stat defaults used when a profile omits a field. Chosen so an empty stat
/// block still produces a playable combatant.
pub mod stat_defaults {
    pub const MAX_HEALTH: f32 = 100.0;
    pub const MOVE_SPEED: f32 = 150.0;
    pub const JUMP_VELOCITY: f32 = -400.0;
    pub const GRAVITY: f32 = 800.0;
    pub const METER_GAIN_ON_HIT: f32 = 10.0;
    pub const METER_GAIN_ON_BLOCK: f32 = 4.0;
    pub const METER_GAIN_ON_TAKE_DAMAGE: f32 = 6.0;
}

/// Fully populated stat block used by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStats {
    pub max_health: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub meter_gain_on_hit: f32,
    pub meter_gain_on_block: f32,
    pub meter_gain_on_take_damage: f32,
}

impl CharacterStats {
    /// Fill missing fields with safe defaults. Each substitution is logged
    /// and the field name is returned for diagnosability (profile data is
    /// externally authored and may be incomplete).
    pub fn resolve(&self, profile_name: &str) -> (ResolvedStats, Vec<&'static str>) {
        let mut defaulted = Vec::new();
        let mut pick = |value: Option<f32>, default: f32, field: &'static str| match value {
            Some(v) => v,
            None => {
                defaulted.push(field);
                default
            }
        };

        let resolved = ResolvedStats {
            max_health: pick(self.max_health, stat_defaults::MAX_HEALTH, "maxHealth"),
            move_speed: pick(self.move_speed, stat_defaults::MOVE_SPEED, "moveSpeed"),
            jump_velocity: pick(self.jump_velocity, stat_defaults::JUMP_VELOCITY, "jumpVelocity"),
            gravity: pick(self.gravity, stat_defaults::GRAVITY, "gravity"),
            meter_gain_on_hit: pick(
                self.meter_gain_on_hit,
                stat_defaults::METER_GAIN_ON_HIT,
                "meterGainOnHit",
            ),
            meter_gain_on_block: pick(
                self.meter_gain_on_block,
                stat_defaults::METER_GAIN_ON_BLOCK,
                "meterGainOnBlock",
            ),
            meter_gain_on_take_damage: pick(
                self.meter_gain_on_take_damage,
                stat_defaults::METER_GAIN_ON_TAKE_DAMAGE,
                "meterGainOnTakeDamage",
            ),
        };

        if !defaulted.is_empty() {
            warn!(profile = profile_name, fields = ?defaulted, "stat fields missing, defaults substituted");
        }
        (resolved, defaulted)
    }
}

/// A special or super move: an ordered motion sequence that, when matched
/// in the input buffer (or requested by the AI), enters `target_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialMoveDef {
    pub name: String,
    pub motion_sequence: Vec<String>,
    pub target_state: String,
    #[serde(default)]
    pub meter_cost: f32,
    /// Marks the move as a projectile, making it eligible for the AI's
    /// zoning branch.
    #[serde(default)]
    pub projectile: bool,
}

fn default_body_width() -> f32 {
    48.0
}

fn default_body_height() -> f32 {
    110.0
}

fn default_basic_attack() -> String {
    "lightPunch".to_string()
}

/// Immutable per-character description, loaded once, shared read-only by
/// the combatant state that references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    pub name: String,
    #[serde(default)]
    pub archetype: Archetype,
    #[serde(default)]
    pub stats: CharacterStats,
    pub animations: HashMap<String, AnimationDescriptor>,
    #[serde(default)]
    pub special_moves: Vec<SpecialMoveDef>,
    #[serde(default)]
    pub super_moves: Vec<SpecialMoveDef>,

    /// State entered by a plain armed attack press.
    #[serde(default = "default_basic_attack")]
    pub basic_attack_state: String,

    /// Body rectangle for hit overlap tests, centered on x, feet at y.
    #[serde(default = "default_body_width")]
    pub body_width: f32,
    #[serde(default = "default_body_height")]
    pub body_height: f32,
}

impl CharacterProfile {
    /// Load-time validation: every state the profile can transition to must
    /// resolve to an animation, every animation must have frames with
    /// positive durations and a positive frame rate.
    pub fn validate(&self) -> Result<()> {
        for required in [
            states::IDLE,
            states::WALK_FORWARD,
            states::WALK_BACKWARD,
            states::JUMP,
            states::KNOCKED_OUT,
        ] {
            if !self.animations.contains_key(required) {
                return Err(ProfileError::MissingAnimation {
                    profile: self.name.clone(),
                    state: required.to_string(),
                });
            }
        }
        if !self.animations.contains_key(&self.basic_attack_state) {
            return Err(ProfileError::MissingAnimation {
                profile: self.name.clone(),
                state: self.basic_attack_state.clone(),
            });
        }

        for (state, anim) in &self.animations {
            if anim.frames.is_empty() {
                return Err(ProfileError::EmptyAnimation { state: state.clone() });
            }
            for (i, frame) in anim.frames.iter().enumerate() {
                if frame.duration_ticks == 0 {
                    return Err(ProfileError::ZeroFrameDuration { state: state.clone(), frame: i });
                }
            }
            if anim.base_frame_rate <= 0.0 {
                return Err(ProfileError::BadFrameRate { state: state.clone() });
            }
            if !anim.looped {
                let target = anim.on_end.as_deref().unwrap_or(states::IDLE);
                if !self.animations.contains_key(target) {
                    return Err(ProfileError::UnknownTargetState {
                        from: state.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }

        for mv in self.special_moves.iter().chain(&self.super_moves) {
            if mv.motion_sequence.is_empty() {
                return Err(ProfileError::EmptyMotion { name: mv.name.clone() });
            }
            for token in &mv.motion_sequence {
                if !is_known_token(token) {
                    return Err(ProfileError::UnknownMotionToken {
                        name: mv.name.clone(),
                        token: token.clone(),
                    });
                }
            }
            if mv.meter_cost < 0.0 {
                return Err(ProfileError::NegativeMeterCost { name: mv.name.clone() });
            }
            if !self.animations.contains_key(&mv.target_state) {
                return Err(ProfileError::UnknownTargetState {
                    from: mv.name.clone(),
                    target: mv.target_state.clone(),
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a profile from JSON text.
    pub fn from_json(json: &str) -> Result<CharacterProfile> {
        let profile: CharacterProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile from a JSON file.
    pub fn from_file(path: &Path) -> Result<CharacterProfile> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn animation(&self, state: &str) -> Option<&AnimationDescriptor> {
        self.animations.get(state)
    }

    /// First projectile special the character can afford at `meter`.
    pub fn available_projectile(&self, meter: f32) -> Option<&SpecialMoveDef> {
        self.special_moves.iter().find(|mv| mv.projectile && mv.meter_cost <= meter)
    }

    pub fn find_move(&self, name: &str) -> Option<(&SpecialMoveDef, bool)> {
        if let Some(mv) = self.special_moves.iter().find(|mv| mv.name == name) {
            return Some((mv, false));
        }
        self.super_moves.iter().find(|mv| mv.name == name).map(|mv| (mv, true))
    }

    pub fn state_category(&self, state: &str) -> StateCategory {
        self.animations.get(state).map(|a| a.category).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{shoto_profile, zoner_profile};
    use std::io::Write;

    #[test]
    fn fixture_profiles_validate() {
        shoto_profile().validate().unwrap();
        zoner_profile().validate().unwrap();
    }

    #[test]
    fn empty_stats_resolve_to_defaults_and_flag() {
        let stats = CharacterStats::default();
        let (resolved, defaulted) = stats.resolve("test");
        assert_eq!(resolved.max_health, stat_defaults::MAX_HEALTH);
        assert_eq!(resolved.gravity, stat_defaults::GRAVITY);
        assert_eq!(defaulted.len(), 7);
        assert!(defaulted.contains(&"moveSpeed"));
    }

    #[test]
    fn present_stats_are_not_flagged() {
        let stats = CharacterStats {
            max_health: Some(120.0),
            move_speed: Some(180.0),
            jump_velocity: Some(-420.0),
            gravity: Some(900.0),
            meter_gain_on_hit: Some(12.0),
            meter_gain_on_block: Some(5.0),
            meter_gain_on_take_damage: Some(7.0),
        };
        let (resolved, defaulted) = stats.resolve("test");
        assert!(defaulted.is_empty());
        assert_eq!(resolved.max_health, 120.0);
    }

    #[test]
    fn missing_required_animation_fails_validation() {
        let mut profile = shoto_profile();
        profile.animations.remove(states::JUMP);
        match profile.validate() {
            Err(ProfileError::MissingAnimation { state, .. }) => assert_eq!(state, states::JUMP),
            other => panic!("expected MissingAnimation, got {other:?}"),
        }
    }

    #[test]
    fn zero_duration_frame_fails_validation() {
        let mut profile = shoto_profile();
        profile
            .animations
            .get_mut(states::IDLE)
            .unwrap()
            .frames
            .get_mut(0)
            .unwrap()
            .duration_ticks = 0;
        assert!(matches!(profile.validate(), Err(ProfileError::ZeroFrameDuration { .. })));
    }

    #[test]
    fn unknown_special_target_fails_validation() {
        let mut profile = shoto_profile();
        profile.special_moves[0].target_state = "spiralArrow".to_string();
        assert!(matches!(profile.validate(), Err(ProfileError::UnknownTargetState { .. })));
    }

    #[test]
    fn unknown_motion_token_fails_validation() {
        let mut profile = shoto_profile();
        profile.special_moves[0].motion_sequence = vec!["taunt".to_string(), "punch".to_string()];
        match profile.validate() {
            Err(ProfileError::UnknownMotionToken { token, .. }) => assert_eq!(token, "taunt"),
            other => panic!("expected UnknownMotionToken, got {other:?}"),
        }
    }

    #[test]
    fn profile_json_file_round_trip() {
        let profile = zoner_profile();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string_pretty(&profile).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = CharacterProfile::from_file(file.path()).unwrap();
        assert_eq!(loaded.name, profile.name);
        assert_eq!(loaded.archetype, Archetype::Zoner);
        assert_eq!(loaded.special_moves.len(), profile.special_moves.len());
    }
}
