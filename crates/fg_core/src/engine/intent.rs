//! Intents: the single vocabulary both input resolution and the AI speak.
//!
//! Human input and AI decisions converge on [`Intent`] and flow through the
//! same state-resolution path in the battle tick; the two sources are not
//! permitted to diverge in how they affect combatant state.

use super::input::{InputBuffer, DEFAULT_MOTION_WINDOW_MS};
use super::keymap::tokens;
use crate::models::CharacterProfile;

/// At most one state-changing request per combatant per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// No request; a human combatant with no input idles, an AI combatant
    /// continues its previous action.
    None,
    /// Walk toward the opponent. `speed_scale` is 1.0 for human input; the
    /// banded AI policy scales its approach speed through it.
    MoveToward { speed_scale: f32 },
    /// Walk away from the opponent.
    MoveAway,
    Jump,
    LightAttack,
    /// Execute the named special/super move (meter checked at application).
    SpecialAttack { name: String },
    /// Neutral filler; resolved into a random concrete move by the battle
    /// so AI randomness and state application stay on one path.
    NeutralRandom,
}

impl Intent {
    pub fn move_toward() -> Intent {
        Intent::MoveToward { speed_scale: 1.0 }
    }
}

/// Resolve buffered human input into at most one intent, applying the fixed
/// precedence: matched motion (super, then special) > armed jump > armed
/// attack > held movement > none.
///
/// Consumes the armed flag of the triggering edge token; motion matching
/// itself stays side-effect free.
pub fn resolve_input_intent(
    buffer: &mut InputBuffer,
    profile: &CharacterProfile,
    meter: f32,
    now_ms: u64,
) -> Intent {
    for (mv, _is_super) in profile
        .super_moves
        .iter()
        .map(|mv| (mv, true))
        .chain(profile.special_moves.iter().map(|mv| (mv, false)))
    {
        if mv.meter_cost > meter {
            continue;
        }
        if !buffer.match_motion(&mv.motion_sequence, DEFAULT_MOTION_WINDOW_MS, now_ms) {
            continue;
        }
        // The motion terminates in an edge-triggered button; that press is
        // spent on the special so it cannot double as a normal attack.
        let terminal = mv.motion_sequence.last().map(String::as_str).unwrap_or("");
        if buffer.is_action_armed(terminal) {
            return Intent::SpecialAttack { name: mv.name.clone() };
        }
    }

    if buffer.is_action_armed(tokens::UP) {
        return Intent::Jump;
    }
    if buffer.is_action_armed(tokens::PUNCH) || buffer.is_action_armed(tokens::KICK) {
        return Intent::LightAttack;
    }
    if buffer.is_held(tokens::FORWARD) {
        return Intent::move_toward();
    }
    if buffer.is_held(tokens::BACKWARD) {
        return Intent::MoveAway;
    }
    Intent::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::shoto_profile;

    #[test]
    fn motion_special_outranks_armed_attack() {
        let profile = shoto_profile();
        let mut buffer = InputBuffer::default();
        buffer.record_press(tokens::DOWN, 1000);
        buffer.record_press(tokens::FORWARD, 1080);
        buffer.record_press(tokens::PUNCH, 1140);

        let intent = resolve_input_intent(&mut buffer, &profile, 0.0, 1150);
        assert_eq!(intent, Intent::SpecialAttack { name: "hadoken".to_string() });

        // The terminal punch press was consumed by the special.
        let next = resolve_input_intent(&mut buffer, &profile, 0.0, 1160);
        assert_ne!(next, Intent::LightAttack);
    }

    #[test]
    fn jump_outranks_attack() {
        let profile = shoto_profile();
        let mut buffer = InputBuffer::default();
        buffer.record_press(tokens::UP, 1000);
        buffer.record_press(tokens::PUNCH, 1001);

        assert_eq!(resolve_input_intent(&mut buffer, &profile, 0.0, 1002), Intent::Jump);
        // The punch press is still armed for the next tick.
        assert_eq!(resolve_input_intent(&mut buffer, &profile, 0.0, 1003), Intent::LightAttack);
    }

    #[test]
    fn held_movement_is_lowest_priority() {
        let profile = shoto_profile();
        let mut buffer = InputBuffer::default();
        buffer.record_press(tokens::FORWARD, 1000);
        buffer.record_press(tokens::PUNCH, 1010);

        assert_eq!(resolve_input_intent(&mut buffer, &profile, 0.0, 1020), Intent::LightAttack);
        assert_eq!(resolve_input_intent(&mut buffer, &profile, 0.0, 1030), Intent::move_toward());

        buffer.record_release(tokens::FORWARD);
        assert_eq!(resolve_input_intent(&mut buffer, &profile, 0.0, 1040), Intent::None);
    }

    #[test]
    fn super_requires_meter() {
        let profile = shoto_profile();
        let mv = &profile.super_moves[0];
        let mut buffer = InputBuffer::default();
        let mut t = 1000;
        for token in &mv.motion_sequence {
            buffer.record_press(token, t);
            buffer.record_release(token);
            t += 60;
        }
        // Terminal token must stay armed for the resolution to fire.
        buffer.record_press(mv.motion_sequence.last().unwrap(), t);

        let broke = resolve_input_intent(&mut buffer, &profile, 0.0, t + 10);
        assert_ne!(broke, Intent::SpecialAttack { name: mv.name.clone() });
    }
}
