//! Physics integration: gravity, ground collision, bounds, separation,
//! facing.
//!
//! Semi-implicit Euler over feet positions. All functions are pure over the
//! combatant pair plus stage parameters; the battle calls them in a fixed
//! order every tick.

use crate::models::{states, StateCategory};

use super::combatant::CombatantState;
use super::stage::StageParams;

/// Hard ceiling on a single tick's delta. A host stall must not tunnel a
/// combatant through the ground or skip whole animations.
pub const MAX_DT: f32 = 0.1;

/// Horizontal decay applied while grounded outside movement states, so
/// knockback impulses bleed off instead of sliding forever.
pub const GROUND_FRICTION: f32 = 8.0;

/// Horizontal impulse given to the defender when a hit lands.
pub const KNOCKBACK_SPEED: f32 = 120.0;

/// Clamp a host-supplied delta to the safe integration range. Non-positive
/// deltas collapse to zero (the tick becomes a no-op).
pub fn clamp_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(MAX_DT)
}

/// Gravity, position integration, ground collision, bounds clamp for one
/// combatant.
pub fn integrate(combatant: &mut CombatantState, dt: f32, stage: &StageParams) {
    if !combatant.is_grounded {
        combatant.velocity.1 += combatant.stats.gravity * dt;
    }

    combatant.position.0 += combatant.velocity.0 * dt;
    combatant.position.1 += combatant.velocity.1 * dt;

    if combatant.position.1 >= stage.ground_y {
        combatant.position.1 = stage.ground_y;
        combatant.velocity.1 = 0.0;
        if !combatant.is_grounded && combatant.current_state == states::JUMP {
            combatant.enter_state(states::IDLE);
        }
        combatant.is_grounded = true;
    } else {
        combatant.is_grounded = false;
    }

    combatant.position.0 = stage.clamp_x(combatant.position.0);

    if combatant.is_grounded {
        let category = combatant.profile.state_category(&combatant.current_state);
        if category != StateCategory::Movement {
            let decay = (1.0 - GROUND_FRICTION * dt).clamp(0.0, 1.0);
            combatant.velocity.0 *= decay;
        }
    }
}

/// Keep both combatants inside the visibility band: farther apart than
/// `max_separation`, each is pulled half the excess toward the other;
/// closer than `min_separation`, each is pushed half the deficit away.
/// Bounds clamps still apply, so a cornered combatant absorbs less of the
/// correction.
pub fn maintain_separation(a: &mut CombatantState, b: &mut CombatantState, stage: &StageParams) {
    let gap = b.position.0 - a.position.0;
    let dist = gap.abs();
    // When the pair overlaps exactly, treat `a` as the left combatant.
    let dir = if gap >= 0.0 { 1.0 } else { -1.0 };

    if dist > stage.max_separation {
        let half = (dist - stage.max_separation) * 0.5;
        a.position.0 += dir * half;
        b.position.0 -= dir * half;
    } else if dist < stage.min_separation {
        let half = (stage.min_separation - dist) * 0.5;
        a.position.0 -= dir * half;
        b.position.0 += dir * half;
    }

    a.position.0 = stage.clamp_x(a.position.0);
    b.position.0 = stage.clamp_x(b.position.0);
}

/// Recompute facing toward the opponent, unless the pair is within the
/// hysteresis band (avoids oscillation while crossing).
pub fn update_facing(a: &mut CombatantState, b: &mut CombatantState, stage: &StageParams) {
    let gap = b.position.0 - a.position.0;
    if gap.abs() < stage.facing_hysteresis {
        return;
    }
    a.facing_right = gap > 0.0;
    b.facing_right = gap < 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::grounded_shoto;
    use crate::models::states;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn dt_clamping() {
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(0.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(5.0), MAX_DT);
        assert_eq!(clamp_dt(0.016), 0.016);
    }

    #[test]
    fn jump_arc_returns_to_ground_and_idle() {
        // gravity=800, jumpVelocity=-400, groundY=300: ballistic flight
        // lasts 1.0s. Airborne at the apex (0.5s), grounded and idle again
        // within 1.1s.
        let stage = StageParams::default();
        let mut combatant = grounded_shoto(480.0, true);
        assert_eq!(combatant.position.1, stage.ground_y);

        combatant.velocity.1 = combatant.stats.jump_velocity;
        combatant.is_grounded = false;
        combatant.enter_state(states::JUMP);
        assert_eq!(combatant.velocity.1, -400.0);

        let mut elapsed = 0.0f32;
        while elapsed < 0.5 {
            integrate(&mut combatant, DT, &stage);
            elapsed += DT;
        }
        assert!(!combatant.is_grounded);
        assert!(combatant.position.1 < stage.ground_y);

        while elapsed < 1.1 {
            integrate(&mut combatant, DT, &stage);
            elapsed += DT;
        }
        assert!(combatant.is_grounded);
        assert_eq!(combatant.position.1, stage.ground_y);
        assert_eq!(combatant.current_state, states::IDLE);
    }

    #[test]
    fn horizontal_clamp_is_hard() {
        let stage = StageParams::default();
        let mut combatant = grounded_shoto(stage.min_x + 1.0, false);
        combatant.velocity.0 = -10_000.0;
        integrate(&mut combatant, DT, &stage);
        assert_eq!(combatant.position.0, stage.min_x);
        // Clamp, not bounce: velocity unchanged by the wall itself (only
        // friction applies).
        assert!(combatant.velocity.0 < 0.0);
    }

    #[test]
    fn separation_pulls_distant_pair_together() {
        let stage = StageParams::default();
        let mut a = grounded_shoto(40.0, true);
        let mut b = grounded_shoto(840.0, false);
        maintain_separation(&mut a, &mut b, &stage);

        let dist = (b.position.0 - a.position.0).abs();
        assert!((dist - stage.max_separation).abs() < 1e-3);
        // Half the excess (100) each.
        assert_eq!(a.position.0, 140.0);
        assert_eq!(b.position.0, 740.0);
    }

    #[test]
    fn separation_pushes_overlapping_pair_apart() {
        let stage = StageParams::default();
        let mut a = grounded_shoto(480.0, true);
        let mut b = grounded_shoto(500.0, false);
        maintain_separation(&mut a, &mut b, &stage);

        let dist = (b.position.0 - a.position.0).abs();
        assert!((dist - stage.min_separation).abs() < 1e-3);
        assert!(a.position.0 < b.position.0);
    }

    #[test]
    fn separation_respects_bounds() {
        let stage = StageParams::default();
        let mut a = grounded_shoto(stage.min_x, true);
        let mut b = grounded_shoto(stage.max_x, false);
        maintain_separation(&mut a, &mut b, &stage);
        assert!(a.position.0 >= stage.min_x);
        assert!(b.position.0 <= stage.max_x);
    }

    #[test]
    fn facing_tracks_opponent_symmetrically() {
        let stage = StageParams::default();
        let mut a = grounded_shoto(200.0, false);
        let mut b = grounded_shoto(600.0, false);
        update_facing(&mut a, &mut b, &stage);
        assert!(a.facing_right);
        assert!(!b.facing_right);

        // Swap sides: both flip.
        a.position.0 = 700.0;
        update_facing(&mut a, &mut b, &stage);
        assert!(!a.facing_right);
        assert!(b.facing_right);
    }

    #[test]
    fn facing_holds_inside_hysteresis_band() {
        let stage = StageParams::default();
        let mut a = grounded_shoto(500.0, true);
        let mut b = grounded_shoto(504.0, false);
        let before = (a.facing_right, b.facing_right);
        update_facing(&mut a, &mut b, &stage);
        assert_eq!((a.facing_right, b.facing_right), before);
    }
}
