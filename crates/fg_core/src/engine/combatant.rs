//! Mutable per-combatant record and the state-machine advance.
//!
//! One `CombatantState` type, two instances, iterated symmetrically; the
//! two sides never get separate code paths. The profile is shared
//! read-only. Runtime anomalies (missing animation for the current state,
//! out-of-range frame index) are recovered locally per the error design:
//! force `idle` / clamp, log, never fail.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::profile::{CharacterProfile, ResolvedStats};
use crate::models::{states, AnimationDescriptor, FrameDescriptor};

#[derive(Debug, Clone)]
pub struct CombatantState {
    pub profile: Arc<CharacterProfile>,
    pub stats: ResolvedStats,

    /// Feet position, screen coordinates (y grows downward).
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub facing_right: bool,
    pub is_grounded: bool,

    pub current_state: String,
    pub current_frame_index: usize,
    /// Accumulates in frame units: `dt * base_frame_rate` per tick.
    /// Invariant: `0 <= frame_timer < current frame duration`.
    pub frame_timer: f32,

    pub health: f32,
    pub super_meter: f32,

    /// One hit per animation playthrough; reset on every state entry.
    pub hit_landed: bool,
}

impl CombatantState {
    /// Construct at round start, grounded at `position`. Missing stat
    /// fields resolve to defaults (logged inside `resolve`).
    pub fn new(profile: Arc<CharacterProfile>, position: (f32, f32), facing_right: bool) -> Self {
        let (stats, _defaulted) = profile.stats.resolve(&profile.name);
        Self {
            profile,
            stats,
            position,
            velocity: (0.0, 0.0),
            facing_right,
            is_grounded: true,
            current_state: states::IDLE.to_string(),
            current_frame_index: 0,
            frame_timer: 0.0,
            health: stats.max_health,
            super_meter: 0.0,
            hit_landed: false,
        }
    }

    pub fn current_animation(&self) -> Option<&AnimationDescriptor> {
        self.profile.animation(&self.current_state)
    }

    pub fn current_frame(&self) -> Option<&FrameDescriptor> {
        self.current_animation().and_then(|anim| anim.frames.get(self.current_frame_index))
    }

    pub fn is_knocked_out(&self) -> bool {
        self.current_state == states::KNOCKED_OUT
    }

    /// Whether the combatant is locked into its current animation: airborne,
    /// knocked out, or inside a committed (attack/special/jump) animation
    /// that has not yet reached its last frame.
    pub fn is_committed(&self) -> bool {
        if self.is_knocked_out() {
            return true;
        }
        if !self.is_grounded {
            return true;
        }
        match self.current_animation() {
            Some(anim) => {
                anim.category.is_committed() && self.current_frame_index < anim.last_frame_index()
            }
            None => false,
        }
    }

    /// Enter `state`, resetting frame index, frame timer, and the
    /// hit-landed guard. An unknown state falls back to `idle` (data error,
    /// recovered locally).
    pub fn enter_state(&mut self, state: &str) {
        let target = if self.profile.animations.contains_key(state) {
            state
        } else {
            warn!(combatant = %self.profile.name, state, "unknown state requested, forcing idle");
            states::IDLE
        };
        debug!(combatant = %self.profile.name, from = %self.current_state, to = target, "state transition");
        self.current_state = target.to_string();
        self.current_frame_index = 0;
        self.frame_timer = 0.0;
        self.hit_landed = false;
    }

    /// Forced, unconditional knockout entry (health <= 0 overrides the
    /// commitment rule).
    pub fn force_knockout(&mut self) {
        if !self.is_knocked_out() {
            self.enter_state(states::KNOCKED_OUT);
        }
    }

    /// Advance the animation clock by `dt` seconds of simulated time.
    ///
    /// The timer accumulates in frame units; whole frame durations are
    /// subtracted while they fit, advancing the frame index. A finished
    /// non-looping animation transitions to its `on_end` state (default
    /// `idle`), except that a terminal animation naming itself holds its
    /// last frame.
    pub fn advance_animation(&mut self, dt: f32) {
        let profile = Arc::clone(&self.profile);
        let Some(anim) = profile.animation(&self.current_state) else {
            warn!(combatant = %self.profile.name, state = %self.current_state,
                  "no animation for current state, forcing idle");
            self.enter_state(states::IDLE);
            return;
        };

        if self.current_frame_index >= anim.frames.len() {
            warn!(combatant = %self.profile.name, state = %self.current_state,
                  index = self.current_frame_index, "frame index out of range, clamping");
            self.current_frame_index = anim.last_frame_index();
        }

        self.frame_timer += dt * anim.base_frame_rate;
        loop {
            let duration = anim.frames[self.current_frame_index].duration_ticks as f32;
            if self.frame_timer < duration {
                break;
            }
            self.frame_timer -= duration;

            if self.current_frame_index < anim.last_frame_index() {
                self.current_frame_index += 1;
            } else if anim.looped {
                self.current_frame_index = 0;
            } else {
                let next = anim.on_end.as_deref().unwrap_or(states::IDLE);
                if next == self.current_state {
                    // Terminal animation (knockout): hold the last frame.
                    self.frame_timer = 0.0;
                } else {
                    self.enter_state(next);
                }
                break;
            }
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use crate::engine::test_fixtures::grounded_shoto;
    use proptest::prelude::*;

    proptest! {
        /// For any delta sequence, the frame index stays inside the current
        /// animation and the frame timer inside the current frame.
        #[test]
        fn frame_index_and_timer_stay_in_range(
            dts in proptest::collection::vec(0.0f32..0.2, 1..200),
        ) {
            let mut combatant = grounded_shoto(100.0, true);
            combatant.enter_state("lightPunch");
            for dt in dts {
                combatant.advance_animation(dt);
                let anim = combatant.current_animation().unwrap();
                prop_assert!(combatant.current_frame_index < anim.frames.len());
                let duration =
                    anim.frames[combatant.current_frame_index].duration_ticks as f32;
                prop_assert!(combatant.frame_timer >= 0.0);
                prop_assert!(combatant.frame_timer < duration);
            }
        }
    }
}
