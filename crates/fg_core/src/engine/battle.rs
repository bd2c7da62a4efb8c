//! Battle orchestration: the single `tick(dt)` entry point.
//!
//! Per tick, in fixed order: resolve at most one state-changing action per
//! combatant (human input or AI, same path), integrate physics for both,
//! maintain separation and facing, advance animations, resolve hits, check
//! knockouts. Single-threaded, no internal suspension; the host must not
//! call `tick` re-entrantly.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::models::profile::CharacterProfile;
use crate::models::{states, FramePhase, Side, SimEvent, SimEventKind, StateCategory};

use super::ai::AiController;
use super::clock::{SimClock, TickClock};
use super::combatant::CombatantState;
use super::input::InputBuffer;
use super::intent::{resolve_input_intent, Intent};
use super::keymap::tokens;
use super::physics::{self, KNOCKBACK_SPEED};
use super::stage::StageParams;

/// Fraction of damage that chips through a block.
pub const CHIP_DAMAGE_RATIO: f32 = 0.2;

/// Super meter cap.
pub const METER_MAX: f32 = 100.0;

/// Intent source for one side.
pub enum Controller {
    /// Driven by the side's input buffer.
    Human,
    Ai(AiController),
}

#[derive(Debug, Clone, Copy)]
pub struct BattleConfig {
    pub stage: StageParams,
    /// Seed for battle-local randomness (neutral random moves).
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self { stage: StageParams::default(), seed: 0 }
    }
}

pub struct Battle {
    combatants: [CombatantState; 2],
    inputs: [InputBuffer; 2],
    controllers: [Controller; 2],
    clock: Box<dyn SimClock>,
    rng: ChaCha8Rng,
    stage: StageParams,
    pending_events: Vec<SimEvent>,
    tick_count: u64,
    over: bool,
}

impl Battle {
    /// Construct a battle with an injected clock. Profiles are assumed
    /// valid per the loader contract ([`CharacterProfile::validate`]).
    pub fn with_clock(
        p1: Arc<CharacterProfile>,
        p2: Arc<CharacterProfile>,
        controllers: [Controller; 2],
        config: BattleConfig,
        clock: Box<dyn SimClock>,
    ) -> Self {
        let stage = config.stage;
        let center = stage.center_x();
        let half_gap = stage.spawn_gap * 0.5;
        let combatants = [
            CombatantState::new(p1, (center - half_gap, stage.ground_y), true),
            CombatantState::new(p2, (center + half_gap, stage.ground_y), false),
        ];
        Self {
            combatants,
            inputs: [InputBuffer::default(), InputBuffer::default()],
            controllers,
            clock,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            stage,
            pending_events: Vec::new(),
            tick_count: 0,
            over: false,
        }
    }

    /// Construct with the default deterministic tick clock.
    pub fn new(
        p1: Arc<CharacterProfile>,
        p2: Arc<CharacterProfile>,
        controllers: [Controller; 2],
        config: BattleConfig,
    ) -> Self {
        Self::with_clock(p1, p2, controllers, config, Box::new(TickClock::new()))
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        &self.combatants[side.index()]
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> Option<Side> {
        if !self.over {
            return None;
        }
        self.combatants
            .iter()
            .position(|c| c.is_knocked_out())
            .map(|loser| Side::from_index(loser).opponent())
    }

    /// Feed a press from the raw input source, timestamped on the battle
    /// clock.
    pub fn press(&mut self, side: Side, token: &str) {
        let now = self.clock.now_ms();
        self.inputs[side.index()].record_press(token, now);
    }

    pub fn release(&mut self, side: Side, token: &str) {
        self.inputs[side.index()].record_release(token);
    }

    /// Events accumulated since the last drain (audio/VFX subscription).
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Advance the simulation by `dt` seconds. Always produces a valid
    /// next state; anomalous deltas are clamped, never fatal.
    pub fn tick(&mut self, dt: f32) {
        let dt = physics::clamp_dt(dt);
        if dt == 0.0 {
            return;
        }
        self.clock.advance(dt);
        let now = self.clock.now_ms();
        self.tick_count += 1;

        for i in 0..2 {
            let intent = self.resolve_intent(i, now);
            self.apply_intent(i, intent);
        }

        for combatant in &mut self.combatants {
            physics::integrate(combatant, dt, &self.stage);
        }
        {
            let (left, right) = self.combatants.split_at_mut(1);
            physics::maintain_separation(&mut left[0], &mut right[0], &self.stage);
            physics::update_facing(&mut left[0], &mut right[0], &self.stage);
        }

        for combatant in &mut self.combatants {
            combatant.advance_animation(dt);
        }

        self.resolve_hits(0);
        self.resolve_hits(1);
        self.check_knockouts();
    }

    /// Resolve this side's intent source into at most one requested action.
    /// Committed animations (and finished battles) produce nothing.
    fn resolve_intent(&mut self, index: usize, now_ms: u64) -> Option<Intent> {
        let me = &self.combatants[index];
        let opponent = &self.combatants[1 - index];
        if self.over || me.is_knocked_out() || me.is_committed() {
            return None;
        }
        match &mut self.controllers[index] {
            Controller::Human => {
                let buffer = &mut self.inputs[index];
                Some(resolve_input_intent(buffer, &me.profile, me.super_meter, now_ms))
            }
            Controller::Ai(controller) => controller.poll(me, opponent, now_ms),
        }
    }

    fn apply_intent(&mut self, index: usize, intent: Option<Intent>) {
        let Some(intent) = intent else {
            // AI between decisions: previous action continues.
            return;
        };

        let intent = match intent {
            Intent::NeutralRandom => self.roll_neutral_move(),
            other => other,
        };

        let events = &mut self.pending_events;
        let tick = self.tick_count;
        let (me, opponent) = split_pair(&mut self.combatants, index);
        let side = Side::from_index(index);

        match intent {
            Intent::None => {
                // No input: a walking combatant returns to idle.
                if me.profile.state_category(&me.current_state) == StateCategory::Movement {
                    me.velocity.0 = 0.0;
                    me.enter_state(states::IDLE);
                }
            }
            Intent::MoveToward { speed_scale } => {
                if !me.is_grounded {
                    return;
                }
                let dir = toward(me, opponent);
                me.velocity.0 = me.stats.move_speed * speed_scale * dir;
                // Travel toward the opponent selects the forward walk,
                // regardless of absolute screen direction.
                if me.current_state != states::WALK_FORWARD {
                    me.enter_state(states::WALK_FORWARD);
                }
            }
            Intent::MoveAway => {
                if !me.is_grounded {
                    return;
                }
                let dir = toward(me, opponent);
                me.velocity.0 = -me.stats.move_speed * dir;
                if me.current_state != states::WALK_BACKWARD {
                    me.enter_state(states::WALK_BACKWARD);
                }
            }
            Intent::Jump => {
                if !me.is_grounded {
                    return;
                }
                me.velocity.1 = me.stats.jump_velocity;
                me.is_grounded = false;
                me.enter_state(states::JUMP);
            }
            Intent::LightAttack => {
                me.velocity.0 = 0.0;
                let attack = me.profile.basic_attack_state.clone();
                me.enter_state(&attack);
            }
            Intent::SpecialAttack { name } => {
                let Some((mv, is_super)) = me.profile.find_move(&name) else {
                    debug!(combatant = %me.profile.name, name = %name, "unknown move requested");
                    return;
                };
                if mv.meter_cost > me.super_meter {
                    return;
                }
                let target = mv.target_state.clone();
                let cost = mv.meter_cost;
                let move_name = mv.name.clone();
                me.super_meter -= cost;
                me.velocity.0 = 0.0;
                me.enter_state(&target);
                let kind = if is_super {
                    SimEventKind::SuperExecuted { name: move_name }
                } else {
                    SimEventKind::SpecialExecuted { name: move_name }
                };
                events.push(SimEvent { tick, side, kind });
            }
            Intent::NeutralRandom => unreachable!("resolved above"),
        }
    }

    /// Neutral filler from the battle RNG, shared by both sides so AI
    /// randomness rides the same seeded stream.
    fn roll_neutral_move(&mut self) -> Intent {
        match self.rng.gen_range(0..4u8) {
            0 | 1 => Intent::move_toward(),
            2 => Intent::MoveAway,
            _ => Intent::Jump,
        }
    }

    /// Test the attacker's live hit region (if any) against the defender's
    /// body rectangle. One hit per animation playthrough.
    fn resolve_hits(&mut self, attacker_index: usize) {
        let defender_guarding = self.inputs[1 - attacker_index].is_held(tokens::GUARD);
        let events = &mut self.pending_events;
        let tick = self.tick_count;
        let (attacker, defender) = split_pair(&mut self.combatants, attacker_index);

        if attacker.hit_landed || defender.is_knocked_out() {
            return;
        }
        let Some(frame) = attacker.current_frame() else {
            return;
        };
        if frame.phase != FramePhase::Active {
            return;
        }
        let Some(hit) = frame.hit else {
            return;
        };

        let ax = attacker.position.0;
        let ay = attacker.position.1;
        let (hx0, hx1) = if attacker.facing_right {
            (ax + hit.region_x, ax + hit.region_x + hit.region_w)
        } else {
            (ax - hit.region_x - hit.region_w, ax - hit.region_x)
        };
        let hy0 = ay + hit.region_y;
        let hy1 = hy0 + hit.region_h;

        let half_body = defender.profile.body_width * 0.5;
        let bx0 = defender.position.0 - half_body;
        let bx1 = defender.position.0 + half_body;
        let by0 = defender.position.1 - defender.profile.body_height;
        let by1 = defender.position.1;

        let overlap = hx0 < bx1 && bx0 < hx1 && hy0 < by1 && by0 < hy1;
        if !overlap {
            return;
        }

        attacker.hit_landed = true;
        let side = Side::from_index(attacker_index);
        let push = if defender.position.0 >= attacker.position.0 { 1.0 } else { -1.0 };

        // Holding guard or walking backward on the ground blocks: chip
        // damage, no knockback.
        let blocking = defender.is_grounded
            && !defender.is_committed()
            && (defender_guarding || defender.current_state == states::WALK_BACKWARD);
        if blocking {
            let chip = hit.damage * CHIP_DAMAGE_RATIO;
            defender.health -= chip;
            defender.super_meter =
                (defender.super_meter + defender.stats.meter_gain_on_block).min(METER_MAX);
            attacker.super_meter =
                (attacker.super_meter + attacker.stats.meter_gain_on_hit).min(METER_MAX);
            events.push(SimEvent { tick, side, kind: SimEventKind::AttackBlocked { chip } });
        } else {
            defender.health -= hit.damage;
            defender.super_meter =
                (defender.super_meter + defender.stats.meter_gain_on_take_damage).min(METER_MAX);
            attacker.super_meter =
                (attacker.super_meter + attacker.stats.meter_gain_on_hit).min(METER_MAX);
            defender.velocity.0 = KNOCKBACK_SPEED * push;
            events
                .push(SimEvent { tick, side, kind: SimEventKind::AttackLanded { damage: hit.damage } });
        }
    }

    fn check_knockouts(&mut self) {
        for index in 0..2 {
            let combatant = &mut self.combatants[index];
            if combatant.health > 0.0 || combatant.is_knocked_out() {
                continue;
            }
            combatant.force_knockout();
            let side = Side::from_index(index);
            self.pending_events.push(SimEvent {
                tick: self.tick_count,
                side,
                kind: SimEventKind::KnockedOut,
            });
            if !self.over {
                self.over = true;
                self.pending_events.push(SimEvent {
                    tick: self.tick_count,
                    side: side.opponent(),
                    kind: SimEventKind::RoundOver { winner: side.opponent() },
                });
            }
        }
    }
}

/// Direction from `me` toward the opponent on the x axis. A perfectly
/// overlapping pair falls back to current facing.
fn toward(me: &CombatantState, opponent: &CombatantState) -> f32 {
    let gap = opponent.position.0 - me.position.0;
    if gap > 0.0 {
        1.0
    } else if gap < 0.0 {
        -1.0
    } else if me.facing_right {
        1.0
    } else {
        -1.0
    }
}

fn split_pair(
    combatants: &mut [CombatantState; 2],
    index: usize,
) -> (&mut CombatantState, &mut CombatantState) {
    let (left, right) = combatants.split_at_mut(1);
    if index == 0 {
        (&mut left[0], &mut right[0])
    } else {
        (&mut right[0], &mut left[0])
    }
}
