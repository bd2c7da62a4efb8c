//! Built-in demo profiles.
//!
//! The profile loader proper lives outside the core; these two characters
//! exist so the CLI runner and the test suite have fully validated data
//! without touching the filesystem.

use std::collections::HashMap;

use crate::models::animation::{
    AnimationDescriptor, FrameDescriptor, FramePhase, HitRegion, StateCategory,
};
use crate::models::profile::{Archetype, CharacterProfile, CharacterStats, SpecialMoveDef};
use crate::models::states;

fn loop_anim(name: &str, category: StateCategory, frames: usize, duration: u32) -> AnimationDescriptor {
    AnimationDescriptor::new(
        name,
        category,
        (0..frames).map(|_| FrameDescriptor::timed(FramePhase::Startup, duration)).collect(),
    )
    .looping()
    .frame_rate(10.0)
}

fn base_animations() -> HashMap<String, AnimationDescriptor> {
    let mut animations = HashMap::new();
    animations.insert(
        states::IDLE.to_string(),
        loop_anim(states::IDLE, StateCategory::Neutral, 4, 6),
    );
    animations.insert(
        states::WALK_FORWARD.to_string(),
        loop_anim(states::WALK_FORWARD, StateCategory::Movement, 4, 6),
    );
    animations.insert(
        states::WALK_BACKWARD.to_string(),
        loop_anim(states::WALK_BACKWARD, StateCategory::Movement, 4, 6),
    );
    animations.insert(
        states::JUMP.to_string(),
        // Holds its last frame until landing forces idle.
        AnimationDescriptor::new(
            states::JUMP,
            StateCategory::Jump,
            (0..3).map(|_| FrameDescriptor::timed(FramePhase::Startup, 6)).collect(),
        )
        .ends_in(states::JUMP)
        .frame_rate(10.0),
    );
    animations.insert(
        states::KNOCKED_OUT.to_string(),
        AnimationDescriptor::new(
            states::KNOCKED_OUT,
            StateCategory::KnockedOut,
            vec![
                FrameDescriptor::timed(FramePhase::Startup, 8),
                FrameDescriptor::timed(FramePhase::Startup, 10),
            ],
        )
        .ends_in(states::KNOCKED_OUT)
        .frame_rate(10.0),
    );
    animations
}

fn light_punch(damage: f32) -> AnimationDescriptor {
    AnimationDescriptor::new(
        "lightPunch",
        StateCategory::Attack,
        vec![
            FrameDescriptor::timed(FramePhase::Startup, 3),
            FrameDescriptor::timed(FramePhase::Active, 3).with_hit(HitRegion {
                region_x: 30.0,
                region_y: -70.0,
                region_w: 42.0,
                region_h: 24.0,
                damage,
            }),
            FrameDescriptor::timed(FramePhase::Recovery, 4),
        ],
    )
    .frame_rate(60.0)
}

/// Kaito: shoto all-rounder with a projectile special and an invincible-ish
/// rising super.
pub fn kaito() -> CharacterProfile {
    let mut animations = base_animations();
    animations.insert("lightPunch".to_string(), light_punch(8.0));
    animations.insert(
        "hadoken".to_string(),
        AnimationDescriptor::new(
            "hadoken",
            StateCategory::Special,
            vec![
                FrameDescriptor::timed(FramePhase::Startup, 6),
                FrameDescriptor::timed(FramePhase::Active, 8).with_hit(HitRegion {
                    region_x: 40.0,
                    region_y: -60.0,
                    region_w: 56.0,
                    region_h: 30.0,
                    damage: 12.0,
                }),
                FrameDescriptor::timed(FramePhase::Recovery, 8),
                FrameDescriptor::timed(FramePhase::Recovery, 6),
            ],
        )
        .frame_rate(60.0),
    );
    animations.insert(
        "risingFury".to_string(),
        AnimationDescriptor::new(
            "risingFury",
            StateCategory::Super,
            vec![
                FrameDescriptor::timed(FramePhase::Startup, 2),
                FrameDescriptor::timed(FramePhase::Active, 6).with_hit(HitRegion {
                    region_x: 20.0,
                    region_y: -100.0,
                    region_w: 48.0,
                    region_h: 80.0,
                    damage: 28.0,
                }),
                FrameDescriptor::timed(FramePhase::Recovery, 12),
            ],
        )
        .frame_rate(60.0),
    );

    CharacterProfile {
        name: "Kaito".to_string(),
        archetype: Archetype::Shoto,
        stats: CharacterStats {
            max_health: Some(100.0),
            move_speed: Some(150.0),
            jump_velocity: Some(-400.0),
            gravity: Some(800.0),
            meter_gain_on_hit: Some(10.0),
            meter_gain_on_block: Some(4.0),
            meter_gain_on_take_damage: Some(6.0),
        },
        animations,
        special_moves: vec![SpecialMoveDef {
            name: "hadoken".to_string(),
            motion_sequence: vec!["down".into(), "forward".into(), "punch".into()],
            target_state: "hadoken".to_string(),
            meter_cost: 0.0,
            projectile: true,
        }],
        super_moves: vec![SpecialMoveDef {
            name: "risingFury".to_string(),
            motion_sequence: vec!["forward".into(), "down".into(), "punch".into()],
            target_state: "risingFury".to_string(),
            meter_cost: 100.0,
            projectile: false,
        }],
        basic_attack_state: "lightPunch".to_string(),
        body_width: 48.0,
        body_height: 110.0,
    }
}

/// Vesper: zoner built around a long-reach projectile, slower on foot.
pub fn vesper() -> CharacterProfile {
    let mut animations = base_animations();
    animations.insert("lightPunch".to_string(), light_punch(6.0));
    animations.insert(
        "voidBolt".to_string(),
        AnimationDescriptor::new(
            "voidBolt",
            StateCategory::Special,
            vec![
                FrameDescriptor::timed(FramePhase::Startup, 8),
                FrameDescriptor::timed(FramePhase::Active, 10).with_hit(HitRegion {
                    region_x: 50.0,
                    region_y: -55.0,
                    region_w: 180.0,
                    region_h: 26.0,
                    damage: 10.0,
                }),
                FrameDescriptor::timed(FramePhase::Recovery, 10),
                FrameDescriptor::timed(FramePhase::Recovery, 8),
            ],
        )
        .frame_rate(60.0),
    );
    animations.insert(
        "umbralStorm".to_string(),
        AnimationDescriptor::new(
            "umbralStorm",
            StateCategory::Super,
            vec![
                FrameDescriptor::timed(FramePhase::Startup, 4),
                FrameDescriptor::timed(FramePhase::Active, 10).with_hit(HitRegion {
                    region_x: 30.0,
                    region_y: -80.0,
                    region_w: 220.0,
                    region_h: 60.0,
                    damage: 24.0,
                }),
                FrameDescriptor::timed(FramePhase::Recovery, 14),
            ],
        )
        .frame_rate(60.0),
    );

    CharacterProfile {
        name: "Vesper".to_string(),
        archetype: Archetype::Zoner,
        stats: CharacterStats {
            max_health: Some(90.0),
            move_speed: Some(130.0),
            jump_velocity: Some(-380.0),
            gravity: Some(800.0),
            meter_gain_on_hit: Some(9.0),
            meter_gain_on_block: Some(4.0),
            meter_gain_on_take_damage: Some(7.0),
        },
        animations,
        special_moves: vec![SpecialMoveDef {
            name: "voidBolt".to_string(),
            motion_sequence: vec!["down".into(), "backward".into(), "punch".into()],
            target_state: "voidBolt".to_string(),
            meter_cost: 0.0,
            projectile: true,
        }],
        super_moves: vec![SpecialMoveDef {
            name: "umbralStorm".to_string(),
            motion_sequence: vec!["backward".into(), "forward".into(), "super".into()],
            target_state: "umbralStorm".to_string(),
            meter_cost: 100.0,
            projectile: false,
        }],
        basic_attack_state: "lightPunch".to_string(),
        body_width: 44.0,
        body_height: 116.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_pass_validation() {
        kaito().validate().unwrap();
        vesper().validate().unwrap();
    }

    #[test]
    fn kaito_has_projectile_special() {
        let profile = kaito();
        assert!(profile.available_projectile(0.0).is_some());
    }

    #[test]
    fn vesper_is_a_zoner() {
        assert_eq!(vesper().archetype, Archetype::Zoner);
    }
}
