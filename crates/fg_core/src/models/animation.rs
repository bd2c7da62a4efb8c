//! Frame-data table: per-state animation descriptors.
//!
//! A state's animation is an ordered list of frames, each holding a source
//! region (rendering only, unused headless), a combat phase tag, a duration
//! in frame units, and an optional hit-generating region. Frame timers
//! accumulate in frame units (`dt * base_frame_rate`), not seconds.

use serde::{Deserialize, Serialize};

/// Combat phase of a single animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FramePhase {
    #[default]
    Startup,
    /// Hit region (if any) is live only during this phase.
    Active,
    Recovery,
}

/// Hit-generating region, relative to the combatant's origin and mirrored
/// by facing. Coordinates follow screen convention: y grows downward, the
/// origin is the combatant's feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitRegion {
    pub region_x: f32,
    pub region_y: f32,
    pub region_w: f32,
    pub region_h: f32,
    pub damage: f32,
}

/// One entry in a state's frame list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    /// Source-region bounds. Rendering-only; the headless core never reads
    /// them but keeps them so one profile file serves both layers.
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,

    #[serde(default)]
    pub phase: FramePhase,

    /// Duration in frame units. Must be >= 1 (validated at load).
    pub duration_ticks: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<HitRegion>,
}

impl FrameDescriptor {
    pub fn timed(phase: FramePhase, duration_ticks: u32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 0.0,
            height: 0.0,
            phase,
            duration_ticks,
            hit: None,
        }
    }

    pub fn with_hit(mut self, hit: HitRegion) -> Self {
        self.hit = Some(hit);
        self
    }
}

/// Behavioral category of a state. Committed categories cannot be
/// interrupted by new intents until their animation completes (or, for
/// jump, until landing). Data-driven so that interruptibility is decided
/// at profile-load time, not by string matching at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StateCategory {
    #[default]
    Neutral,
    Movement,
    Jump,
    Attack,
    Special,
    Super,
    KnockedOut,
}

impl StateCategory {
    /// Whether a state of this category locks out new intents until its
    /// animation reaches the last frame.
    pub fn is_committed(self) -> bool {
        matches!(
            self,
            StateCategory::Jump
                | StateCategory::Attack
                | StateCategory::Special
                | StateCategory::Super
                | StateCategory::KnockedOut
        )
    }
}

/// Per-state animation description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDescriptor {
    pub name: String,

    pub frames: Vec<FrameDescriptor>,

    /// Loop back to frame 0 when the last frame completes.
    #[serde(rename = "loop", default)]
    pub looped: bool,

    /// State entered when a non-looping animation completes. Defaults to
    /// `idle`. Naming the owning state holds the last frame instead
    /// (terminal animations such as knockout use this).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_end: Option<String>,

    /// Frame units accumulated per second of simulated time.
    pub base_frame_rate: f32,

    #[serde(default)]
    pub category: StateCategory,
}

impl AnimationDescriptor {
    pub fn new(name: &str, category: StateCategory, frames: Vec<FrameDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            frames,
            looped: false,
            on_end: None,
            base_frame_rate: 60.0,
            category,
        }
    }

    pub fn looping(mut self) -> Self {
        self.looped = true;
        self
    }

    pub fn ends_in(mut self, state: &str) -> Self {
        self.on_end = Some(state.to_string());
        self
    }

    pub fn frame_rate(mut self, rate: f32) -> Self {
        self.base_frame_rate = rate;
        self
    }

    pub fn last_frame_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_categories() {
        assert!(StateCategory::Attack.is_committed());
        assert!(StateCategory::Jump.is_committed());
        assert!(StateCategory::Super.is_committed());
        assert!(!StateCategory::Movement.is_committed());
        assert!(!StateCategory::Neutral.is_committed());
    }

    #[test]
    fn frame_descriptor_json_round_trip() {
        let frame = FrameDescriptor::timed(FramePhase::Active, 4).with_hit(HitRegion {
            region_x: 30.0,
            region_y: -50.0,
            region_w: 40.0,
            region_h: 20.0,
            damage: 8.0,
        });
        let json = serde_json::to_string(&frame).unwrap();
        let back: FrameDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn loop_field_uses_reserved_word_in_json() {
        let anim = AnimationDescriptor::new(
            "idle",
            StateCategory::Neutral,
            vec![FrameDescriptor::timed(FramePhase::Startup, 6)],
        )
        .looping();
        let json = serde_json::to_value(&anim).unwrap();
        assert_eq!(json["loop"], serde_json::Value::Bool(true));
    }
}
