//! Data model: frame data, character profiles, host-visible events.

pub mod animation;
pub mod events;
pub mod profile;

pub use animation::{AnimationDescriptor, FrameDescriptor, FramePhase, HitRegion, StateCategory};
pub use events::{Side, SimEvent, SimEventKind};
pub use profile::{Archetype, CharacterProfile, CharacterStats, ResolvedStats, SpecialMoveDef};

/// Canonical state names every profile must provide.
///
/// `currentState` stays a data-driven string (profiles may add arbitrary
/// attack/special states), but the states the engine itself transitions to
/// are fixed and validated at profile-load time.
pub mod states {
    pub const IDLE: &str = "idle";
    pub const WALK_FORWARD: &str = "walkForward";
    pub const WALK_BACKWARD: &str = "walkBackward";
    pub const JUMP: &str = "jump";
    pub const KNOCKED_OUT: &str = "knockedOut";
}
