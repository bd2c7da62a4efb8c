//! Stage parameters: ground line, horizontal bounds, separation band.

use serde::{Deserialize, Serialize};

/// Fixed sprite margin kept between a combatant and the playfield edge.
pub const SPRITE_MARGIN: f32 = 40.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageParams {
    /// Feet-level y of the ground plane (y grows downward).
    pub ground_y: f32,
    /// Hard horizontal clamp range, margin already applied.
    pub min_x: f32,
    pub max_x: f32,
    /// Combatants closer than this are pushed apart, farther than
    /// `max_separation` pulled together, half the correction each.
    pub min_separation: f32,
    pub max_separation: f32,
    /// Below this horizontal gap, facing is left alone to avoid
    /// oscillation when combatants cross.
    pub facing_hysteresis: f32,
    /// Horizontal gap between spawn positions at round start.
    pub spawn_gap: f32,
}

impl StageParams {
    /// Derive bounds from a playfield width, margin applied on both sides.
    pub fn from_playfield_width(width: f32) -> Self {
        Self { min_x: SPRITE_MARGIN, max_x: width - SPRITE_MARGIN, ..Self::default() }
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) * 0.5
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            ground_y: 300.0,
            min_x: SPRITE_MARGIN,
            max_x: 960.0 - SPRITE_MARGIN,
            min_separation: 60.0,
            max_separation: 600.0,
            facing_hysteresis: 10.0,
            spawn_gap: 240.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_width_applies_margin() {
        let stage = StageParams::from_playfield_width(1280.0);
        assert_eq!(stage.min_x, SPRITE_MARGIN);
        assert_eq!(stage.max_x, 1280.0 - SPRITE_MARGIN);
    }

    #[test]
    fn clamp_is_hard() {
        let stage = StageParams::default();
        assert_eq!(stage.clamp_x(-500.0), stage.min_x);
        assert_eq!(stage.clamp_x(5000.0), stage.max_x);
    }
}
