//! Distance-banded probabilistic policy.
//!
//! Distance is partitioned into four inclusive bands, each with a fixed
//! attack probability; the complementary branch is a forced approach
//! toward the opponent with a scaled walk speed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{distance, DecisionPolicy};
use crate::engine::combatant::CombatantState;
use crate::engine::intent::Intent;

#[derive(Debug, Clone, Copy)]
pub struct DistanceBand {
    /// Inclusive upper edge of the band.
    pub max_distance: f32,
    pub attack_probability: f64,
}

#[derive(Debug, Clone)]
pub struct DistanceBandedPolicy {
    /// Melee, close, mid, long; ordered by distance. The last band's edge
    /// is effectively infinite.
    pub bands: [DistanceBand; 4],
    /// Walk-speed multiplier applied to the forced approach.
    pub approach_speed_scale: f32,
}

impl Default for DistanceBandedPolicy {
    fn default() -> Self {
        Self {
            bands: [
                DistanceBand { max_distance: 60.0, attack_probability: 0.70 },
                DistanceBand { max_distance: 140.0, attack_probability: 0.45 },
                DistanceBand { max_distance: 260.0, attack_probability: 0.20 },
                DistanceBand { max_distance: f32::INFINITY, attack_probability: 0.08 },
            ],
            approach_speed_scale: 1.25,
        }
    }
}

impl DistanceBandedPolicy {
    /// Same band edges with every attack probability forced to `p`.
    /// Used by tests to pin the probabilistic branch.
    pub fn with_flat_probability(p: f64) -> Self {
        let mut policy = Self::default();
        for band in &mut policy.bands {
            band.attack_probability = p;
        }
        policy
    }

    fn band_for(&self, dist: f32) -> DistanceBand {
        for band in &self.bands {
            if dist <= band.max_distance {
                return *band;
            }
        }
        self.bands[3]
    }
}

impl DecisionPolicy for DistanceBandedPolicy {
    fn name(&self) -> &'static str {
        "banded"
    }

    fn decide(
        &mut self,
        me: &CombatantState,
        opponent: &CombatantState,
        rng: &mut ChaCha8Rng,
    ) -> Intent {
        let dist = distance(me, opponent);
        let band = self.band_for(dist);

        if rng.gen_bool(band.attack_probability) {
            // In the outer bands prefer a projectile when one is ready;
            // pokes only connect up close.
            if dist > self.bands[1].max_distance {
                if let Some(mv) = me.profile.available_projectile(me.super_meter) {
                    return Intent::SpecialAttack { name: mv.name.clone() };
                }
            }
            Intent::LightAttack
        } else {
            Intent::MoveToward { speed_scale: self.approach_speed_scale }
        }
    }
}
